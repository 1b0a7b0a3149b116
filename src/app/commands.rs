//! Inbound commands to the orchestrator.
//!
//! Requests from the outside world (maintenance terminal, scripting
//! argument, test harness) that [`AirlockOrchestrator`](super::orchestrator::AirlockOrchestrator)
//! interprets between ticks.

use crate::config::AirlockConfig;

#[derive(Debug, Clone)]
pub enum AirlockCommand {
    /// Show a raw status code on the panels (maintenance / testing only).
    /// Out-of-range codes fall back to the construction glyph.
    ForceStatus(i8),

    /// Hot-reload thresholds and the tick period. Rejected if the new config
    /// fails validation or renames any block, since bindings are resolved
    /// once at startup. The scheduler picks up the period from
    /// [`config()`](super::orchestrator::AirlockOrchestrator::config).
    UpdateConfig(AirlockConfig),
}
