//! Outbound airlock events.
//!
//! The [`AirlockOrchestrator`](super::orchestrator::AirlockOrchestrator)
//! emits these through the [`EventSink`](super::ports::EventSink) port.
//! Initialization diagnostics are emitted once, at construction; the rest
//! once per occurrence.

use crate::control::{DoorSelector, DoorSide};
use crate::error::ConfigError;
use crate::gate::Capability;
use crate::status::DisplayStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum AirlockEvent {
    /// Every required block was bound; the control loop will run.
    Armed { panels: usize },

    /// A required block was not bound (one event per block).
    CapabilityMissing(Capability),

    /// The panel group was not found. Non-fatal.
    DisplaysMissing,

    /// Startup failed; the airlock stays inert until restarted.
    InitFailed { missing: usize },

    /// The panels switched to a different status.
    StatusChanged {
        from: DisplayStatus,
        to: DisplayStatus,
    },

    /// An out-of-range status code reached the panels.
    InvalidStatusCode(i8),

    /// A door sequence ran without a selected door.
    AmbiguousTarget,

    /// The open-target changed between ticks.
    TargetChanged { from: DoorSelector, to: DoorSelector },

    /// A door was commanded open after its side reached readiness.
    DoorOpened(DoorSide),

    /// A config reload was rejected; the previous config stays active.
    ConfigRejected(ConfigError),
}
