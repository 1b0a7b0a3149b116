//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing airlock events to the `log` facade.
//! Startup failures go out at `error`, alarms at `warn`, the rest at `info`.

use log::{error, info, warn};

use crate::app::events::AirlockEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AirlockEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AirlockEvent) {
        match event {
            AirlockEvent::Armed { panels } => {
                info!("INIT | armed, panels={}", panels);
            }
            AirlockEvent::CapabilityMissing(capability) => {
                error!("INIT | {} not found", capability);
            }
            AirlockEvent::DisplaysMissing => {
                warn!("INIT | no status panels attached");
            }
            AirlockEvent::InitFailed { missing } => {
                error!("INIT | halted, {} required block(s) missing", missing);
            }
            AirlockEvent::StatusChanged { from, to } => {
                info!("STATUS | {} -> {}", from, to);
            }
            AirlockEvent::InvalidStatusCode(code) => {
                warn!("STATUS | invalid code {}, forced unknown", code);
            }
            AirlockEvent::AmbiguousTarget => {
                warn!("SEQ | no door selected, tick aborted");
            }
            AirlockEvent::TargetChanged { from, to } => {
                info!("SEQ | target {:?} -> {:?}", from, to);
            }
            AirlockEvent::DoorOpened(side) => {
                info!("SEQ | {} door opened", side);
            }
            AirlockEvent::ConfigRejected(e) => {
                warn!("CONFIG | update rejected: {}", e);
            }
        }
    }
}
