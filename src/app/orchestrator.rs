//! Airlock orchestrator — the hexagonal core.
//!
//! [`AirlockOrchestrator`] owns the armed collaborators, the status model and
//! both controllers. The external scheduler calls [`tick`] once per period;
//! every tick is a fresh, level-triggered evaluation of sensor and door
//! state, so a sequence interrupted mid-flight simply reconverges on the
//! next call.
//!
//! ```text
//!  Sensors ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!              │     AirlockOrchestrator      │
//!  Doors   ◀── │  Sequencer · Pressurization  │ ──▶ Panels
//!  Vent    ◀── └──────────────────────────────┘
//! ```
//!
//! [`tick`]: AirlockOrchestrator::tick

use log::{debug, info};

use crate::config::AirlockConfig;
use crate::error::ConfigError;
use crate::control::pressure::{Action, PressurizationController};
use crate::control::sequencer::{DoorSequencer, SequenceProgress};
use crate::control::{DoorSelector, DoorSide};
use crate::gate::{self, Airlock, InitOutcome};
use crate::status::{DisplayStatus, Render, StatusModel};

use super::commands::AirlockCommand;
use super::events::AirlockEvent;
use super::ports::{Bindings, EventSink};

/// What a tick did, for callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Initialization failed; nothing was read or commanded.
    Inert,
    /// No sensor active. `sealed` once both doors report closed.
    Idle { sealed: bool },
    /// Waiting for the door opposite the target to close.
    Sealing(DoorSide),
    /// Vent is cycling the chamber toward the target side's atmosphere.
    Pressurizing(DoorSide),
    /// Target side ready; its door was commanded open.
    Transit(DoorSide),
    /// Chamber cannot hold pressure; nothing commanded.
    Blocked(DoorSide),
    /// Sequence requested without a target.
    Aborted,
}

pub struct AirlockOrchestrator {
    airlock: Option<Airlock>,
    outcome: InitOutcome,
    status: StatusModel,
    sequencer: DoorSequencer,
    pressure: PressurizationController,
    config: AirlockConfig,
    target: DoorSelector,
    tick_count: u64,
}

impl AirlockOrchestrator {
    /// Run the initialization gate over `bindings`. Diagnostics for missing
    /// blocks are emitted here, once.
    pub fn new(bindings: Bindings, config: AirlockConfig, sink: &mut impl EventSink) -> Self {
        let (outcome, airlock, panels) = gate::arm(bindings, &config.names);

        for capability in outcome.missing() {
            sink.emit(&AirlockEvent::CapabilityMissing(*capability));
        }
        if outcome.displays_missing() {
            sink.emit(&AirlockEvent::DisplaysMissing);
        }
        if airlock.is_some() {
            sink.emit(&AirlockEvent::Armed {
                panels: panels.len(),
            });
        } else {
            sink.emit(&AirlockEvent::InitFailed {
                missing: outcome.missing().len(),
            });
        }

        Self {
            airlock,
            outcome,
            status: StatusModel::new(panels),
            sequencer: DoorSequencer::new(),
            pressure: PressurizationController::new(&config),
            config,
            target: DoorSelector::None,
            tick_count: 0,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One control evaluation: read sensors → pick target → seal → cycle.
    pub fn tick(&mut self, sink: &mut impl EventSink) -> TickOutcome {
        let Some(airlock) = self.airlock.as_mut() else {
            return TickOutcome::Inert;
        };
        self.tick_count += 1;
        let prev_status = self.status.current();

        let inner_active = airlock.inner_sensor.is_active();
        let outer_active = airlock.outer_sensor.is_active();
        let target = DoorSelector::from_sensors(inner_active, outer_active);
        if target != self.target {
            sink.emit(&AirlockEvent::TargetChanged {
                from: self.target,
                to: target,
            });
            self.target = target;
        }

        let outcome = match target.side() {
            None => Self::idle(&self.sequencer, airlock, &mut self.status),
            Some(_) => Self::sequence(
                &self.sequencer,
                &self.pressure,
                target,
                airlock,
                &mut self.status,
                sink,
            ),
        };

        self.emit_status_change(prev_status, sink);
        outcome
    }

    /// Run the seal-then-cycle sequence toward `target` outside the sensor
    /// path. `DoorSelector::None` aborts with `Unknown` on the panels.
    pub fn cycle_toward(&mut self, target: DoorSelector, sink: &mut impl EventSink) -> TickOutcome {
        let Some(airlock) = self.airlock.as_mut() else {
            return TickOutcome::Inert;
        };
        let prev_status = self.status.current();
        let outcome = Self::sequence(
            &self.sequencer,
            &self.pressure,
            target,
            airlock,
            &mut self.status,
            sink,
        );
        self.emit_status_change(prev_status, sink);
        outcome
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(&mut self, cmd: AirlockCommand, sink: &mut impl EventSink) {
        match cmd {
            AirlockCommand::ForceStatus(code) => match self.status.set_status_code(code) {
                Render::Fallback { from, .. } => {
                    sink.emit(&AirlockEvent::InvalidStatusCode(code));
                    self.emit_status_change(from, sink);
                }
                Render::Rendered { from, .. } => self.emit_status_change(from, sink),
                Render::Unchanged => {}
            },
            AirlockCommand::UpdateConfig(config) => match self.accept(&config) {
                Ok(()) => {
                    self.pressure.reconfigure(&config);
                    self.config = config;
                    info!("configuration updated at runtime");
                }
                Err(e) => {
                    sink.emit(&AirlockEvent::ConfigRejected(e));
                }
            },
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_armed(&self) -> bool {
        self.airlock.is_some()
    }

    pub fn init_outcome(&self) -> &InitOutcome {
        &self.outcome
    }

    /// Status currently shown on the panels.
    pub fn status(&self) -> DisplayStatus {
        self.status.current()
    }

    pub fn status_model(&self) -> &StatusModel {
        &self.status
    }

    /// Target selected on the last tick.
    pub fn target(&self) -> DoorSelector {
        self.target
    }

    /// Ticks evaluated since startup (inert ticks excluded).
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &AirlockConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Nobody at either door: close everything, then report readiness.
    fn idle(
        sequencer: &DoorSequencer,
        airlock: &mut Airlock,
        status: &mut StatusModel,
    ) -> TickOutcome {
        if !sequencer.seal_all(airlock) {
            return TickOutcome::Idle { sealed: false };
        }
        let resting = if airlock.vent.can_pressurize() {
            DisplayStatus::Ready
        } else {
            DisplayStatus::Hazard
        };
        status.set_status(resting);
        TickOutcome::Idle { sealed: true }
    }

    fn sequence(
        sequencer: &DoorSequencer,
        pressure: &PressurizationController,
        target: DoorSelector,
        airlock: &mut Airlock,
        status: &mut StatusModel,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        let progress = match sequencer.ensure_opposite(target, airlock, status) {
            Ok(progress) => progress,
            Err(e) => {
                debug!("sequence aborted: {e}");
                sink.emit(&AirlockEvent::AmbiguousTarget);
                return TickOutcome::Aborted;
            }
        };
        let Some(side) = target.side() else {
            return TickOutcome::Aborted;
        };
        if progress == SequenceProgress::Closing {
            return TickOutcome::Sealing(side);
        }

        let was_transit = status.current() == DisplayStatus::Transit;
        match pressure.advance(side, airlock, status) {
            Action::OpenDoor => {
                if !was_transit {
                    sink.emit(&AirlockEvent::DoorOpened(side));
                }
                TickOutcome::Transit(side)
            }
            Action::Pressurizing { .. } => TickOutcome::Pressurizing(side),
            Action::Blocked => TickOutcome::Blocked(side),
        }
    }

    /// Runtime updates may retune thresholds and the tick period, but the
    /// blocks were bound at construction and cannot be renamed.
    fn accept(&self, config: &AirlockConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.names != self.config.names {
            return Err(ConfigError::ValidationFailed(
                "block names are fixed once the airlock is armed",
            ));
        }
        Ok(())
    }

    fn emit_status_change(&self, from: DisplayStatus, sink: &mut impl EventSink) {
        let to = self.status.current();
        if to != from {
            sink.emit(&AirlockEvent::StatusChanged { from, to });
        }
    }
}
