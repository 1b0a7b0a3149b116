//! Initialization gate.
//!
//! Runs exactly once, when the orchestrator is constructed. Every required
//! collaborator must be bound or the airlock stays inert for the lifetime of
//! the process: there is no re-validation and no hot re-attachment. A missing
//! panel group is reported but never blocks arming.
//!
//! Findings are only traced here; the orchestrator turns them into events,
//! which is where they get reported.

use core::fmt;

use log::debug;

use crate::app::ports::{Bindings, Door, DoorState, Sensor, Tank, Vent};
use crate::config::BlockNames;
use crate::control::DoorSide;
use crate::error::{Error, Result};
use crate::status::Panels;

/// The required collaborators, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    InnerDoor,
    OuterDoor,
    InnerSensor,
    OuterSensor,
    Vent,
    Tank,
}

impl Capability {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::InnerDoor,
        Self::OuterDoor,
        Self::InnerSensor,
        Self::OuterSensor,
        Self::Vent,
        Self::Tank,
    ];

    /// The configured block name for this capability.
    pub fn block_name(self, names: &BlockNames) -> &str {
        match self {
            Self::InnerDoor => &names.inner_door,
            Self::OuterDoor => &names.outer_door,
            Self::InnerSensor => &names.inner_sensor,
            Self::OuterSensor => &names.outer_sensor,
            Self::Vent => &names.vent,
            Self::Tank => &names.tank,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InnerDoor => "inner door",
            Self::OuterDoor => "outer door",
            Self::InnerSensor => "inner sensor",
            Self::OuterSensor => "outer sensor",
            Self::Vent => "vent",
            Self::Tank => "tank",
        };
        f.write_str(s)
    }
}

/// Result of the one-shot startup check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitOutcome {
    missing: heapless::Vec<Capability, { Capability::COUNT }>,
    displays_missing: bool,
}

impl InitOutcome {
    /// `true` when every required collaborator was bound.
    pub fn ok(&self) -> bool {
        self.missing.is_empty()
    }

    /// Required collaborators that were not bound, each listed once.
    pub fn missing(&self) -> &[Capability] {
        &self.missing
    }

    /// `true` when the panel group was not found (non-fatal).
    pub fn displays_missing(&self) -> bool {
        self.displays_missing
    }

    /// First missing collaborator as an error, for callers that bail.
    pub fn check(&self) -> Result<()> {
        match self.missing.first() {
            Some(capability) => Err(Error::MissingCapability(*capability)),
            None => Ok(()),
        }
    }
}

/// The armed set of required collaborators.
pub struct Airlock {
    pub inner_door: Box<dyn Door>,
    pub outer_door: Box<dyn Door>,
    pub inner_sensor: Box<dyn Sensor>,
    pub outer_sensor: Box<dyn Sensor>,
    pub vent: Box<dyn Vent>,
    pub tank: Box<dyn Tank>,
}

impl Airlock {
    pub fn door(&self, side: DoorSide) -> &dyn Door {
        match side {
            DoorSide::Inner => self.inner_door.as_ref(),
            DoorSide::Outer => self.outer_door.as_ref(),
        }
    }

    pub fn door_mut(&mut self, side: DoorSide) -> &mut dyn Door {
        match side {
            DoorSide::Inner => self.inner_door.as_mut(),
            DoorSide::Outer => self.outer_door.as_mut(),
        }
    }

    pub fn door_state(&self, side: DoorSide) -> DoorState {
        self.door(side).status()
    }
}

/// Check the bindings. Returns the outcome, the armed collaborators when
/// nothing required is missing, and the panels (if the group was found).
pub fn arm(
    bindings: Bindings,
    names: &BlockNames,
) -> (InitOutcome, Option<Airlock>, Panels) {
    let Bindings {
        inner_door,
        outer_door,
        inner_sensor,
        outer_sensor,
        vent,
        tank,
        displays,
    } = bindings;

    let mut outcome = InitOutcome::default();
    let present = [
        inner_door.is_some(),
        outer_door.is_some(),
        inner_sensor.is_some(),
        outer_sensor.is_some(),
        vent.is_some(),
        tank.is_some(),
    ];
    for (capability, found) in Capability::ALL.into_iter().zip(present) {
        if !found {
            debug!("\"{}\" not found", capability.block_name(names));
            // Capacity equals the number of capabilities; push cannot fail.
            let _ = outcome.missing.push(capability);
        }
    }

    let mut panels = displays.unwrap_or_else(|| {
        debug!("no screen group \"{}\" found", names.display_group);
        outcome.displays_missing = true;
        Panels::new()
    });
    for panel in &mut panels {
        panel.set_title(&names.panel_title);
    }

    let airlock = match (inner_door, outer_door, inner_sensor, outer_sensor, vent, tank) {
        (
            Some(inner_door),
            Some(outer_door),
            Some(inner_sensor),
            Some(outer_sensor),
            Some(vent),
            Some(tank),
        ) => {
            debug!("initialization complete, {} panel(s) attached", panels.len());
            Some(Airlock {
                inner_door,
                outer_door,
                inner_sensor,
                outer_sensor,
                vent,
                tank,
            })
        }
        _ => {
            debug!(
                "initialization failed: {} required block(s) missing, airlock halted",
                outcome.missing.len()
            );
            None
        }
    };

    (outcome, airlock, panels)
}
