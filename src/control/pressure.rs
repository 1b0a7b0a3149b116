//! Pressurization controller.
//!
//! Runs only once the chamber is sealed. Each call samples the atmosphere
//! fresh, decides whether the target door may open, and otherwise drives the
//! vent toward the atmosphere the target side needs:
//!
//! | Target | Ready when                                  | Vent while waiting |
//! |--------|---------------------------------------------|--------------------|
//! | Outer  | `oxygen <= vacuum_oxygen_max` or `tank >= vacuum_tank_min`      | depressurize |
//! | Inner  | `oxygen >= atmosphere_oxygen_min` or `tank <= atmosphere_tank_max` | repressurize |
//!
//! The tank conditions let the cycle finish when the vent's oxygen reading
//! stalls just short of its limit. There is no timeout: the wait is bounded
//! only by vent throughput across ticks.
//!
//! A call issues at most one vent-mode command and at most one door-open
//! command. Doors are never closed here.

use core::fmt::Write;

use log::{debug, warn};

use crate::app::ports::{Tank, Vent};
use crate::config::AirlockConfig;
use crate::gate::Airlock;
use crate::status::{DisplayStatus, StatusModel};

use super::DoorSide;

/// Progress line shown on the panels while cycling.
pub type ProgressText = heapless::String<32>;

/// Live atmosphere sample. Never cached across decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereReading {
    /// Chamber oxygen fraction.
    pub oxygen_level: f32,
    /// Tank fill fraction.
    pub tank_filled: f32,
}

impl AtmosphereReading {
    pub fn sample(vent: &dyn Vent, tank: &dyn Tank) -> Self {
        Self {
            oxygen_level: vent.oxygen_level().clamp(0.0, 1.0),
            tank_filled: tank.filled_ratio().clamp(0.0, 1.0),
        }
    }
}

/// Decision for one sealed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Atmosphere matches the target side: show `Transit` and open it.
    OpenDoor,
    /// Still cycling. `depressurize` is the vent mode to command.
    Pressurizing {
        depressurize: bool,
        progress: ProgressText,
    },
    /// Chamber is not airtight: show `Hazard`, command nothing.
    Blocked,
}

#[derive(Debug, Clone)]
pub struct PressurizationController {
    vacuum_oxygen_max: f32,
    vacuum_tank_min: f32,
    atmosphere_oxygen_min: f32,
    atmosphere_tank_max: f32,
}

impl PressurizationController {
    pub fn new(config: &AirlockConfig) -> Self {
        Self {
            vacuum_oxygen_max: config.vacuum_oxygen_max,
            vacuum_tank_min: config.vacuum_tank_min,
            atmosphere_oxygen_min: config.atmosphere_oxygen_min,
            atmosphere_tank_max: config.atmosphere_tank_max,
        }
    }

    /// Pick up new thresholds after a config reload.
    pub fn reconfigure(&mut self, config: &AirlockConfig) {
        *self = Self::new(config);
    }

    /// Readiness threshold for opening `target`. Both comparisons are
    /// inclusive.
    pub fn is_ready(&self, target: DoorSide, reading: AtmosphereReading) -> bool {
        match target {
            DoorSide::Outer => {
                reading.oxygen_level <= self.vacuum_oxygen_max
                    || reading.tank_filled >= self.vacuum_tank_min
            }
            DoorSide::Inner => {
                reading.oxygen_level >= self.atmosphere_oxygen_min
                    || reading.tank_filled <= self.atmosphere_tank_max
            }
        }
    }

    /// Pure decision from the current readings.
    pub fn decide(
        &self,
        target: DoorSide,
        can_pressurize: bool,
        reading: AtmosphereReading,
    ) -> Action {
        if !can_pressurize {
            return Action::Blocked;
        }
        if self.is_ready(target, reading) {
            return Action::OpenDoor;
        }
        let (depressurize, verb) = match target {
            DoorSide::Outer => (true, "Depressurizing"),
            DoorSide::Inner => (false, "Pressurizing"),
        };
        let mut progress = ProgressText::new();
        // Longest line is "Depressurizing...\n100.0%", well under capacity.
        let _ = write!(progress, "{verb}...\n{:.1}%", reading.oxygen_level * 100.0);
        Action::Pressurizing {
            depressurize,
            progress,
        }
    }

    /// Sample, decide and apply one step toward opening `target`.
    pub fn advance(
        &self,
        target: DoorSide,
        airlock: &mut Airlock,
        status: &mut StatusModel,
    ) -> Action {
        let can_pressurize = airlock.vent.can_pressurize();
        let reading = AtmosphereReading::sample(airlock.vent.as_ref(), airlock.tank.as_ref());
        let action = self.decide(target, can_pressurize, reading);

        match &action {
            Action::OpenDoor => {
                if status.current() != DisplayStatus::Transit {
                    debug!(
                        "{target} side ready (O2 {:.1}%, tank {:.1}%), opening",
                        reading.oxygen_level * 100.0,
                        reading.tank_filled * 100.0
                    );
                }
                status.set_status(DisplayStatus::Transit);
                airlock.door_mut(target).open();
            }
            Action::Pressurizing {
                depressurize,
                progress,
            } => {
                status.set_text(progress, false);
                airlock.vent.set_depressurizing(*depressurize);
            }
            Action::Blocked => {
                if status.current() != DisplayStatus::Hazard {
                    warn!("chamber cannot hold pressure, holding {target} door shut");
                }
                status.set_status(DisplayStatus::Hazard);
            }
        }
        action
    }
}
