//! Occupancy sensor on a digital input.
//!
//! Wraps any `embedded_hal::digital::InputPin` (presence switch, light
//! barrier, PIR output). Polarity is configurable since most barriers pull
//! low when interrupted.
//!
//! A failed pin read is logged and reported as "nobody there": an inactive
//! sensor only ever leads to the idle path, which closes both doors.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::Sensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

pub struct PinSensor<P> {
    pin: P,
    polarity: Polarity,
    last_read_failed: bool,
    fault_runs: u32,
}

impl<P: InputPin> PinSensor<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            last_read_failed: false,
            fault_runs: 0,
        }
    }

    /// Runs of consecutive failed reads seen so far.
    pub fn fault_runs(&self) -> u32 {
        self.fault_runs
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Sensor for PinSensor<P> {
    fn is_active(&mut self) -> bool {
        let level = match self.polarity {
            Polarity::ActiveHigh => self.pin.is_high(),
            Polarity::ActiveLow => self.pin.is_low(),
        };
        match level {
            Ok(active) => {
                self.last_read_failed = false;
                active
            }
            Err(e) => {
                // Only log the first failure of a run.
                if !self.last_read_failed {
                    warn!("occupancy pin read failed: {:?}", e);
                    self.fault_runs += 1;
                }
                self.last_read_failed = true;
                false
            }
        }
    }
}
