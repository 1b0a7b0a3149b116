//! Door sequencer.
//!
//! Seals the chamber before any pressurization decision is made: the door
//! opposite the target is closed first, and nothing else happens until it
//! reports `Closed`. The target door is never opened here.

use log::debug;

use crate::error::{Error, Result};
use crate::gate::Airlock;
use crate::status::{DisplayStatus, StatusModel};

use super::{DoorSelector, DoorSide};

/// Progress of the sealing step for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceProgress {
    /// The opposite door is still moving; a close was (re)issued.
    Closing,
    /// The opposite door reports `Closed`.
    Sealed,
}

#[derive(Debug, Default)]
pub struct DoorSequencer;

impl DoorSequencer {
    pub fn new() -> Self {
        Self
    }

    /// Make sure the door opposite `target` is closed.
    ///
    /// Shows `NoEntry` while it is closing. With no target selected the
    /// panels show `Unknown` and the tick's sequence is aborted.
    pub fn ensure_opposite(
        &self,
        target: DoorSelector,
        airlock: &mut Airlock,
        status: &mut StatusModel,
    ) -> Result<SequenceProgress> {
        let Some(side) = target.side() else {
            debug!("no inner/outer door specified");
            status.set_status(DisplayStatus::Unknown);
            return Err(Error::AmbiguousTarget);
        };

        let opposite = side.opposite();
        let state = airlock.door_state(opposite);
        if state.is_closed() {
            return Ok(SequenceProgress::Sealed);
        }

        debug!("{opposite} door {state:?}, closing before {side} cycle");
        status.set_status(DisplayStatus::NoEntry);
        airlock.door_mut(opposite).close();
        Ok(SequenceProgress::Closing)
    }

    /// Idle path: close every door that is not closed. Returns `true` once
    /// both report `Closed`.
    pub fn seal_all(&self, airlock: &mut Airlock) -> bool {
        let mut sealed = true;
        for side in [DoorSide::Inner, DoorSide::Outer] {
            if !airlock.door_state(side).is_closed() {
                airlock.door_mut(side).close();
                sealed = false;
            }
        }
        sealed
    }
}
