//! Door sequencing and pressurization decisions.
//!
//! ```text
//!  sensors ──▶ DoorSelector ──▶ DoorSequencer ──[Sealed]──▶ PressurizationController
//!                                     │                              │
//!                                 [Closing]              OpenDoor · Pressurizing · Blocked
//!                                     ▼                              ▼
//!                                  NoEntry              Transit · progress text · Hazard
//! ```

pub mod pressure;
pub mod sequencer;

use core::fmt;

/// One of the two airlock doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorSide {
    /// Faces the pressurized station.
    Inner,
    /// Faces vacuum.
    Outer,
}

impl DoorSide {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Inner => Self::Outer,
            Self::Outer => Self::Inner,
        }
    }
}

impl fmt::Display for DoorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
        })
    }
}

/// The door chosen as open-target for a tick, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorSelector {
    Inner,
    Outer,
    None,
}

impl DoorSelector {
    /// Priority rule: someone already at the inner door wins over the outer.
    pub fn from_sensors(inner_active: bool, outer_active: bool) -> Self {
        if inner_active {
            Self::Inner
        } else if outer_active {
            Self::Outer
        } else {
            Self::None
        }
    }

    pub const fn side(self) -> Option<DoorSide> {
        match self {
            Self::Inner => Some(DoorSide::Inner),
            Self::Outer => Some(DoorSide::Outer),
            Self::None => None,
        }
    }
}

impl From<DoorSide> for DoorSelector {
    fn from(side: DoorSide) -> Self {
        match side {
            DoorSide::Inner => Self::Inner,
            DoorSide::Outer => Self::Outer,
        }
    }
}
