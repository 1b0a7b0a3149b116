//! Airlock controller library.
//!
//! Sequences the two doors of a pressurized airlock so they are never open
//! together, cycles the chamber atmosphere toward the side being entered,
//! and reports the airlock state on a group of status panels.
//!
//! The control logic talks to hardware only through the port traits in
//! [`app::ports`]; [`adapters`] supplies a GPIO occupancy sensor, a log
//! event sink and an in-process simulated chamber.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod gate;
pub mod status;

pub use error::{ConfigError, Error, Result};
