//! Application core — airlock decision logic, zero I/O.
//!
//! The orchestrator, its inbound commands and outbound events live here.
//! All interaction with doors, sensors, vent, tank and panels happens
//! through the **port traits** in [`ports`], keeping this layer testable
//! against the simulated chamber.

pub mod commands;
pub mod events;
pub mod orchestrator;
pub mod ports;
