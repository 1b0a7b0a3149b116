//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements                          | Connects to              |
//! |--------------|-------------------------------------|--------------------------|
//! | `log_sink`   | EventSink                           | `log` facade             |
//! | `pin_sensor` | Sensor                              | embedded-hal digital pin |
//! | `sim`        | Door · Sensor · Vent · Tank · Display | In-process chamber model |

pub mod log_sink;
pub mod pin_sensor;
pub mod sim;
