//! Port traits — the hexagonal boundary between airlock logic and the blocks
//! it drives.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AirlockOrchestrator (domain)
//! ```
//!
//! Every command is fire-and-forget: the only acknowledgement a door or vent
//! gives is what a later status read reports. Reads are instantaneous and
//! reflect live physical state, so the core never caches them across ticks.

use super::events::AirlockEvent;

// ───────────────────────────────────────────────────────────────
// Door
// ───────────────────────────────────────────────────────────────

/// Physical state reported by a door. Not owned by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Open,
    Opening,
    Closed,
    Closing,
}

impl DoorState {
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

pub trait Door {
    fn status(&self) -> DoorState;

    /// Start opening. Issuing it on an opening/open door is a no-op.
    fn open(&mut self);

    /// Start closing. Issuing it on a closing/closed door is a no-op.
    fn close(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Occupancy sensor
// ───────────────────────────────────────────────────────────────

pub trait Sensor {
    /// `true` while someone is standing in the sensor's field.
    fn is_active(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Air vent and oxygen tank
// ───────────────────────────────────────────────────────────────

pub trait Vent {
    /// `false` when the chamber is not airtight and cannot hold atmosphere.
    fn can_pressurize(&self) -> bool;

    /// Chamber oxygen as a fraction in `[0, 1]`.
    fn oxygen_level(&self) -> f32;

    /// `true` pumps chamber air into the tank, `false` releases it back.
    fn set_depressurizing(&mut self, on: bool);
}

pub trait Tank {
    /// Fill level as a fraction in `[0, 1]`.
    fn filled_ratio(&self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Status panel
// ───────────────────────────────────────────────────────────────

/// A status panel. Zero or more are attached; none is required.
pub trait Display {
    /// Switch the panel to glyph mode showing `label`.
    fn show_status(&mut self, label: &str);

    /// Switch the panel to text mode. `append` adds to the current text.
    fn show_text(&mut self, text: &str, append: bool);

    /// Write the panel's public title. Called once at startup.
    fn set_title(&mut self, _title: &str) {}
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The orchestrator emits structured [`AirlockEvent`]s through this port.
/// Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AirlockEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AirlockEvent) {}
}

// ───────────────────────────────────────────────────────────────
// Bindings
// ───────────────────────────────────────────────────────────────

/// Collaborators handed over by the discovery layer. `None` means the
/// block was not found.
#[derive(Default)]
pub struct Bindings {
    pub inner_door: Option<Box<dyn Door>>,
    pub outer_door: Option<Box<dyn Door>>,
    pub inner_sensor: Option<Box<dyn Sensor>>,
    pub outer_sensor: Option<Box<dyn Sensor>>,
    pub vent: Option<Box<dyn Vent>>,
    pub tank: Option<Box<dyn Tank>>,
    /// `None` when the panel group itself is missing; an empty vector is a
    /// group with no panels in it.
    pub displays: Option<Vec<Box<dyn Display>>>,
}
