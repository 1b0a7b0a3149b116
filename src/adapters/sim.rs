//! In-process simulated airlock chamber.
//!
//! [`SimChamber`] models both doors, both occupancy sensors, the vent, the
//! oxygen tank and any number of panels around one shared physical state.
//! Every command the controller issues is recorded, so the full stack can
//! run in tests and in the `airlock-sim` binary without real blocks.
//!
//! ## Physics (one [`SimChamber::step`] per tick)
//!
//! - Doors travel in one step: `Opening → Open`, `Closing → Closed`.
//! - Outer door not closed: the chamber vents to space (oxygen 0).
//! - Inner door not closed: the chamber equalizes with the station (oxygen 1).
//! - Sealed: the vent moves up to `vent_rate` of oxygen per step between
//!   chamber and tank, limited by what the tank can take or give.
//! - The vent can pressurize unless the outer door is open or a leak is set.

use std::cell::RefCell;
use std::rc::Rc;

use crate::app::ports::{Bindings, Display, Door, DoorState, Sensor, Tank, Vent};
use crate::control::DoorSide;

/// A command issued to a simulated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open(DoorSide),
    Close(DoorSide),
    Depressurize(bool),
}

/// A write to a simulated panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelWrite {
    Status(String),
    Text { text: String, append: bool },
    Title(String),
}

/// Tank fraction exchanged per unit of chamber oxygen moved.
const TANK_PER_OXYGEN: f32 = 0.5;

struct ChamberState {
    inner_door: DoorState,
    outer_door: DoorState,
    inner_sensor: bool,
    outer_sensor: bool,
    oxygen: f32,
    tank: f32,
    depressurizing: bool,
    leak: bool,
    vent_rate: f32,
    commands: Vec<Command>,
    /// Opens commanded while the opposite door was not closed.
    unsafe_opens: usize,
    panels: Vec<Vec<PanelWrite>>,
}

impl ChamberState {
    fn door(&self, side: DoorSide) -> DoorState {
        match side {
            DoorSide::Inner => self.inner_door,
            DoorSide::Outer => self.outer_door,
        }
    }

    fn door_mut(&mut self, side: DoorSide) -> &mut DoorState {
        match side {
            DoorSide::Inner => &mut self.inner_door,
            DoorSide::Outer => &mut self.outer_door,
        }
    }
}

/// Shared handle on the simulated chamber. Cloning shares the same state.
#[derive(Clone)]
pub struct SimChamber {
    state: Rc<RefCell<ChamberState>>,
}

impl SimChamber {
    /// Both doors closed, full atmosphere, tank half full, vent airtight.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ChamberState {
                inner_door: DoorState::Closed,
                outer_door: DoorState::Closed,
                inner_sensor: false,
                outer_sensor: false,
                oxygen: 1.0,
                tank: 0.5,
                depressurizing: false,
                leak: false,
                vent_rate: 0.25,
                commands: Vec::new(),
                unsafe_opens: 0,
                panels: Vec::new(),
            })),
        }
    }

    /// Oxygen fraction the vent can move per step.
    pub fn with_vent_rate(self, rate: f32) -> Self {
        self.state.borrow_mut().vent_rate = rate;
        self
    }

    /// Handles for every required block plus `panels` status panels.
    pub fn bindings(&self, panels: usize) -> Bindings {
        let displays: Vec<Box<dyn Display>> = (0..panels)
            .map(|_| {
                let index = {
                    let mut s = self.state.borrow_mut();
                    s.panels.push(Vec::new());
                    s.panels.len() - 1
                };
                let panel = SimPanel {
                    state: self.state.clone(),
                    index,
                };
                Box::new(panel) as Box<dyn Display>
            })
            .collect();
        Bindings {
            inner_door: Some(Box::new(SimDoor::new(self, DoorSide::Inner))),
            outer_door: Some(Box::new(SimDoor::new(self, DoorSide::Outer))),
            inner_sensor: Some(Box::new(SimSensor::new(self, DoorSide::Inner))),
            outer_sensor: Some(Box::new(SimSensor::new(self, DoorSide::Outer))),
            vent: Some(Box::new(SimVent {
                state: self.state.clone(),
            })),
            tank: Some(Box::new(SimTank {
                state: self.state.clone(),
            })),
            displays: Some(displays),
        }
    }

    // ── Scenario setup ────────────────────────────────────────

    pub fn set_door(&self, side: DoorSide, door: DoorState) {
        *self.state.borrow_mut().door_mut(side) = door;
    }

    pub fn set_sensor(&self, side: DoorSide, active: bool) {
        let mut s = self.state.borrow_mut();
        match side {
            DoorSide::Inner => s.inner_sensor = active,
            DoorSide::Outer => s.outer_sensor = active,
        }
    }

    pub fn set_oxygen(&self, level: f32) {
        self.state.borrow_mut().oxygen = level;
    }

    pub fn set_tank(&self, ratio: f32) {
        self.state.borrow_mut().tank = ratio;
    }

    /// A leak keeps the chamber from holding pressure.
    pub fn set_leak(&self, leak: bool) {
        self.state.borrow_mut().leak = leak;
    }

    // ── Observation ───────────────────────────────────────────

    pub fn door(&self, side: DoorSide) -> DoorState {
        self.state.borrow().door(side)
    }

    pub fn oxygen(&self) -> f32 {
        self.state.borrow().oxygen
    }

    pub fn tank(&self) -> f32 {
        self.state.borrow().tank
    }

    pub fn depressurizing(&self) -> bool {
        self.state.borrow().depressurizing
    }

    pub fn commands(&self) -> Vec<Command> {
        self.state.borrow().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Door-open commands issued while the opposite door was not closed.
    pub fn unsafe_opens(&self) -> usize {
        self.state.borrow().unsafe_opens
    }

    pub fn panel_writes(&self, index: usize) -> Vec<PanelWrite> {
        self.state
            .borrow()
            .panels
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    /// Status and text writes across all panels (titles excluded).
    pub fn total_panel_writes(&self) -> usize {
        self.state
            .borrow()
            .panels
            .iter()
            .flatten()
            .filter(|w| !matches!(w, PanelWrite::Title(_)))
            .count()
    }

    // ── Physics ───────────────────────────────────────────────

    /// Advance the physical model by one tick.
    pub fn step(&self) {
        let mut s = self.state.borrow_mut();

        if !s.outer_door.is_closed() {
            s.oxygen = 0.0;
        } else if !s.inner_door.is_closed() {
            s.oxygen = 1.0;
        } else if s.leak {
            s.oxygen = (s.oxygen - s.vent_rate).max(0.0);
        } else if s.depressurizing {
            let room = (1.0 - s.tank) / TANK_PER_OXYGEN;
            let moved = s.vent_rate.min(s.oxygen).min(room).max(0.0);
            s.oxygen -= moved;
            s.tank = (s.tank + moved * TANK_PER_OXYGEN).min(1.0);
        } else {
            let stock = s.tank / TANK_PER_OXYGEN;
            let moved = s.vent_rate.min(1.0 - s.oxygen).min(stock).max(0.0);
            s.oxygen += moved;
            s.tank = (s.tank - moved * TANK_PER_OXYGEN).max(0.0);
        }

        for side in [DoorSide::Inner, DoorSide::Outer] {
            let door = s.door_mut(side);
            *door = match *door {
                DoorState::Opening => DoorState::Open,
                DoorState::Closing => DoorState::Closed,
                settled => settled,
            };
        }
    }
}

impl Default for SimChamber {
    fn default() -> Self {
        Self::new()
    }
}

// ── Block handles ─────────────────────────────────────────────

struct SimDoor {
    state: Rc<RefCell<ChamberState>>,
    side: DoorSide,
}

impl SimDoor {
    fn new(chamber: &SimChamber, side: DoorSide) -> Self {
        Self {
            state: chamber.state.clone(),
            side,
        }
    }
}

impl Door for SimDoor {
    fn status(&self) -> DoorState {
        self.state.borrow().door(self.side)
    }

    fn open(&mut self) {
        let mut s = self.state.borrow_mut();
        s.commands.push(Command::Open(self.side));
        if !s.door(self.side.opposite()).is_closed() {
            s.unsafe_opens += 1;
        }
        let door = s.door_mut(self.side);
        if matches!(*door, DoorState::Closed | DoorState::Closing) {
            *door = DoorState::Opening;
        }
    }

    fn close(&mut self) {
        let mut s = self.state.borrow_mut();
        s.commands.push(Command::Close(self.side));
        let door = s.door_mut(self.side);
        if matches!(*door, DoorState::Open | DoorState::Opening) {
            *door = DoorState::Closing;
        }
    }
}

struct SimSensor {
    state: Rc<RefCell<ChamberState>>,
    side: DoorSide,
}

impl SimSensor {
    fn new(chamber: &SimChamber, side: DoorSide) -> Self {
        Self {
            state: chamber.state.clone(),
            side,
        }
    }
}

impl Sensor for SimSensor {
    fn is_active(&mut self) -> bool {
        let s = self.state.borrow();
        match self.side {
            DoorSide::Inner => s.inner_sensor,
            DoorSide::Outer => s.outer_sensor,
        }
    }
}

struct SimVent {
    state: Rc<RefCell<ChamberState>>,
}

impl Vent for SimVent {
    fn can_pressurize(&self) -> bool {
        let s = self.state.borrow();
        !s.leak && s.outer_door.is_closed()
    }

    fn oxygen_level(&self) -> f32 {
        self.state.borrow().oxygen
    }

    fn set_depressurizing(&mut self, on: bool) {
        let mut s = self.state.borrow_mut();
        s.commands.push(Command::Depressurize(on));
        s.depressurizing = on;
    }
}

struct SimTank {
    state: Rc<RefCell<ChamberState>>,
}

impl Tank for SimTank {
    fn filled_ratio(&self) -> f32 {
        self.state.borrow().tank
    }
}

struct SimPanel {
    state: Rc<RefCell<ChamberState>>,
    index: usize,
}

impl SimPanel {
    fn record(&self, write: PanelWrite) {
        if let Some(log) = self.state.borrow_mut().panels.get_mut(self.index) {
            log.push(write);
        }
    }
}

impl Display for SimPanel {
    fn show_status(&mut self, label: &str) {
        self.record(PanelWrite::Status(label.into()));
    }

    fn show_text(&mut self, text: &str, append: bool) {
        self.record(PanelWrite::Text {
            text: text.into(),
            append,
        });
    }

    fn set_title(&mut self, title: &str) {
        self.record(PanelWrite::Title(title.into()));
    }
}
