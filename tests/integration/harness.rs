//! Shared rig for integration tests.
//!
//! Wraps a [`SimChamber`], an orchestrator bound to it, and a sink that
//! records every emitted event so tests can assert on the full history.

use airlock::adapters::sim::SimChamber;
use airlock::app::events::AirlockEvent;
use airlock::app::orchestrator::{AirlockOrchestrator, TickOutcome};
use airlock::app::ports::{Bindings, EventSink};
use airlock::config::AirlockConfig;

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AirlockEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AirlockEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AirlockEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub struct Rig {
    pub chamber: SimChamber,
    pub airlock: AirlockOrchestrator,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    /// Default chamber, default config, two panels.
    pub fn new() -> Self {
        Self::with_chamber(SimChamber::new())
    }

    pub fn with_chamber(chamber: SimChamber) -> Self {
        let bindings = chamber.bindings(2);
        Self::from_bindings(chamber, bindings, AirlockConfig::default())
    }

    pub fn from_bindings(chamber: SimChamber, bindings: Bindings, config: AirlockConfig) -> Self {
        let mut sink = RecordingSink::default();
        let airlock = AirlockOrchestrator::new(bindings, config, &mut sink);
        Self {
            chamber,
            airlock,
            sink,
        }
    }

    /// One control tick without moving the physical model.
    pub fn tick(&mut self) -> TickOutcome {
        self.airlock.tick(&mut self.sink)
    }

    /// One control tick followed by one physics step.
    pub fn cycle(&mut self) -> TickOutcome {
        let outcome = self.tick();
        self.chamber.step();
        outcome
    }

    /// Cycle until `done` holds or `limit` ticks pass. Returns ticks used.
    pub fn run_until(&mut self, limit: usize, done: impl Fn(&Self, TickOutcome) -> bool) -> Option<usize> {
        for n in 1..=limit {
            let outcome = self.cycle();
            if done(self, outcome) {
                return Some(n);
            }
        }
        None
    }
}
