//! Airlock simulator — Main Entry Point
//!
//! Drives the airlock controller against the in-process simulated chamber,
//! standing in for the external scheduler that calls `tick()` in a real
//! deployment.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Scenario script ──▶ SimChamber sensors                  │
//! │                                                          │
//! │  loop {                                                  │
//! │      orchestrator.tick(&mut LogEventSink)                │
//! │      chamber.step()          // doors travel, vent moves │
//! │  }                                                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Logging goes through `tracing-subscriber`; the library's `log` records
//! are picked up by its log bridge. Set `RUST_LOG=debug` for door traces.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use tracing_subscriber::EnvFilter;

use airlock::adapters::log_sink::LogEventSink;
use airlock::adapters::sim::SimChamber;
use airlock::app::commands::AirlockCommand;
use airlock::app::orchestrator::{AirlockOrchestrator, TickOutcome};
use airlock::app::ports::DoorState;
use airlock::config::AirlockConfig;
use airlock::control::DoorSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Walk in from space: outer door, cycle, inner door.
    Enter,
    /// Walk out to space: inner door, cycle, outer door.
    Exit,
    /// Nobody around; the airlock seals and rests.
    Idle,
}

#[derive(Parser, Debug)]
#[command(name = "airlock-sim", about = "Run the airlock controller against a simulated chamber")]
struct Args {
    /// Scripted traffic through the airlock.
    #[arg(long, value_enum, default_value = "enter")]
    scenario: Scenario,

    /// Number of control ticks to run.
    #[arg(long, default_value_t = 40)]
    ticks: u32,

    /// JSON config file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulate a hull breach (vent cannot hold pressure).
    #[arg(long)]
    leak: bool,

    /// Oxygen fraction the vent moves per tick.
    #[arg(long, default_value_t = 0.25)]
    vent_rate: f32,

    /// Raw status code forced onto the panels before the first tick.
    #[arg(long, allow_hyphen_values = true)]
    force_status: Option<i8>,

    /// Sleep `tick_interval_ms` between ticks.
    #[arg(long)]
    realtime: bool,
}

/// Which sensor the scripted crew member is standing at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walker {
    At(DoorSide),
    Through,
}

impl Walker {
    fn start(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Enter => Self::At(DoorSide::Outer),
            Scenario::Exit => Self::At(DoorSide::Inner),
            Scenario::Idle => Self::Through,
        }
    }

    /// Step through a door once it is fully open.
    fn advance(self, scenario: Scenario, chamber: &SimChamber) -> Self {
        let Self::At(side) = self else {
            return self;
        };
        if chamber.door(side) != DoorState::Open {
            return self;
        }
        let last = match scenario {
            Scenario::Enter => DoorSide::Inner,
            _ => DoorSide::Outer,
        };
        if side == last {
            Self::Through
        } else {
            Self::At(side.opposite())
        }
    }

    fn apply(self, chamber: &SimChamber) {
        for side in [DoorSide::Inner, DoorSide::Outer] {
            chamber.set_sensor(side, self == Self::At(side));
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AirlockConfig> {
    let Some(path) = path else {
        return Ok(AirlockConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    AirlockConfig::from_json(&raw).with_context(|| format!("loading config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let chamber = SimChamber::new().with_vent_rate(args.vent_rate);
    chamber.set_leak(args.leak);
    match args.scenario {
        // Crew arrives from space: chamber starts at station pressure.
        Scenario::Enter => {
            chamber.set_oxygen(1.0);
            chamber.set_tank(0.5);
        }
        // Crew leaves the station: chamber was last left at vacuum.
        Scenario::Exit => {
            chamber.set_oxygen(0.0);
            chamber.set_tank(1.0);
        }
        Scenario::Idle => {
            chamber.set_door(DoorSide::Inner, DoorState::Open);
        }
    }

    let mut sink = LogEventSink::new();
    let mut airlock = AirlockOrchestrator::new(chamber.bindings(2), config, &mut sink);
    airlock
        .init_outcome()
        .check()
        .context("airlock failed to initialize")?;
    if let Some(code) = args.force_status {
        airlock.handle_command(AirlockCommand::ForceStatus(code), &mut sink);
    }

    let mut walker = Walker::start(args.scenario);
    for n in 1..=args.ticks {
        walker.apply(&chamber);
        let outcome = airlock.tick(&mut sink);
        chamber.step();
        info!(
            "tick {:>3} | {:?} | O2 {:>5.1}% tank {:>5.1}% | {} / {:?}",
            n,
            outcome,
            chamber.oxygen() * 100.0,
            chamber.tank() * 100.0,
            airlock.status(),
            airlock.target(),
        );
        walker = walker.advance(args.scenario, &chamber);

        if walker == Walker::Through && outcome == (TickOutcome::Idle { sealed: true }) {
            info!("airlock at rest after {} ticks", n);
            break;
        }
        if args.realtime {
            let period = airlock.config().tick_interval_ms;
            std::thread::sleep(Duration::from_millis(u64::from(period)));
        }
    }

    info!(
        "done | status {} | {} panel write(s) | {} unsafe open(s)",
        airlock.status(),
        chamber.total_panel_writes(),
        chamber.unsafe_opens()
    );
    Ok(())
}
