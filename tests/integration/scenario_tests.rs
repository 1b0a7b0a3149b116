//! Door-sequencing and pressurization scenarios, one tick at a time.
//!
//! Each test sets up the chamber, runs the orchestrator, and asserts on the
//! exact commands the simulated blocks received.

use airlock::adapters::sim::{Command, PanelWrite, SimChamber};
use airlock::app::commands::AirlockCommand;
use airlock::app::events::AirlockEvent;
use airlock::app::orchestrator::TickOutcome;
use airlock::app::ports::DoorState;
use airlock::control::{DoorSelector, DoorSide};
use airlock::status::DisplayStatus;

use super::harness::Rig;

fn opened(commands: &[Command]) -> bool {
    commands.iter().any(|c| matches!(c, Command::Open(_)))
}

// ── Idle path ─────────────────────────────────────────────────

#[test]
fn idle_closes_both_open_doors_then_shows_ready() {
    let chamber = SimChamber::new();
    chamber.set_door(DoorSide::Inner, DoorState::Open);
    chamber.set_door(DoorSide::Outer, DoorState::Open);
    let mut rig = Rig::with_chamber(chamber);

    assert_eq!(rig.cycle(), TickOutcome::Idle { sealed: false });
    assert_eq!(
        rig.chamber.commands(),
        vec![Command::Close(DoorSide::Inner), Command::Close(DoorSide::Outer)]
    );
    assert_eq!(rig.chamber.door(DoorSide::Inner), DoorState::Closed);
    assert_eq!(rig.chamber.door(DoorSide::Outer), DoorState::Closed);

    assert_eq!(rig.tick(), TickOutcome::Idle { sealed: true });
    assert_eq!(rig.airlock.status(), DisplayStatus::Ready);
}

#[test]
fn idle_sealed_but_leaking_shows_hazard() {
    let chamber = SimChamber::new();
    chamber.set_leak(true);
    let mut rig = Rig::with_chamber(chamber);
    assert_eq!(rig.tick(), TickOutcome::Idle { sealed: true });
    assert_eq!(rig.airlock.status(), DisplayStatus::Hazard);
    assert!(rig.chamber.commands().is_empty());
}

// ── Sealing ───────────────────────────────────────────────────

#[test]
fn outer_request_closes_inner_door_first() {
    let chamber = SimChamber::new();
    chamber.set_door(DoorSide::Inner, DoorState::Open);
    chamber.set_sensor(DoorSide::Outer, true);
    let mut rig = Rig::with_chamber(chamber);

    assert_eq!(rig.tick(), TickOutcome::Sealing(DoorSide::Outer));
    assert_eq!(rig.chamber.commands(), vec![Command::Close(DoorSide::Inner)]);
    assert_eq!(rig.airlock.status(), DisplayStatus::NoEntry);

    // Door still moving: close is reissued, outer door left alone.
    assert_eq!(rig.cycle(), TickOutcome::Sealing(DoorSide::Outer));
    assert_eq!(rig.chamber.door(DoorSide::Outer), DoorState::Closed);
    assert!(!opened(&rig.chamber.commands()));

    // Inner now closed: the cycle starts, still no door opened.
    assert_eq!(rig.tick(), TickOutcome::Pressurizing(DoorSide::Outer));
    assert!(!opened(&rig.chamber.commands()));
}

#[test]
fn inner_sensor_wins_when_both_active() {
    let chamber = SimChamber::new();
    chamber.set_door(DoorSide::Outer, DoorState::Open);
    chamber.set_sensor(DoorSide::Inner, true);
    chamber.set_sensor(DoorSide::Outer, true);
    let mut rig = Rig::with_chamber(chamber);

    assert_eq!(rig.tick(), TickOutcome::Sealing(DoorSide::Inner));
    assert_eq!(rig.airlock.target(), DoorSelector::Inner);
    assert_eq!(rig.chamber.commands(), vec![Command::Close(DoorSide::Outer)]);
}

// ── Pressurization ────────────────────────────────────────────

#[test]
fn outer_not_ready_depressurizes_without_opening() {
    let chamber = SimChamber::new();
    chamber.set_sensor(DoorSide::Outer, true);
    chamber.set_oxygen(0.5);
    chamber.set_tank(0.5);
    let mut rig = Rig::with_chamber(chamber);

    assert_eq!(rig.tick(), TickOutcome::Pressurizing(DoorSide::Outer));
    assert_eq!(rig.chamber.commands(), vec![Command::Depressurize(true)]);
    assert_eq!(rig.airlock.status(), DisplayStatus::Unknown);
    assert_eq!(
        rig.chamber.panel_writes(0).last(),
        Some(&PanelWrite::Text {
            text: "Depressurizing...\n50.0%".into(),
            append: false
        })
    );
}

#[test]
fn outer_at_vacuum_opens_with_transit() {
    let chamber = SimChamber::new();
    chamber.set_sensor(DoorSide::Outer, true);
    chamber.set_oxygen(0.0005);
    let mut rig = Rig::with_chamber(chamber);

    assert_eq!(rig.tick(), TickOutcome::Transit(DoorSide::Outer));
    assert_eq!(rig.chamber.commands(), vec![Command::Open(DoorSide::Outer)]);
    assert_eq!(rig.airlock.status(), DisplayStatus::Transit);

    rig.tick();
    assert_eq!(
        rig.sink
            .count(|e| *e == AirlockEvent::DoorOpened(DoorSide::Outer)),
        1
    );
}

#[test]
fn full_tank_counts_as_vacuum() {
    let chamber = SimChamber::new();
    chamber.set_sensor(DoorSide::Outer, true);
    chamber.set_oxygen(0.2);
    chamber.set_tank(0.999);
    let mut rig = Rig::with_chamber(chamber);
    assert_eq!(rig.tick(), TickOutcome::Transit(DoorSide::Outer));
}

#[test]
fn inner_not_ready_repressurizes() {
    let chamber = SimChamber::new();
    chamber.set_sensor(DoorSide::Inner, true);
    chamber.set_oxygen(0.25);
    let mut rig = Rig::with_chamber(chamber);

    assert_eq!(rig.tick(), TickOutcome::Pressurizing(DoorSide::Inner));
    assert_eq!(rig.chamber.commands(), vec![Command::Depressurize(false)]);
}

#[test]
fn leak_mid_sequence_blocks_every_open() {
    let chamber = SimChamber::new();
    chamber.set_sensor(DoorSide::Outer, true);
    chamber.set_oxygen(0.5);
    let mut rig = Rig::with_chamber(chamber);
    assert_eq!(rig.cycle(), TickOutcome::Pressurizing(DoorSide::Outer));

    rig.chamber.set_leak(true);
    rig.chamber.set_oxygen(0.0);
    rig.chamber.clear_commands();
    assert_eq!(rig.tick(), TickOutcome::Blocked(DoorSide::Outer));
    assert_eq!(rig.airlock.status(), DisplayStatus::Hazard);

    // Readings that would open the inner side are ignored as well.
    rig.chamber.set_sensor(DoorSide::Inner, true);
    rig.chamber.set_oxygen(1.0);
    assert_eq!(rig.tick(), TickOutcome::Blocked(DoorSide::Inner));
    assert_eq!(rig.airlock.status(), DisplayStatus::Hazard);
    assert!(!opened(&rig.chamber.commands()));
}

// ── Status rendering ──────────────────────────────────────────

#[test]
fn out_of_range_code_falls_back_with_one_warning() {
    let mut rig = Rig::new();
    rig.tick();
    rig.sink.clear();

    rig.airlock
        .handle_command(AirlockCommand::ForceStatus(99), &mut rig.sink);

    assert_eq!(rig.airlock.status(), DisplayStatus::Unknown);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AirlockEvent::InvalidStatusCode(99))),
        1
    );
    for panel in 0..2 {
        assert_eq!(
            rig.chamber.panel_writes(panel).last(),
            Some(&PanelWrite::Status("Construction".into()))
        );
    }
}

#[test]
fn in_range_code_renders_normally() {
    let mut rig = Rig::new();
    rig.airlock
        .handle_command(AirlockCommand::ForceStatus(2), &mut rig.sink);
    assert_eq!(rig.airlock.status(), DisplayStatus::Hazard);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AirlockEvent::InvalidStatusCode(_))),
        0
    );
}

#[test]
fn abort_before_any_render_shows_construction() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.airlock.cycle_toward(DoorSelector::None, &mut rig.sink),
        TickOutcome::Aborted
    );
    for panel in 0..2 {
        assert_eq!(
            rig.chamber.panel_writes(panel).last(),
            Some(&PanelWrite::Status("Construction".into()))
        );
    }
    assert_eq!(rig.sink.count(|e| *e == AirlockEvent::AmbiguousTarget), 1);
    assert!(rig.chamber.commands().is_empty());
}
