//! Whole-run behaviour: arming, full crossings, reconvergence and dedup.

use airlock::adapters::sim::{Command, SimChamber};
use airlock::app::commands::AirlockCommand;
use airlock::app::events::AirlockEvent;
use airlock::app::orchestrator::TickOutcome;
use airlock::app::ports::DoorState;
use airlock::config::AirlockConfig;
use airlock::control::DoorSide;
use airlock::gate::Capability;
use airlock::status::DisplayStatus;

use super::harness::Rig;

fn walk_to(rig: &mut Rig, side: DoorSide) -> usize {
    for s in [DoorSide::Inner, DoorSide::Outer] {
        rig.chamber.set_sensor(s, s == side);
    }
    rig.run_until(40, |r, _| r.chamber.door(side) == DoorState::Open)
        .unwrap_or_else(|| panic!("{side} door never opened"))
}

fn leave(rig: &mut Rig) {
    rig.chamber.set_sensor(DoorSide::Inner, false);
    rig.chamber.set_sensor(DoorSide::Outer, false);
    rig.run_until(10, |_, o| o == TickOutcome::Idle { sealed: true })
        .expect("airlock never came to rest");
}

// ── Arming ────────────────────────────────────────────────────

#[test]
fn missing_blocks_leave_airlock_inert() {
    let chamber = SimChamber::new();
    let mut bindings = chamber.bindings(1);
    bindings.vent = None;
    bindings.tank = None;
    let mut rig = Rig::from_bindings(chamber, bindings, AirlockConfig::default());

    assert!(!rig.airlock.is_armed());
    assert_eq!(
        rig.sink.events,
        vec![
            AirlockEvent::CapabilityMissing(Capability::Vent),
            AirlockEvent::CapabilityMissing(Capability::Tank),
            AirlockEvent::InitFailed { missing: 2 },
        ]
    );

    rig.chamber.set_sensor(DoorSide::Outer, true);
    rig.sink.clear();
    for _ in 0..5 {
        assert_eq!(rig.cycle(), TickOutcome::Inert);
    }
    assert!(rig.chamber.commands().is_empty());
    assert_eq!(rig.chamber.total_panel_writes(), 0);
    assert!(rig.sink.events.is_empty());
}

#[test]
fn missing_panels_still_arm() {
    let chamber = SimChamber::new();
    let mut bindings = chamber.bindings(0);
    bindings.displays = None;
    let mut rig = Rig::from_bindings(chamber, bindings, AirlockConfig::default());

    assert!(rig.airlock.is_armed());
    assert_eq!(
        rig.sink.events,
        vec![AirlockEvent::DisplaysMissing, AirlockEvent::Armed { panels: 0 }]
    );
    assert_eq!(rig.tick(), TickOutcome::Idle { sealed: true });
    assert_eq!(rig.airlock.status(), DisplayStatus::Ready);
}

// ── Full crossings ────────────────────────────────────────────

#[test]
fn entering_from_space_cycles_through() {
    let mut rig = Rig::new();

    walk_to(&mut rig, DoorSide::Outer);
    assert!(rig.chamber.oxygen() <= 0.001);
    walk_to(&mut rig, DoorSide::Inner);
    assert!(rig.chamber.oxygen() >= 0.999);
    leave(&mut rig);

    assert_eq!(rig.airlock.status(), DisplayStatus::Ready);
    assert_eq!(rig.chamber.door(DoorSide::Inner), DoorState::Closed);
    assert_eq!(rig.chamber.door(DoorSide::Outer), DoorState::Closed);
    assert_eq!(rig.chamber.unsafe_opens(), 0);
}

#[test]
fn leaving_to_space_cycles_through() {
    let chamber = SimChamber::new();
    chamber.set_oxygen(0.0);
    chamber.set_tank(1.0);
    let mut rig = Rig::with_chamber(chamber);

    walk_to(&mut rig, DoorSide::Inner);
    walk_to(&mut rig, DoorSide::Outer);
    leave(&mut rig);

    assert_eq!(rig.airlock.status(), DisplayStatus::Ready);
    assert_eq!(rig.chamber.unsafe_opens(), 0);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AirlockEvent::DoorOpened(_))),
        2
    );
}

#[test]
fn target_switch_mid_cycle_reconverges() {
    let mut rig = Rig::new();
    rig.chamber.set_sensor(DoorSide::Outer, true);
    rig.cycle();
    rig.cycle();
    assert!(rig.chamber.oxygen() < 1.0);

    walk_to(&mut rig, DoorSide::Inner);

    assert!(
        !rig.chamber
            .commands()
            .contains(&Command::Open(DoorSide::Outer))
    );
    assert_eq!(rig.chamber.door(DoorSide::Outer), DoorState::Closed);
    assert_eq!(rig.chamber.unsafe_opens(), 0);
}

// ── Dedup ─────────────────────────────────────────────────────

#[test]
fn unchanged_readings_write_nothing_new() {
    let mut rig = Rig::new();
    rig.tick();
    let writes = rig.chamber.total_panel_writes();
    rig.tick();
    rig.tick();
    assert_eq!(rig.chamber.total_panel_writes(), writes);

    rig.chamber.set_sensor(DoorSide::Outer, true);
    rig.tick();
    let writes = rig.chamber.total_panel_writes();
    rig.tick();
    assert_eq!(rig.chamber.total_panel_writes(), writes);
}

#[test]
fn status_change_events_only_on_change() {
    let mut rig = Rig::new();
    for _ in 0..5 {
        rig.tick();
    }
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AirlockEvent::StatusChanged { .. })),
        1
    );
}

// ── Runtime config ────────────────────────────────────────────

#[test]
fn looser_threshold_opens_sooner() {
    let mut rig = Rig::new();
    let config = AirlockConfig {
        vacuum_oxygen_max: 0.3,
        ..AirlockConfig::default()
    };
    rig.airlock
        .handle_command(AirlockCommand::UpdateConfig(config), &mut rig.sink);

    assert_eq!(walk_to(&mut rig, DoorSide::Outer), 4);
}

#[test]
fn invalid_update_is_rejected() {
    let mut rig = Rig::new();
    let config = AirlockConfig {
        vacuum_oxygen_max: 1.5,
        ..AirlockConfig::default()
    };
    rig.airlock
        .handle_command(AirlockCommand::UpdateConfig(config), &mut rig.sink);
    assert!(matches!(
        rig.sink.events.last(),
        Some(AirlockEvent::ConfigRejected(_))
    ));
    assert!((rig.airlock.config().vacuum_oxygen_max - 0.001).abs() < f32::EPSILON);
}
