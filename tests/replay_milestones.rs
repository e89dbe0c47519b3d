//! End-to-end replays driven through the full controller stack, stepped the
//! way a host scheduling loop would step it.

use flightdeck::loader::load_series_from_str;
use flightdeck::playback::{PlaybackController, PlaybackSpeed, Snapshot, TickOutcome};

const TICK_MS: f64 = 16.0;

fn full_flight_controller() -> PlaybackController {
    let json = r#"[
        {"flight_time_seconds": -50.0, "altitude": "1118", "velocity": "0"},
        {"flight_time_seconds": 0.0, "altitude": "1118", "velocity": "0"},
        {"flight_time_seconds": 7.26, "altitude": "1200", "velocity": "50"},
        {"flight_time_seconds": 72.0, "altitude": "12500", "velocity": "520"},
        {"flight_time_seconds": 143.49, "altitude": "69000", "velocity": "900"},
        {"flight_time_seconds": 247.0, "altitude": "107000", "velocity": "0"},
        {"flight_time_seconds": 402.0, "altitude": "9000", "velocity": "280"},
        {"flight_time_seconds": 427.0, "altitude": "1118", "velocity": "0"},
        {"flight_time_seconds": 445.0, "altitude": "1118", "velocity": "0"}
    ]"#;
    let series = load_series_from_str(json).expect("flight log");
    PlaybackController::new(series)
}

/// Step the controller with a fixed-interval synthetic host clock until it
/// finishes, collecting every published snapshot.
fn run_to_completion(controller: &mut PlaybackController, speed: PlaybackSpeed) -> Vec<Snapshot> {
    let token = controller.start(0.0).expect("start");
    if speed != PlaybackSpeed::X1 {
        controller.set_speed(speed, 0.0).expect("set speed");
    }
    let mut snapshots = Vec::new();
    let mut now_ms = 0.0;
    loop {
        now_ms += TICK_MS;
        match controller.tick(token, now_ms) {
            TickOutcome::Continue(snapshot) => snapshots.push(snapshot),
            TickOutcome::Finished(snapshot) => {
                snapshots.push(snapshot);
                return snapshots;
            }
            TickOutcome::Stale => panic!("live session produced a stale tick"),
        }
    }
}

#[test]
fn milestone_full_replay_reveals_every_sample_exactly_once() {
    let mut controller = full_flight_controller();
    let snapshots = run_to_completion(&mut controller, PlaybackSpeed::X4);

    let total: usize = snapshots.iter().map(|s| s.newly_revealed.len()).sum();
    assert_eq!(total, controller.series().len());
    assert_eq!(
        snapshots.last().expect("final snapshot").revealed_len,
        controller.series().len()
    );
}

#[test]
fn milestone_snapshots_are_monotonic_in_time_and_progress() {
    let mut controller = full_flight_controller();
    let snapshots = run_to_completion(&mut controller, PlaybackSpeed::X2);

    for pair in snapshots.windows(2) {
        assert!(pair[1].mission_time_s >= pair[0].mission_time_s);
        assert!(pair[1].progress >= pair[0].progress);
        assert!(pair[1].revealed_len >= pair[0].revealed_len);
    }
    let first = &snapshots[0];
    assert_eq!(first.countdown_label, "T - 50");
    assert_eq!(snapshots.last().expect("final").progress, 1.0);
}

#[test]
fn milestone_every_programmed_event_fires_during_a_full_replay() {
    let mut controller = full_flight_controller();
    let snapshots = run_to_completion(&mut controller, PlaybackSpeed::X4);

    let mut fired: Vec<&str> = Vec::new();
    for snapshot in &snapshots {
        if let Some(name) = snapshot.active_event {
            if fired.last() != Some(&name) {
                fired.push(name);
            }
        }
    }
    assert_eq!(
        fired,
        vec![
            "Liftoff",
            "Max Q",
            "MECO",
            "Apogee",
            "Landing Burn",
            "Booster Touchdown",
            "Capsule Touchdown",
        ]
    );
}

#[test]
fn milestone_no_two_events_share_a_hold_window() {
    let mut controller = full_flight_controller();
    let snapshots = run_to_completion(&mut controller, PlaybackSpeed::X4);

    // Whenever the active event changes to a different name, the programmed
    // times of the two events must be at least a second apart.
    let mut previous: Option<&str> = None;
    for snapshot in &snapshots {
        if let (Some(prev), Some(current)) = (previous, snapshot.active_event) {
            if prev != current {
                let time_of = |name: &str| {
                    flightdeck::events::FLIGHT_EVENTS
                        .iter()
                        .find(|event| event.name == name)
                        .expect("known event")
                        .time_s
                };
                assert!((time_of(current) - time_of(prev)).abs() >= 1.0);
            }
        }
        if snapshot.active_event.is_some() {
            previous = snapshot.active_event;
        }
    }
}

#[test]
fn milestone_restart_after_finish_replays_from_the_countdown() {
    let mut controller = full_flight_controller();
    let first_run = run_to_completion(&mut controller, PlaybackSpeed::X4);
    assert!(!controller.is_running());

    let token = controller.restart(1_000_000.0).expect("restart");
    let outcome = controller.tick(token, 1_000_000.0 + TICK_MS);
    let snapshot = match outcome {
        TickOutcome::Continue(snapshot) => snapshot,
        other => panic!("expected Continue, got {other:?}"),
    };
    assert_eq!(snapshot.countdown_label, "T - 50");
    assert!(snapshot.progress < first_run.last().expect("final").progress);
    assert_eq!(snapshot.revealed_len, 1);
}
