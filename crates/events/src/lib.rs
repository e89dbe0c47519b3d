//! Programmed flight events and the scheduler that surfaces them during replay.
//!
//! Events are instantaneous in telemetry time but need a human-visible hold
//! window on screen, so activation is keyed on mission time while expiry runs
//! on the wall clock, independent of the playback speed multiplier.

use flightdeck_core::constants::{EVENT_HOLD_MS, EVENT_TOLERANCE_S};

/// A programmed marker in the flight profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightEvent {
    pub name: &'static str,
    /// Mission time at which the event occurs, seconds.
    pub time_s: f64,
    /// Altitude at which the event nominally occurs, metres. Display only.
    pub reference_altitude_m: f64,
}

/// Fixed event table for the replayed New Shepard profile.
///
/// Entries are spaced at least one second apart so at most one event can fall
/// inside the activation tolerance at a time.
pub const FLIGHT_EVENTS: &[FlightEvent] = &[
    FlightEvent {
        name: "Liftoff",
        time_s: 0.0,
        reference_altitude_m: 1_118.0,
    },
    FlightEvent {
        name: "Max Q",
        time_s: 72.0,
        reference_altitude_m: 12_500.0,
    },
    FlightEvent {
        name: "MECO",
        time_s: 143.49,
        reference_altitude_m: 56_000.0,
    },
    FlightEvent {
        name: "Apogee",
        time_s: 247.0,
        reference_altitude_m: 107_000.0,
    },
    FlightEvent {
        name: "Landing Burn",
        time_s: 402.0,
        reference_altitude_m: 2_000.0,
    },
    FlightEvent {
        name: "Booster Touchdown",
        time_s: 427.0,
        reference_altitude_m: 1_118.0,
    },
    FlightEvent {
        name: "Capsule Touchdown",
        time_s: 445.0,
        reference_altitude_m: 1_118.0,
    },
];

#[derive(Debug, Clone, Copy)]
struct ActiveEvent {
    event: FlightEvent,
    deadline_ms: f64,
}

/// Tracks which programmed event, if any, is currently on display.
#[derive(Debug, Clone)]
pub struct EventScheduler {
    table: &'static [FlightEvent],
    active: Option<ActiveEvent>,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventScheduler {
    /// Scheduler over the compiled-in [`FLIGHT_EVENTS`] table.
    pub fn new() -> Self {
        Self::with_table(FLIGHT_EVENTS)
    }

    /// Scheduler over a caller-supplied table. Used by tests.
    pub fn with_table(table: &'static [FlightEvent]) -> Self {
        Self {
            table,
            active: None,
        }
    }

    /// Advance the scheduler to the given mission time and wall clock.
    ///
    /// A matching event with a name different from the active one replaces it
    /// and restarts the wall-clock hold window, cancelling any pending clear.
    /// Re-matching the active event extends nothing; the hold runs out from
    /// first activation. An expired hold clears the display.
    pub fn update(&mut self, mission_time_s: f64, now_ms: f64) {
        if let Some(event) = self.closest_match(mission_time_s) {
            let replaces = self
                .active
                .map(|active| active.event.name != event.name)
                .unwrap_or(true);
            if replaces {
                self.active = Some(ActiveEvent {
                    event,
                    deadline_ms: now_ms + EVENT_HOLD_MS,
                });
                return;
            }
        }
        if let Some(active) = self.active {
            if now_ms >= active.deadline_ms {
                self.active = None;
            }
        }
    }

    /// Event currently on display, if any.
    pub fn active(&self) -> Option<&FlightEvent> {
        self.active.as_ref().map(|active| &active.event)
    }

    /// Clear the display. Only valid as part of a session restart.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Nearest table entry within the activation tolerance, smallest delta winning ties.
    fn closest_match(&self, mission_time_s: f64) -> Option<FlightEvent> {
        let mut best: Option<(f64, FlightEvent)> = None;
        for event in self.table {
            let delta = (event.time_s - mission_time_s).abs();
            if delta < EVENT_TOLERANCE_S
                && best.map(|(best_delta, _)| delta < best_delta).unwrap_or(true)
            {
                best = Some((delta, *event));
            }
        }
        best.map(|(_, event)| event)
    }
}
