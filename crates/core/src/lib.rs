//! Core constants, time helpers, and display formatting shared across the Flightdeck workspace.

/// Fixed mission parameters expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Start of the replayed mission-time window (seconds). Playback opens on the
    /// pre-roll countdown, fifty seconds before the reference zero event.
    pub const MISSION_WINDOW_START_S: f64 = -50.0;
    /// End of the replayed mission-time window (seconds). Playback halts once the
    /// mission clock passes this bound.
    pub const MISSION_WINDOW_END_S: f64 = 450.0;
    /// Offset of the mission clock's origin from the reference zero event (seconds).
    pub const CLOCK_ORIGIN_OFFSET_S: f64 = MISSION_WINDOW_START_S;
    /// Half-width of the window in which a programmed event matches the mission clock (seconds).
    pub const EVENT_TOLERANCE_S: f64 = 1.0;
    /// Wall-clock duration an activated event stays visible (milliseconds).
    pub const EVENT_HOLD_MS: f64 = 5_000.0;
    /// Milliseconds per second.
    pub const MILLIS_PER_SECOND: f64 = 1_000.0;
}

/// Unit conversions between the wall-clock (milliseconds) and mission-time (seconds) domains.
pub mod time {
    use super::constants::MILLIS_PER_SECOND;

    /// Convert seconds to milliseconds.
    #[inline]
    pub fn seconds_to_millis(s: f64) -> f64 {
        s * MILLIS_PER_SECOND
    }

    /// Convert milliseconds to seconds.
    #[inline]
    pub fn millis_to_seconds(ms: f64) -> f64 {
        ms / MILLIS_PER_SECOND
    }
}

/// Countdown-style label formatting for the mission clock readout.
pub mod countdown {
    /// Format mission time as a launch countdown label.
    ///
    /// Negative mission time counts down in whole seconds remaining ("T - 50"),
    /// non-negative time counts up in whole seconds elapsed ("T + 0").
    pub fn label(mission_time_s: f64) -> String {
        if mission_time_s < 0.0 {
            format!("T - {}", (-mission_time_s).ceil() as i64)
        } else {
            format!("T + {}", mission_time_s.floor() as i64)
        }
    }
}

/// Progress of the mission clock through the fixed replay window.
pub mod progress {
    use super::constants::{MISSION_WINDOW_END_S, MISSION_WINDOW_START_S};

    /// Fraction of the [-50, 450] s window covered so far, clamped to [0, 1].
    pub fn fraction(mission_time_s: f64) -> f64 {
        let span = MISSION_WINDOW_END_S - MISSION_WINDOW_START_S;
        ((mission_time_s - MISSION_WINDOW_START_S) / span).clamp(0.0, 1.0)
    }
}
