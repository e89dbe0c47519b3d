//! Mission clock: converts elapsed wall-clock milliseconds into mission time,
//! honoring a runtime-adjustable speed multiplier and a fixed origin offset.

use flightdeck_core::constants::CLOCK_ORIGIN_OFFSET_S;
use flightdeck_core::time::millis_to_seconds;

/// Accumulating virtual clock for one playback session.
///
/// Time is accumulated in milliseconds as floating point; mission time is
/// always derived from the accumulator and the origin offset, never stored
/// separately, so the two representations cannot drift apart.
#[derive(Debug, Clone)]
pub struct MissionClock {
    origin_offset_s: f64,
    speed: f64,
    accumulated_ms: f64,
    anchor_ms: Option<f64>,
}

impl MissionClock {
    /// Fresh clock at the standard mission origin (fifty seconds before zero).
    pub fn new() -> Self {
        Self::with_origin_offset(CLOCK_ORIGIN_OFFSET_S)
    }

    /// Fresh clock whose mission time starts at `origin_offset_s`.
    pub fn with_origin_offset(origin_offset_s: f64) -> Self {
        Self {
            origin_offset_s,
            speed: 1.0,
            accumulated_ms: 0.0,
            anchor_ms: None,
        }
    }

    /// Anchor the clock at the given wall-clock timestamp (milliseconds).
    ///
    /// Accumulated time is left untouched, so calling this after a pause
    /// resumes exactly where the clock stopped.
    pub fn start(&mut self, now_ms: f64) {
        self.anchor_ms = Some(now_ms);
    }

    /// Fold the wall-clock interval since the last anchor into the accumulator,
    /// scaled by the current speed multiplier, and re-anchor at `now_ms`.
    ///
    /// A no-op when the clock has never been started. Wall-clock regressions
    /// are clamped to zero so the accumulator stays non-decreasing.
    pub fn advance(&mut self, now_ms: f64) {
        let Some(anchor_ms) = self.anchor_ms else {
            return;
        };
        let delta_ms = (now_ms - anchor_ms).max(0.0);
        self.accumulated_ms += delta_ms * self.speed;
        self.anchor_ms = Some(now_ms);
    }

    /// Change the speed multiplier without gaining or losing time.
    ///
    /// The interval since the last anchor is folded in under the old
    /// multiplier first; only wall time after this call runs at the new rate.
    /// Non-positive or non-finite multipliers are rejected as no-ops.
    pub fn set_speed(&mut self, multiplier: f64, now_ms: f64) {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return;
        }
        self.advance(now_ms);
        self.speed = multiplier;
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current mission time in seconds.
    pub fn mission_time_s(&self) -> f64 {
        self.origin_offset_s + millis_to_seconds(self.accumulated_ms)
    }

    /// True once `start` has been called and `reset` has not.
    pub fn is_anchored(&self) -> bool {
        self.anchor_ms.is_some()
    }

    /// Zero the accumulator and drop the anchor, returning mission time to the origin.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
        self.anchor_ms = None;
    }
}

impl Default for MissionClock {
    fn default() -> Self {
        Self::new()
    }
}
