//! Per-tick snapshot published to presentation consumers.

use flightdeck_telemetry::Sample;
use serde::Serialize;

/// Consistent view of the session after one tick.
///
/// Presentation consumers (readouts, charts, scene renderers) take everything
/// they need from here; they never reach into the engine's internals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Mission time, seconds.
    pub mission_time_s: f64,
    /// Countdown readout, "T - N" before zero and "T + N" after.
    pub countdown_label: String,
    /// Fraction of the mission window covered, 0..1.
    pub progress: f64,
    /// Total samples revealed so far.
    pub revealed_len: usize,
    /// Samples newly revealed by this tick, in timestamp order.
    pub newly_revealed: Vec<Sample>,
    /// Name of the event currently on display, if any.
    pub active_event: Option<&'static str>,
    /// Altitude from the most recent revealed sample, metres.
    pub altitude_m: f64,
    /// Velocity from the most recent revealed sample, metres per second.
    pub velocity_m_s: f64,
}
