//! Flightdeck: a deterministic replay engine for recorded suborbital flight telemetry.
//!
//! The engine lives in small workspace crates re-exported here so front-ends
//! (CLI today, a dashboard host tomorrow) share one surface: load a series,
//! hand it to a [`playback::PlaybackController`], and drive ticks from the
//! host's scheduling loop.

pub use flightdeck_clock as clock;
pub use flightdeck_core as core;
pub use flightdeck_events as events;
pub use flightdeck_export as export;
pub use flightdeck_loader as loader;
pub use flightdeck_playback as playback;
pub use flightdeck_telemetry as telemetry;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
