//! Telemetry data model: the immutable flight-sample series and the forward-only replay cursor.

pub mod cursor;
pub mod series;

pub use cursor::ReplayCursor;
pub use series::{Sample, SeriesError, TelemetrySeries};
