//! Flight-log ingestion.
//!
//! The recorded log is a JSON array of records keyed `flight_time_seconds`,
//! `altitude`, `velocity`. Altitude and velocity appear as JSON numbers or as
//! numeric strings depending on the exporting tool, so both are accepted and
//! parsed here; the engine only ever sees finished floats.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flightdeck_telemetry::{Sample, SeriesError, TelemetrySeries};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a flight log.
///
/// Load failure is non-fatal to the host: playback controls stay disabled
/// until a series is present, and there is no retry logic here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read flight log: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse flight log JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record {index}: {field} value '{value}' is not a number")]
    BadNumber {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("flight log failed validation: {0}")]
    Series(#[from] SeriesError),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn parse(&self, index: usize, field: &'static str) -> Result<f64, LoadError> {
        match self {
            NumberOrString::Number(value) => Ok(*value),
            NumberOrString::Text(text) => {
                text.trim().parse().map_err(|_| LoadError::BadNumber {
                    index,
                    field,
                    value: text.clone(),
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    flight_time_seconds: f64,
    altitude: NumberOrString,
    velocity: NumberOrString,
}

/// Load and validate a telemetry series from a JSON flight log on disk.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<TelemetrySeries, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<RawRecord> = serde_json::from_reader(reader)?;
    series_from_records(records)
}

/// Load and validate a telemetry series from in-memory JSON.
pub fn load_series_from_str(json: &str) -> Result<TelemetrySeries, LoadError> {
    let records: Vec<RawRecord> = serde_json::from_str(json)?;
    series_from_records(records)
}

fn series_from_records(records: Vec<RawRecord>) -> Result<TelemetrySeries, LoadError> {
    let mut samples = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        samples.push(Sample {
            flight_time_s: record.flight_time_seconds,
            altitude_m: record.altitude.parse(index, "altitude")?,
            velocity_m_s: record.velocity.parse(index, "velocity")?,
        });
    }
    Ok(TelemetrySeries::new(samples)?)
}
