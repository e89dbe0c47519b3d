//! Export helpers for CSV and JSON replay artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while writing replay artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod samples {
    use flightdeck_telemetry::Sample;
    use std::io::Write;

    use super::ExportError;

    /// Write revealed samples as CSV with a `flight_time_s,altitude_m,velocity_m_s` header.
    pub fn write_csv(writer: &mut dyn Write, samples: &[Sample]) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for sample in samples {
            csv_writer.serialize(sample)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

pub mod summary {
    use std::path::Path;

    use chrono::Utc;
    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    /// Run metadata written alongside a completed replay.
    #[derive(Debug, Clone, Serialize)]
    pub struct ReplaySummary {
        pub generated_at: String,
        pub source: String,
        pub final_speed: String,
        pub ticks: u64,
        pub samples_revealed: usize,
        pub events_fired: Vec<String>,
        pub final_countdown: String,
        pub final_mission_time_s: f64,
    }

    impl ReplaySummary {
        /// Stamp a summary with the current UTC time.
        pub fn stamped(
            source: String,
            final_speed: String,
            ticks: u64,
            samples_revealed: usize,
            events_fired: Vec<String>,
            final_countdown: String,
            final_mission_time_s: f64,
        ) -> Self {
            Self {
                generated_at: Utc::now().to_rfc3339(),
                source,
                final_speed,
                ticks,
                samples_revealed,
                events_fired,
                final_countdown,
                final_mission_time_s,
            }
        }
    }

    /// Write the summary sidecar as pretty JSON.
    pub fn write_sidecar(path: &Path, summary: &ReplaySummary) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.flush()?;
        Ok(())
    }
}
