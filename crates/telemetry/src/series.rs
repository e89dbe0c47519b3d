//! Validated, time-ordered telemetry series.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One telemetry record from the flight log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Mission time of the sample, seconds relative to the reference zero event.
    pub flight_time_s: f64,
    /// Altitude above ground level, metres.
    pub altitude_m: f64,
    /// Velocity magnitude, metres per second.
    pub velocity_m_s: f64,
}

/// Errors raised when constructing a series from raw samples.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("telemetry series is empty")]
    Empty,
    #[error("sample {index} is out of order: {time_s} s follows {previous_s} s")]
    NonMonotonic {
        index: usize,
        time_s: f64,
        previous_s: f64,
    },
    #[error("sample {index} contains a non-finite value")]
    NonFinite { index: usize },
}

/// Immutable sequence of samples, ascending by `flight_time_s`.
///
/// Ordering is a construction-time precondition: the replay engine never
/// re-sorts, so a malformed log is rejected here rather than mid-playback.
#[derive(Debug, Clone)]
pub struct TelemetrySeries {
    samples: Vec<Sample>,
}

impl TelemetrySeries {
    /// Validate and take ownership of a sample sequence.
    pub fn new(samples: Vec<Sample>) -> Result<Self, SeriesError> {
        if samples.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (index, sample) in samples.iter().enumerate() {
            if !sample.flight_time_s.is_finite()
                || !sample.altitude_m.is_finite()
                || !sample.velocity_m_s.is_finite()
            {
                return Err(SeriesError::NonFinite { index });
            }
            if index > 0 {
                let previous_s = samples[index - 1].flight_time_s;
                if sample.flight_time_s < previous_s {
                    return Err(SeriesError::NonMonotonic {
                        index,
                        time_s: sample.flight_time_s,
                        previous_s,
                    });
                }
            }
        }
        Ok(Self { samples })
    }

    /// All samples in timestamp order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples in the series.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the series holds no samples. Construction rejects this, so
    /// the method exists only to satisfy the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample of the series (the pad state before liftoff).
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    /// Last sample of the series.
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }
}
