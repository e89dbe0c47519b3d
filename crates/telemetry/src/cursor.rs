//! Forward-only cursor that reveals series samples as the mission clock reaches them.

use crate::series::{Sample, TelemetrySeries};

/// Monotonically advancing playhead over a [`TelemetrySeries`].
///
/// The revealed sequence is the series prefix before `next_index`; it grows
/// append-only during a run and rewinds only through [`ReplayCursor::reset`].
#[derive(Debug, Default, Clone)]
pub struct ReplayCursor {
    next_index: usize,
}

impl ReplayCursor {
    /// Cursor positioned before the first sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance past every sample whose timestamp has been reached and return
    /// the slice revealed by this call.
    ///
    /// The slice may be empty (no sample reached since the last call) or span
    /// several samples when one tick covers a long mission-time interval, as
    /// under a high speed multiplier or after dropped host frames. Once the
    /// final sample has been revealed further calls are no-ops.
    pub fn reveal_up_to<'s>(
        &mut self,
        series: &'s TelemetrySeries,
        mission_time_s: f64,
    ) -> &'s [Sample] {
        let samples = series.samples();
        let start = self.next_index;
        while self.next_index < samples.len()
            && samples[self.next_index].flight_time_s <= mission_time_s
        {
            self.next_index += 1;
        }
        &samples[start..self.next_index]
    }

    /// Every sample revealed so far, in reveal order.
    pub fn revealed<'s>(&self, series: &'s TelemetrySeries) -> &'s [Sample] {
        &series.samples()[..self.next_index]
    }

    /// Count of samples revealed so far.
    pub fn revealed_len(&self) -> usize {
        self.next_index
    }

    /// Rewind to the start of the series. Only valid as part of a session restart.
    pub fn reset(&mut self) {
        self.next_index = 0;
    }
}
