//! Expansion of a schedule into the concrete work/rest periods elapsed so far

use serde::{Deserialize, Serialize};

use super::block::{Schedule, Seconds};
use crate::error::TimingError;

/// Leftovers below this are rounding noise, not time
const EPSILON: Seconds = 1e-9;

/// A work or rest interval that has (at least partly) occurred
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// Offset from session start
    pub start: Seconds,
    /// How much of the period has elapsed
    pub duration: Seconds,
    /// Full length of the period, already cut at the end of its block
    pub period: Seconds,
    pub working: bool,
}

impl Period {
    pub fn end(&self) -> Seconds {
        self.start + self.duration
    }

    /// Whether the cursor stopped inside this period
    pub fn is_partial(&self) -> bool {
        self.duration < self.period
    }
}

/// A period scaled to session units, `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePeriod {
    pub start: f64,
    pub duration: f64,
    pub working: bool,
}

/// Walk the schedule up to `elapsed` and emit every period touched so far,
/// in chronological order.
///
/// Each block alternates work and rest starting with work. A period is cut
/// short either by the end of its block or by `elapsed`; in the latter case
/// it is the last period emitted. Elapsed time beyond the end of the
/// schedule is ignored. Zero-length rest periods are skipped, as are slivers
/// shorter than a nanosecond left over by floating-point arithmetic.
pub fn expand(schedule: &Schedule, elapsed: Seconds) -> Vec<Period> {
    let mut sequence = Vec::new();
    let mut remaining_elapsed = elapsed.max(0.0);

    'blocks: for block in schedule.blocks() {
        let mut remaining_duration = block.duration();
        let mut working = true;

        while remaining_elapsed > EPSILON && remaining_duration > EPSILON {
            let period = block.period_length(working).min(remaining_duration);
            let start = elapsed - remaining_elapsed;

            if remaining_elapsed < period {
                sequence.push(Period { start, duration: remaining_elapsed, period, working });
                break 'blocks;
            }

            if period > EPSILON {
                sequence.push(Period { start, duration: period, period, working });
            }
            remaining_elapsed -= period;
            remaining_duration -= period;
            working = !working;
        }

        if remaining_elapsed <= EPSILON {
            break;
        }
    }

    sequence
}

/// [`expand`], normalized by the session duration for arc or progress-bar
/// rendering
pub fn expand_relative(schedule: &Schedule, elapsed: Seconds) -> Result<Vec<RelativePeriod>, TimingError> {
    let session_duration = schedule.session_duration();
    if session_duration == 0.0 {
        return Err(TimingError::DivisionByZero);
    }

    Ok(expand(schedule, elapsed)
        .into_iter()
        .map(|p| RelativePeriod {
            start: p.start / session_duration,
            duration: p.duration / session_duration,
            working: p.working,
        })
        .collect())
}
