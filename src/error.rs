//! Error types shared by the schedule expander and the timer engine

use thiserror::Error;

/// Failures of the derived, normalized accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimingError {
    /// The session has zero total duration, so relative values are undefined
    #[error("division by zero: session duration is 0")]
    DivisionByZero,
}
