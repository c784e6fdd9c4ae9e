//! Schedule blocks and validation

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Durations are plain seconds, fractional values allowed
pub type Seconds = f64;

/// Errors raised while building a schedule from user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("invalid schedule block: {field} must be {expected}, got {value}")]
    InvalidBlock {
        field: &'static str,
        expected: &'static str,
        value: Seconds,
    },
    #[error("invalid block syntax '{0}', expected WORK:REST:DURATION in seconds")]
    Syntax(String),
    #[error("schedule has no blocks")]
    Empty,
}

/// One repeating unit of a session: alternate `work` and `rest` until
/// `duration` seconds are used up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct ScheduleBlock {
    work: Seconds,
    rest: Seconds,
    duration: Seconds,
}

/// Unchecked wire shape of a block
#[derive(Deserialize)]
struct RawBlock {
    work: Seconds,
    rest: Seconds,
    duration: Seconds,
}

impl TryFrom<RawBlock> for ScheduleBlock {
    type Error = ScheduleError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        ScheduleBlock::new(raw.work, raw.rest, raw.duration)
    }
}

impl ScheduleBlock {
    /// Create a validated block
    pub fn new(work: Seconds, rest: Seconds, duration: Seconds) -> Result<Self, ScheduleError> {
        check("work", "positive", work, work > 0.0)?;
        check("rest", "non-negative", rest, rest >= 0.0)?;
        check("duration", "positive", duration, duration > 0.0)?;
        Ok(Self { work, rest, duration })
    }

    pub fn work(&self) -> Seconds {
        self.work
    }

    pub fn rest(&self) -> Seconds {
        self.rest
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }

    /// Full length of the work or rest sub-period
    pub fn period_length(&self, working: bool) -> Seconds {
        if working { self.work } else { self.rest }
    }
}

fn check(field: &'static str, expected: &'static str, value: Seconds, ok: bool) -> Result<(), ScheduleError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ScheduleError::InvalidBlock { field, expected, value })
    }
}

impl FromStr for ScheduleBlock {
    type Err = ScheduleError;

    /// Parse `WORK:REST:DURATION`, e.g. `7:4:20`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || ScheduleError::Syntax(s.to_string());
        let parts: Vec<Seconds> = s
            .split(':')
            .map(|part| part.trim().parse::<Seconds>().map_err(|_| syntax()))
            .collect::<Result<_, _>>()?;

        match parts.as_slice() {
            [work, rest, duration] => ScheduleBlock::new(*work, *rest, *duration),
            _ => Err(syntax()),
        }
    }
}

impl fmt::Display for ScheduleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.work, self.rest, self.duration)
    }
}

/// Ordered blocks, played back to back
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    blocks: Vec<ScheduleBlock>,
}

impl Schedule {
    pub fn new(blocks: Vec<ScheduleBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[ScheduleBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total length of the session
    pub fn session_duration(&self) -> Seconds {
        self.blocks.iter().map(ScheduleBlock::duration).sum()
    }

    /// Reject schedules a timer cannot run
    pub fn ensure_usable(&self) -> Result<(), ScheduleError> {
        if self.is_empty() {
            return Err(ScheduleError::Empty);
        }
        Ok(())
    }
}

impl From<Vec<ScheduleBlock>> for Schedule {
    fn from(blocks: Vec<ScheduleBlock>) -> Self {
        Self::new(blocks)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<String> = self.blocks.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", blocks.join(", "))
    }
}
