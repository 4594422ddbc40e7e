use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::algebra::{difference_in_seconds, difference_in_unit, is_in_range, slot_position};
use crate::core::parser::{TimeFormat, parse};
use crate::core::splitter::split_range;
use crate::core::{TimeInterval, Unit};
use crate::error::TimeResult;

/// An ordered pair of intervals delimiting a range.
///
/// `start <= end` is not enforced; reversed spans are handled by each
/// operation as documented there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: TimeInterval,
    pub end: TimeInterval,
}

impl TimeSpan {
    #[must_use]
    pub fn new(start: TimeInterval, end: TimeInterval) -> Self {
        Self { start, end }
    }

    /// Parses both bounds with the same pattern or kernel.
    pub fn parse<'a>(start: &str, end: &str, format: impl Into<TimeFormat<'a>>) -> TimeResult<Self> {
        let format = format.into();
        Ok(Self::new(parse(start, format)?, parse(end, format)?))
    }

    pub fn duration_in_seconds(&self) -> TimeResult<i64> {
        difference_in_seconds(&self.start, &self.end)
    }

    pub fn duration_in_unit(&self, unit: Unit) -> TimeResult<f64> {
        difference_in_unit(&self.start, &self.end, unit)
    }

    pub fn split_into(&self, unit: Unit) -> TimeResult<Vec<TimeInterval>> {
        split_range(self, unit)
    }

    pub fn position_of(&self, point: &TimeInterval) -> TimeResult<f64> {
        slot_position(self, point)
    }

    pub fn contains(&self, point: &TimeInterval) -> TimeResult<bool> {
        is_in_range(point, self)
    }

    #[must_use]
    pub fn with_start(&self, start: TimeInterval) -> Self {
        Self::new(start, self.end.clone())
    }

    #[must_use]
    pub fn with_end(&self, end: TimeInterval) -> Self {
        Self::new(self.start.clone(), end)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
