use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::algebra::{difference_in_seconds, difference_in_unit};
use crate::core::calendar::days_in_month;
use crate::core::{TimeInterval, TimeSpan, Unit};
use crate::error::{TimeError, TimeResult};

/// Limits applied while enumerating a span.
///
/// Splitting a long span into a fine unit (a millennium into seconds) would
/// otherwise allocate without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub max_intervals: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_intervals: 100_000,
        }
    }
}

impl SplitConfig {
    pub fn validate(self) -> TimeResult<Self> {
        if self.max_intervals == 0 {
            return Err(TimeError::InvalidData(
                "split limit must be at least one interval".to_owned(),
            ));
        }
        Ok(self)
    }
}

struct Collector {
    intervals: Vec<TimeInterval>,
    limit: usize,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            intervals: Vec::new(),
            limit,
        }
    }

    fn push(&mut self, interval: TimeInterval) -> TimeResult<()> {
        if self.intervals.len() >= self.limit {
            warn!(limit = self.limit, "range split hit the interval limit");
            return Err(TimeError::SplitLimitExceeded { limit: self.limit });
        }
        self.intervals.push(interval);
        Ok(())
    }
}

/// Enumerates every `unit`-sized sub-interval of `span` with the default
/// [`SplitConfig`].
pub fn split_range(span: &TimeSpan, unit: Unit) -> TimeResult<Vec<TimeInterval>> {
    split_range_with(span, unit, &SplitConfig::default())
}

/// Enumerates every `unit`-sized sub-interval of `span`, both ends included.
///
/// Spans whose bounds already have the requested unit are enumerated
/// value by value. Year-rooted spans split into quarters, months, weeks or
/// days walk the calendar directly. Everything else steps through time by
/// the unit's approximate length; a span shorter than one step yields just
/// its start.
pub fn split_range_with(
    span: &TimeSpan,
    unit: Unit,
    config: &SplitConfig,
) -> TimeResult<Vec<TimeInterval>> {
    let config = config.validate()?;
    let mut out = Collector::new(config.max_intervals);
    let (start, end) = (&span.start, &span.end);

    if start.unit() == unit && end.unit() == unit {
        debug!(%unit, "splitting same-unit span");
        for value in start.value()..=end.value() {
            out.push(TimeInterval::new(unit, value))?;
        }
        return Ok(out.intervals);
    }

    if start.unit() == Unit::Year && end.unit() == Unit::Year {
        let calendar = match unit {
            Unit::Quarter => Some(split_years_by(
                start,
                end,
                unit,
                4,
                (TimeInterval::quarter_number, TimeInterval::quarter_number),
                &mut out,
            )),
            Unit::Month => Some(split_years_by(
                start,
                end,
                unit,
                12,
                (TimeInterval::month_number, TimeInterval::month_number),
                &mut out,
            )),
            Unit::Week => Some(split_years_by(
                start,
                end,
                unit,
                52,
                (TimeInterval::week_number, TimeInterval::last_week_number),
                &mut out,
            )),
            Unit::Day => Some(split_years_by_day(start, end, &mut out)),
            _ => None,
        };
        if let Some(result) = calendar {
            result?;
            debug!(%unit, count = out.intervals.len(), "split year span on calendar");
            return Ok(out.intervals);
        }
    }

    split_by_steps(span, unit, &mut out)?;
    debug!(%unit, count = out.intervals.len(), "split span by fixed steps");
    Ok(out.intervals)
}

/// Position readers for the start and end bound of a year span.
type BoundPositions = (fn(&TimeInterval) -> Option<i64>, fn(&TimeInterval) -> Option<i64>);

fn split_years_by(
    start: &TimeInterval,
    end: &TimeInterval,
    unit: Unit,
    max: i64,
    (first_of, last_of): BoundPositions,
    out: &mut Collector,
) -> TimeResult<()> {
    for year in start.value()..=end.value() {
        let first = if year == start.value() {
            first_of(start).unwrap_or(1)
        } else {
            1
        };
        let last = if year == end.value() {
            last_of(end).unwrap_or(max)
        } else {
            max
        };
        for value in first..=last {
            out.push(TimeInterval::new(Unit::Year, year).with_increment(TimeInterval::new(unit, value)))?;
        }
    }
    Ok(())
}

fn split_years_by_day(start: &TimeInterval, end: &TimeInterval, out: &mut Collector) -> TimeResult<()> {
    for year in start.value()..=end.value() {
        let first_month = if year == start.value() {
            start.month_number().unwrap_or(1)
        } else {
            1
        };
        let last_month = if year == end.value() {
            end.month_number().unwrap_or(12)
        } else {
            12
        };

        for month in first_month..=last_month {
            let month_days = days_in_month(year, month)?;
            let first_day = if year == start.value() && month == first_month {
                start.day_number().unwrap_or(1)
            } else {
                1
            };
            let last_day = if year == end.value() && month == last_month {
                end.day_number().unwrap_or(month_days)
            } else {
                month_days
            };

            for day in first_day..=last_day {
                let chain = TimeInterval::from_parts(&[
                    (Unit::Year, year),
                    (Unit::Month, month),
                    (Unit::Day, day),
                ]);
                if let Some(chain) = chain {
                    out.push(chain)?;
                }
            }
        }
    }
    Ok(())
}

fn split_by_steps(span: &TimeSpan, unit: Unit, out: &mut Collector) -> TimeResult<()> {
    let step = unit.seconds(None);
    if difference_in_seconds(&span.start, &span.end)? < step {
        return out.push(span.start.clone());
    }

    let mut cursor = span.start.to_date(unit)?;
    let step = TimeDelta::try_seconds(step)
        .ok_or_else(|| TimeError::InvalidData(format!("step of one {unit} is out of range")))?;
    loop {
        out.push(TimeInterval::from_date(&cursor, unit)?)?;

        cursor = cursor
            .checked_add_signed(step)
            .ok_or_else(|| TimeError::InvalidData(format!("{cursor} plus one {unit} is out of range")))?;
        let next = TimeInterval::from_date(&cursor, unit)?;
        if difference_in_unit(&next, &span.end, unit)? < 0.0 {
            break;
        }
    }
    Ok(())
}

/// Replaces each interval by its sub-interval of `unit`, keeping intervals
/// that carry no such precision unchanged.
#[must_use]
pub fn flatten(intervals: &[TimeInterval], unit: Unit) -> Vec<TimeInterval> {
    intervals
        .iter()
        .map(|interval| interval.find(unit).unwrap_or(interval).clone())
        .collect()
}
