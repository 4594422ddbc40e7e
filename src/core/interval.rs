use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calendar::{days_in_month, seconds_at_start_of, seconds_into_year};
use crate::core::unit::{SECONDS_PER_DAY, Unit};
use crate::error::{TimeError, TimeResult};

/// A point or duration in time at a given precision.
///
/// The value is a chain: a coarse root (`Year`) optionally followed by
/// strictly finer increments (`Month`, `Day`, `Hour`, ...). `Quarter` and
/// `Week` only appear as the sole increment of a year, except for the week
/// marker that [`TimeInterval::from_date`] attaches under a day.
///
/// Instances are immutable; every `with_*` method returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    #[serde(rename = "type")]
    unit: Unit,
    value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    increment: Option<Box<TimeInterval>>,
}

impl TimeInterval {
    #[must_use]
    pub fn new(unit: Unit, value: i64) -> Self {
        Self {
            unit,
            value,
            increment: None,
        }
    }

    /// Builds a chain from `(unit, value)` pairs, coarsest first.
    ///
    /// Returns `None` for an empty slice. No ordering check happens here;
    /// [`TimeInterval::to_seconds`] rejects invalid chains.
    #[must_use]
    pub fn from_parts(parts: &[(Unit, i64)]) -> Option<Self> {
        parts.iter().rev().fold(None, |increment, &(unit, value)| {
            Some(Self {
                unit,
                value,
                increment: increment.map(Box::new),
            })
        })
    }

    /// Current UTC time at `precision`.
    pub fn now(precision: Unit) -> TimeResult<Self> {
        Self::from_date(&Utc::now().naive_utc(), precision)
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub fn increment(&self) -> Option<&TimeInterval> {
        self.increment.as_deref()
    }

    #[must_use]
    pub fn with_value(&self, value: i64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_unit(&self, unit: Unit) -> Self {
        Self {
            unit,
            ..self.clone()
        }
    }

    /// Returns a copy whose increment is replaced by `increment`.
    #[must_use]
    pub fn with_increment(&self, increment: TimeInterval) -> Self {
        Self {
            unit: self.unit,
            value: self.value,
            increment: Some(Box::new(increment)),
        }
    }

    /// Iterates the chain from the root down to the finest increment.
    pub fn chain(&self) -> impl Iterator<Item = &TimeInterval> {
        std::iter::successors(Some(self), |node| node.increment())
    }

    /// Finest unit carried by the chain.
    #[must_use]
    pub fn precision(&self) -> Unit {
        self.chain().last().map_or(self.unit, |node| node.unit)
    }

    /// First node of the chain with the given unit.
    #[must_use]
    pub fn find(&self, unit: Unit) -> Option<&TimeInterval> {
        self.chain().find(|node| node.unit == unit)
    }

    /// Resolves the chain to a second count.
    ///
    /// Absolute values are measured from the calendar epoch; with `is_delta`
    /// position-like units (months, days, ...) count from their first valid
    /// value. `year` supplies the leap-year context for months and quarters;
    /// a `Year` root provides its own when none is given.
    pub fn to_seconds(&self, is_delta: bool, year: Option<i64>) -> TimeResult<i64> {
        if self.value < 0 {
            return Err(TimeError::InvalidInterval {
                unit: self.unit,
                value: self.value,
            });
        }

        let year = match (self.unit, year) {
            (Unit::Year, None) => Some(self.value),
            (_, year) => year,
        };
        let own = self.own_seconds(is_delta, year)?;

        let Some(increment) = self.increment() else {
            return Ok(own);
        };
        if self.unit == Unit::Day && increment.unit == Unit::Week {
            // week marker left by `from_date(.., Unit::Week)`
            return Ok(own);
        }
        if increment.unit.seconds(year) >= self.unit.seconds(year) {
            return Err(TimeError::InvalidIncrement {
                parent: self.unit,
                child: increment.unit,
            });
        }
        Ok(own + increment.to_seconds(true, year)?)
    }

    fn own_seconds(&self, is_delta: bool, year: Option<i64>) -> TimeResult<i64> {
        match (self.unit, year) {
            (Unit::Year, _) => Ok(seconds_at_start_of(self.value)),
            (Unit::Month, Some(year)) => seconds_into_year(year, self.value),
            (Unit::Quarter, Some(year)) if (1..=4).contains(&self.value) => {
                seconds_into_year(year, quarter_first_month(self.value))
            }
            (unit, year) => {
                let zero_index = if is_delta { unit.zero_index() } else { 0 };
                Ok((self.value - zero_index) * unit.seconds(year))
            }
        }
    }

    /// Builds a `Year`-rooted chain for `date` at `precision`.
    ///
    /// The finest field is rounded half-up into the next unit: July or later
    /// rounds the year, day 16 or later the month, noon the day, minute 30
    /// the hour, second 30 the minute. Roll-overs are normalised, so
    /// rounding December 20th to months yields January of the next year.
    pub fn from_date(date: &NaiveDateTime, precision: Unit) -> TimeResult<Self> {
        let parts = match precision {
            Unit::Year => {
                let bump = i64::from(date.month() >= 7);
                vec![(Unit::Year, i64::from(date.year()) + bump)]
            }
            Unit::Quarter => vec![
                (Unit::Year, i64::from(date.year())),
                (Unit::Quarter, i64::from(date.month0() / 3 + 1)),
            ],
            Unit::Month => {
                let (mut year, mut month) = (i64::from(date.year()), i64::from(date.month()));
                if date.day() > 15 {
                    month += 1;
                    if month > 12 {
                        month = 1;
                        year += 1;
                    }
                }
                vec![(Unit::Year, year), (Unit::Month, month)]
            }
            Unit::Week => {
                let back = i64::from(date.weekday().num_days_from_sunday());
                let sunday = shift(truncate(date, Unit::Day)?, -back * SECONDS_PER_DAY)?;
                let mut parts = ymd_parts(&sunday);
                parts.push((Unit::Week, 1));
                parts
            }
            Unit::Day => {
                let rounded = round_up_if(date, date.hour() >= 12, SECONDS_PER_DAY)?;
                ymd_parts(&rounded)
            }
            Unit::Hour => {
                let rounded = round_up_if(date, date.minute() >= 30, 3_600)?;
                let mut parts = ymd_parts(&rounded);
                parts.push((Unit::Hour, i64::from(rounded.hour())));
                parts
            }
            Unit::Minute => {
                let rounded = round_up_if(date, date.second() >= 30, 60)?;
                let mut parts = ymd_parts(&rounded);
                parts.push((Unit::Hour, i64::from(rounded.hour())));
                parts.push((Unit::Minute, i64::from(rounded.minute())));
                parts
            }
            Unit::Second => {
                let mut parts = ymd_parts(date);
                parts.push((Unit::Hour, i64::from(date.hour())));
                parts.push((Unit::Minute, i64::from(date.minute())));
                parts.push((Unit::Second, i64::from(date.second())));
                parts
            }
        };

        Self::from_parts(&parts)
            .ok_or_else(|| TimeError::InvalidData("empty interval chain".to_owned()))
    }

    /// Field-wise variant of [`TimeInterval::from_date`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        precision: Unit,
    ) -> TimeResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                TimeError::InvalidUnit(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} is not a valid date"
                ))
            })?;
        Self::from_date(&date, precision)
    }

    /// Resolves the chain to a calendar date truncated to `precision`.
    ///
    /// Missing finer fields take their first valid value; a quarter maps to
    /// the first month of that quarter. `Week` truncates like `Day`.
    pub fn to_date(&self, precision: Unit) -> TimeResult<NaiveDateTime> {
        let seconds = self.to_seconds(false, None)?;
        let date = shift(epoch()?, seconds)?;
        truncate(&date, precision)
    }

    /// Day of month carried by a `Year -> Month -> Day` chain.
    #[must_use]
    pub fn day_number(&self) -> Option<i64> {
        match (self.unit, self.increment()) {
            (Unit::Year, Some(month)) if month.unit == Unit::Month => month
                .increment()
                .filter(|day| day.unit == Unit::Day)
                .map(|day| day.value),
            _ => None,
        }
    }

    /// Month number implied by the chain, approximated from coarser data
    /// when the chain has no month.
    #[must_use]
    pub fn month_number(&self) -> Option<i64> {
        match (self.unit, self.increment()) {
            (Unit::Year, Some(inc)) if inc.unit == Unit::Month => Some(inc.value),
            (Unit::Year, Some(inc)) if inc.unit == Unit::Quarter => {
                Some(quarter_first_month(inc.value))
            }
            (Unit::Month, _) => Some(self.value),
            (Unit::Quarter, _) => Some(quarter_first_month(self.value)),
            (Unit::Week, _) => Some(ceil_div(self.value, 4)),
            (Unit::Day, _) => Some(ceil_div(self.value, 30)),
            _ => None,
        }
    }

    /// Week-of-year implied by the chain, capped at 52.
    #[must_use]
    pub fn week_number(&self) -> Option<i64> {
        match (self.unit, self.increment()) {
            (Unit::Year, Some(inc)) if inc.unit == Unit::Week => Some(inc.value),
            (Unit::Year, Some(inc)) if inc.unit == Unit::Month => {
                let day_of_year = self.day_of_year(inc.value)?;
                Some(ceil_div(day_of_year, 7).clamp(1, 52))
            }
            (Unit::Week, _) => Some(self.value),
            (Unit::Day, _) => Some(ceil_div(self.value, 7)),
            _ => None,
        }
    }

    /// Week-of-year of the last day the chain covers. A year and month
    /// without a day reach the month's last day; anything else matches
    /// [`Self::week_number`].
    #[must_use]
    pub fn last_week_number(&self) -> Option<i64> {
        match (self.unit, self.increment()) {
            (Unit::Year, Some(inc)) if inc.unit == Unit::Month && self.day_number().is_none() => {
                let offset = seconds_into_year(self.value, inc.value).ok()? / SECONDS_PER_DAY;
                let last_day = days_in_month(self.value, inc.value).ok()?;
                Some(ceil_div(offset + last_day, 7).clamp(1, 52))
            }
            _ => self.week_number(),
        }
    }

    /// Quarter implied by the chain.
    #[must_use]
    pub fn quarter_number(&self) -> Option<i64> {
        match (self.unit, self.increment()) {
            (Unit::Year, Some(inc)) if inc.unit == Unit::Quarter => Some(inc.value),
            (Unit::Year, Some(inc)) if inc.unit == Unit::Month => {
                Some(ceil_div(inc.value, 3).clamp(1, 4))
            }
            (Unit::Quarter, _) => Some(self.value),
            (Unit::Week, _) => Some((self.value / 13 + 1).min(4)),
            (Unit::Day, _) => Some(ceil_div(ceil_div(self.value, 30), 3).clamp(1, 4)),
            _ => None,
        }
    }

    fn day_of_year(&self, month: i64) -> Option<i64> {
        let offset = seconds_into_year(self.value, month).ok()? / SECONDS_PER_DAY;
        Some(offset + self.day_number().unwrap_or(1))
    }
}

#[must_use]
pub(crate) fn quarter_first_month(quarter: i64) -> i64 {
    (quarter - 1) * 3 + 1
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    -((-value).div_euclid(divisor))
}

fn epoch() -> TimeResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimeError::InvalidData("calendar epoch is not representable".to_owned()))
}

fn shift(date: NaiveDateTime, seconds: i64) -> TimeResult<NaiveDateTime> {
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| TimeError::InvalidData(format!("{seconds}s from {date} is out of range")))
}

fn round_up_if(date: &NaiveDateTime, bump: bool, seconds: i64) -> TimeResult<NaiveDateTime> {
    if bump { shift(*date, seconds) } else { Ok(*date) }
}

fn ymd_parts(date: &NaiveDateTime) -> Vec<(Unit, i64)> {
    vec![
        (Unit::Year, i64::from(date.year())),
        (Unit::Month, i64::from(date.month())),
        (Unit::Day, i64::from(date.day())),
    ]
}

fn truncate(date: &NaiveDateTime, precision: Unit) -> TimeResult<NaiveDateTime> {
    let (month, day, hour, minute, second) = match precision {
        Unit::Year => (1, 1, 0, 0, 0),
        Unit::Quarter => (date.month0() / 3 * 3 + 1, 1, 0, 0, 0),
        Unit::Month => (date.month(), 1, 0, 0, 0),
        Unit::Week | Unit::Day => (date.month(), date.day(), 0, 0, 0),
        Unit::Hour => (date.month(), date.day(), date.hour(), 0, 0),
        Unit::Minute => (date.month(), date.day(), date.hour(), date.minute(), 0),
        Unit::Second => (
            date.month(),
            date.day(),
            date.hour(),
            date.minute(),
            date.second(),
        ),
    };
    NaiveDate::from_ymd_opt(date.year(), month, day)
        .and_then(|day| day.and_hms_opt(hour, minute, second))
        .ok_or_else(|| TimeError::InvalidData(format!("cannot truncate {date} to {precision}")))
}
