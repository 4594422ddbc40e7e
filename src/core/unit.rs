use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::calendar::is_leap_year;
use crate::error::{TimeError, TimeResult};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Precision of a [`TimeInterval`](crate::core::TimeInterval).
///
/// Variants are declared in precision rank order, so the derived `Ord`
/// sorts coarse units first: `Year < Month < Quarter < Week < Day < ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "Y")]
    Year,
    #[serde(rename = "M")]
    Month,
    #[serde(rename = "Q")]
    Quarter,
    #[serde(rename = "W")]
    Week,
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "H")]
    Hour,
    #[serde(rename = "m")]
    Minute,
    #[serde(rename = "s")]
    Second,
}

impl Unit {
    pub const ALL: [Unit; 8] = [
        Unit::Year,
        Unit::Month,
        Unit::Quarter,
        Unit::Week,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    /// Single-letter pattern token for this unit.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Unit::Year => 'Y',
            Unit::Month => 'M',
            Unit::Quarter => 'Q',
            Unit::Week => 'W',
            Unit::Day => 'D',
            Unit::Hour => 'H',
            Unit::Minute => 'm',
            Unit::Second => 's',
        }
    }

    /// Resolves a pattern token. Unknown letters fail with `InvalidUnit`.
    pub fn from_symbol(symbol: char) -> TimeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.symbol() == symbol)
            .ok_or_else(|| TimeError::InvalidUnit(symbol.to_string()))
    }

    /// Approximate duration of one unit in seconds.
    ///
    /// Only `Year` depends on the year context: a leap year is 366 days.
    /// Months are 30 days and quarters 90 days.
    #[must_use]
    pub fn seconds(self, year: Option<i64>) -> i64 {
        match self {
            Unit::Year => match year {
                Some(year) if is_leap_year(year) => 366 * SECONDS_PER_DAY,
                _ => 365 * SECONDS_PER_DAY,
            },
            Unit::Month => 30 * SECONDS_PER_DAY,
            Unit::Quarter => 3 * 30 * SECONDS_PER_DAY,
            Unit::Week => 7 * SECONDS_PER_DAY,
            Unit::Day => SECONDS_PER_DAY,
            Unit::Hour => SECONDS_PER_HOUR,
            Unit::Minute => SECONDS_PER_MINUTE,
            Unit::Second => 1,
        }
    }

    /// First valid value of the unit when it counts positions (January is 1,
    /// midnight is hour 0).
    #[must_use]
    pub fn zero_index(self) -> i64 {
        match self {
            Unit::Month | Unit::Quarter | Unit::Week | Unit::Day => 1,
            Unit::Year | Unit::Hour | Unit::Minute | Unit::Second => 0,
        }
    }

    /// Decimal precision kept by [`difference_in_unit`](crate::core::difference_in_unit).
    #[must_use]
    pub fn rounding_factor(self) -> f64 {
        match self {
            Unit::Second => 1.0,
            Unit::Minute => 60.0,
            Unit::Hour | Unit::Day | Unit::Week | Unit::Month | Unit::Year | Unit::Quarter => 4.0,
        }
    }

    /// English duration noun, used for duration phrases like `"3 hours"`.
    #[must_use]
    pub fn noun(self, plural: bool) -> &'static str {
        match (self, plural) {
            (Unit::Year, false) => "year",
            (Unit::Year, true) => "years",
            (Unit::Month, false) => "month",
            (Unit::Month, true) => "months",
            (Unit::Quarter, false) => "quarter",
            (Unit::Quarter, true) => "quarters",
            (Unit::Week, false) => "week",
            (Unit::Week, true) => "weeks",
            (Unit::Day, false) => "day",
            (Unit::Day, true) => "days",
            (Unit::Hour, false) => "hour",
            (Unit::Hour, true) => "hours",
            (Unit::Minute, false) => "minute",
            (Unit::Minute, true) => "minutes",
            (Unit::Second, false) => "second",
            (Unit::Second, true) => "seconds",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Unit {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Self::from_symbol(symbol),
            _ => Err(TimeError::InvalidUnit(s.to_owned())),
        }
    }
}
