use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::{TimeInterval, TimeSpan, Unit};
use crate::error::TimeResult;

/// A fractional amount of a unit, e.g. 1.5 minutes.
///
/// Only produced as an output of measurement; [`TimeInterval`] values stay
/// integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitQuantity {
    #[serde(rename = "type")]
    pub unit: Unit,
    pub value: f64,
}

/// Signed seconds from `a` to `b`; positive when `b` is later.
pub fn difference_in_seconds(a: &TimeInterval, b: &TimeInterval) -> TimeResult<i64> {
    Ok(b.to_seconds(false, None)? - a.to_seconds(false, None)?)
}

/// Difference from `a` to `b` expressed in `unit`.
///
/// Uses the approximate unit lengths (30-day months, 90-day quarters,
/// 365-day years) and rounds half-up to the unit's rounding factor, so a
/// quarter is reported as exactly `0.25` years.
pub fn difference_in_unit(a: &TimeInterval, b: &TimeInterval, unit: Unit) -> TimeResult<f64> {
    let seconds = difference_in_seconds(a, b)?;
    Ok(round_to_unit(seconds as f64, unit))
}

/// Expresses a raw second count in `unit` with the same rounding as
/// [`difference_in_unit`].
#[must_use]
pub fn quantity_from_seconds(seconds: f64, unit: Unit) -> UnitQuantity {
    UnitQuantity {
        unit,
        value: round_to_unit(seconds, unit),
    }
}

fn round_to_unit(seconds: f64, unit: Unit) -> f64 {
    let value = seconds / unit.seconds(None) as f64;
    let factor = unit.rounding_factor();
    (value * factor + 0.5).floor() / factor
}

pub fn compare(a: &TimeInterval, b: &TimeInterval) -> TimeResult<Ordering> {
    Ok(0.cmp(&difference_in_seconds(a, b)?))
}

pub fn is_before(a: &TimeInterval, b: &TimeInterval) -> TimeResult<bool> {
    Ok(compare(a, b)? == Ordering::Less)
}

pub fn is_after(a: &TimeInterval, b: &TimeInterval) -> TimeResult<bool> {
    Ok(compare(a, b)? == Ordering::Greater)
}

pub fn is_same(a: &TimeInterval, b: &TimeInterval) -> TimeResult<bool> {
    Ok(compare(a, b)? == Ordering::Equal)
}

/// Inclusive on both ends. A reversed span contains nothing but may still
/// match a point equal to both bounds.
pub fn is_in_range(point: &TimeInterval, range: &TimeSpan) -> TimeResult<bool> {
    let point = point.to_seconds(false, None)?;
    let start = range.start.to_seconds(false, None)?;
    let end = range.end.to_seconds(false, None)?;
    Ok(point >= start && point <= end)
}

/// Fractional position of `point` within `span`.
///
/// `0.0` is the start and `1.0` the end; points outside the span produce
/// values outside `[0, 1]`. A zero-length span yields `-1.0`.
pub fn slot_position(span: &TimeSpan, point: &TimeInterval) -> TimeResult<f64> {
    let start = span.start.to_seconds(false, None)?;
    let end = span.end.to_seconds(false, None)?;
    let point = point.to_seconds(false, None)?;

    let total = end - start;
    if total == 0 {
        return Ok(-1.0);
    }
    Ok((point - start) as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_orders_by_seconds() {
        let a = TimeInterval::new(Unit::Hour, 1);
        let b = TimeInterval::new(Unit::Day, 1);
        assert_eq!(compare(&a, &b), Ok(Ordering::Less));
        assert_eq!(compare(&b, &a), Ok(Ordering::Greater));
        assert_eq!(compare(&a, &a), Ok(Ordering::Equal));
    }

    #[test]
    fn rounding_is_half_up() {
        // -0.125 days * 4 = -0.5, which rounds up to zero
        assert_eq!(round_to_unit(-10_800.0, Unit::Day), 0.0);
        assert_eq!(round_to_unit(10_800.0, Unit::Day), 0.25);
    }
}
