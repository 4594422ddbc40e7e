//! Proleptic Gregorian calendar arithmetic.
//!
//! Absolute second counts are measured from 0001-01-01T00:00:00. The epoch
//! never leaks out as a date; callers only compare and subtract counts.

use crate::core::unit::SECONDS_PER_DAY;
use crate::error::{TimeError, TimeResult};

const CUMULATIVE_DAYS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

#[must_use]
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i64, month: i64) -> TimeResult<i64> {
    let month = validate_month(month)?;
    Ok(match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    })
}

/// Seconds from the epoch to January 1st of `year`.
#[must_use]
pub fn seconds_at_start_of(year: i64) -> i64 {
    days_before_year(year) * SECONDS_PER_DAY
}

/// Seconds from the epoch to the first day of `month` in `year`.
pub fn seconds_at_start_of_month(year: i64, month: i64) -> TimeResult<i64> {
    Ok(seconds_at_start_of(year) + seconds_into_year(year, month)?)
}

/// Seconds from January 1st of `year` to the first day of `month`.
pub fn seconds_into_year(year: i64, month: i64) -> TimeResult<i64> {
    let month = validate_month(month)?;
    let mut days = CUMULATIVE_DAYS[(month - 1) as usize];
    if month > 2 && is_leap_year(year) {
        days += 1;
    }
    Ok(days * SECONDS_PER_DAY)
}

fn validate_month(month: i64) -> TimeResult<i64> {
    if !(1..=12).contains(&month) {
        return Err(TimeError::InvalidUnit(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    Ok(month)
}

// Whole days between the epoch and January 1st of `year`; negative before year 1.
fn days_before_year(year: i64) -> i64 {
    let y = year - 1;
    y * 365 + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_leap_rule() {
        assert!(is_leap_year(2020));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2021));
    }

    #[test]
    fn epoch_starts_at_year_one() {
        assert_eq!(seconds_at_start_of(1), 0);
        assert_eq!(seconds_at_start_of(2), 365 * SECONDS_PER_DAY);
        assert_eq!(seconds_at_start_of(0), -366 * SECONDS_PER_DAY);
    }

    #[test]
    fn consecutive_years_differ_by_their_length() {
        for year in [1899, 1900, 1999, 2000, 2019, 2020, 2023, 2024] {
            let length = seconds_at_start_of(year + 1) - seconds_at_start_of(year);
            let expected = if is_leap_year(year) { 366 } else { 365 };
            assert_eq!(length, expected * SECONDS_PER_DAY, "year {year}");
        }
    }

    #[test]
    fn month_offsets_accumulate_month_lengths() {
        for year in [2020, 2021] {
            for month in 1..12 {
                let gap = seconds_at_start_of_month(year, month + 1).expect("next month")
                    - seconds_at_start_of_month(year, month).expect("month");
                let days = days_in_month(year, month).expect("days");
                assert_eq!(gap, days * SECONDS_PER_DAY);
            }
        }
    }

    #[test]
    fn month_out_of_range_is_invalid_unit() {
        assert!(matches!(days_in_month(2024, 0), Err(TimeError::InvalidUnit(_))));
        assert!(matches!(days_in_month(2024, 13), Err(TimeError::InvalidUnit(_))));
        assert!(matches!(seconds_into_year(2024, 13), Err(TimeError::InvalidUnit(_))));
    }
}
