//! Text rendering of intervals.
//!
//! Year-rooted chains render as calendar text (`2024-03-05 08:30`), an hour
//! root with finer fields as a clock time, and anything else as an English
//! duration phrase. A bare year only renders as calendar text when it has
//! four digits; `Year(3)` reads back from `"3 years"`, not `"3"`. Every
//! shape produced here is accepted by the default parser kernel.

use std::fmt;

use crate::core::{TimeInterval, Unit};

/// Years the `YYYY` pattern reads back from bare calendar text.
const CALENDAR_YEARS: std::ops::RangeInclusive<i64> = 1000..=9999;

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.unit(), self.increment()) {
            (Unit::Year, None) if !CALENDAR_YEARS.contains(&self.value()) => write_phrases(f, self),
            (Unit::Year, _) => write_calendar(f, self),
            (Unit::Hour, Some(_)) => write_clock(f, self),
            _ => write_phrases(f, self),
        }
    }
}

fn write_calendar(f: &mut fmt::Formatter<'_>, interval: &TimeInterval) -> fmt::Result {
    write!(f, "{}", interval.value())?;

    let mut parent = interval.unit();
    for node in interval.chain().skip(1) {
        let value = node.value();
        match node.unit() {
            Unit::Week if parent == Unit::Day => {}
            Unit::Quarter => write!(f, "/Q{value}")?,
            Unit::Week => write!(f, "-W{value:02}")?,
            Unit::Month | Unit::Day => write!(f, "-{value:02}")?,
            Unit::Hour => write!(f, " {value:02}")?,
            Unit::Minute | Unit::Second => write!(f, ":{value:02}")?,
            Unit::Year => write!(f, " {value}")?,
        }
        parent = node.unit();
    }
    Ok(())
}

fn write_clock(f: &mut fmt::Formatter<'_>, interval: &TimeInterval) -> fmt::Result {
    let minute = interval.find(Unit::Minute).map_or(0, TimeInterval::value);
    write!(f, "{:02}:{minute:02}", interval.value())?;
    if let Some(second) = interval.find(Unit::Second) {
        write!(f, ":{:02}", second.value())?;
    }
    Ok(())
}

fn write_phrases(f: &mut fmt::Formatter<'_>, interval: &TimeInterval) -> fmt::Result {
    for (index, node) in interval.chain().enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        let value = node.value();
        write!(f, "{value} {}", node.unit().noun(value != 1))?;
    }
    Ok(())
}
