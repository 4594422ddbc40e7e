//! Function-level surface consumed by chart layers.
//!
//! Everything here is a thin wrapper over [`crate::core`]; the rendering
//! side only needs strings in and intervals, positions or timeline rows
//! out.

mod batch;
mod json_contract;
mod timeline;

pub use batch::parse_all;
pub use json_contract::{PARSER_KERNEL_JSON_SCHEMA_V1, ParserKernelJsonContractV1};
pub use timeline::{
    TimeSlot, TimelineBar, TimelineRange, TimelineRow, flatten_rows, process_timeline,
    process_timeline_with, validate_slots,
};

pub use crate::core::{
    SplitConfig, TimeFormat, compare, difference_in_seconds, difference_in_unit, flatten,
    is_after, is_before, is_in_range, is_same, slot_position, split_range, split_range_with,
};

use crate::core::{TimeInterval, Unit};
use crate::error::TimeResult;

/// Parses `input` with a single pattern or a kernel of alternatives.
pub fn parse<'a>(input: &str, format: impl Into<TimeFormat<'a>>) -> TimeResult<TimeInterval> {
    Ok(crate::core::parse(input, format)?)
}

/// Renders `interval` at its own precision.
#[must_use]
pub fn to_string(interval: &TimeInterval) -> String {
    interval.to_string()
}

/// Approximate length of the unit named by `symbol` (`"Y"`, `"M"`, ...).
/// `year` selects 365 or 366 days for years.
pub fn unit_seconds(symbol: &str, year: Option<i64>) -> TimeResult<i64> {
    Ok(symbol.parse::<Unit>()?.seconds(year))
}
