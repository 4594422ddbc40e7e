pub mod algebra;
pub mod calendar;
mod format;
pub mod interval;
pub mod parser;
pub mod span;
pub mod splitter;
pub mod unit;

pub use algebra::{
    UnitQuantity, compare, difference_in_seconds, difference_in_unit, is_after, is_before,
    is_in_range, is_same, quantity_from_seconds, slot_position,
};
pub use calendar::{
    days_in_month, is_leap_year, seconds_at_start_of, seconds_at_start_of_month,
    seconds_into_year,
};
pub use interval::TimeInterval;
pub use parser::{
    DEFAULT_PATTERNS, ParserKernel, ParserPattern, TimeFormat, default_kernel, parse,
    parse_default,
};
pub use span::TimeSpan;
pub use splitter::{SplitConfig, flatten, split_range, split_range_with};
pub use unit::Unit;
