//! time-interval-engine: hierarchical variable-precision time for chart axes.
//!
//! Times are modelled as chains of calendar units (`2024 -> March -> 5th`)
//! that can be parsed from loose text, compared, measured and enumerated
//! into regular slots for axis labels and timeline rows.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use crate::core::{ParserKernel, TimeInterval, TimeSpan, Unit};
pub use crate::error::{ParseError, TimeError, TimeResult};
