use thiserror::Error;

use crate::core::Unit;

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid unit: {0}")]
    InvalidUnit(String),

    #[error("invalid time interval: {unit:?} with value {value}")]
    InvalidInterval { unit: Unit, value: i64 },

    #[error("invalid increment: {child:?} is not finer than {parent:?}")]
    InvalidIncrement { parent: Unit, child: Unit },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("range split exceeds the limit of {limit} intervals")]
    SplitLimitExceeded { limit: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Failures produced while matching an input string against a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected '{expected}' at position {position}, found {found:?}")]
    LiteralMismatch {
        expected: char,
        found: Option<char>,
        position: usize,
    },

    #[error("expected a digit at position {position}, found {found:?}")]
    NotADigit { found: Option<char>, position: usize },

    #[error("no time intervals found in pattern")]
    NoIntervalsFound,

    #[error("no pattern in the kernel matched {input:?}")]
    NoPatternMatched { input: String },
}
