//! Pattern-driven parsing of free-form time strings.
//!
//! A pattern mixes unit letters (`Y M Q W D H m s`) with literal text.
//! Every unit letter consumes one digit; a run of the same letter (`YYYY`)
//! accumulates its digits into one value. Text between single quotes is
//! matched verbatim, so `'Q'Q` reads the `Q` prefix of `Q2`. Input left over
//! once the pattern is exhausted is ignored.
//!
//! A [`ParserKernel`] is an ordered list of patterns tried until one
//! succeeds.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{TimeInterval, Unit};
use crate::error::ParseError;

/// Patterns bundled with the engine, longest shapes first so that a shorter
/// pattern never swallows the prefix of a richer input.
pub static DEFAULT_PATTERNS: &[&str] = &[
    "YYYY-MM-DD'T'HH:mm:ss",
    "YYYY-MM-DD HH:mm:ss",
    "YYYY-MM-DD HH:mm",
    "YYYY-MM-DD HH",
    "YYYY-MM-DD",
    "YYYY/MM/DD",
    "MM/DD/YYYY",
    "DD.MM.YYYY",
    "DD-MM-YYYY",
    "YYYY-'W'WW",
    "YYYY-MM",
    "MM/YYYY",
    "'Q'Q/YYYY",
    "YYYY/'Q'Q",
    "YYYY'Q'Q",
    "YYYY/MM",
    "YYYY/M",
    "YYYY",
    "M/YYYY",
    "HH:mm:ss",
    "HH:mm",
    "H:mm:ss",
    "H:mm",
    // durations
    "Y' years'",
    "YY' years'",
    "YYY' years'",
    "YYYY' years'",
    "Y' year'",
    "Q' quarters'",
    "QQ' quarters'",
    "Q' quarter'",
    "M' months'",
    "MM' months'",
    "M' month'",
    "W' weeks'",
    "WW' weeks'",
    "W' week'",
    "D' days'",
    "DD' days'",
    "DDD' days'",
    "D' day'",
    "H' hours'",
    "HH' hours'",
    "HHH' hours'",
    "H' hour'",
    "m' minutes'",
    "mm' minutes'",
    "mmm' minutes'",
    "m' minute'",
    "s' seconds'",
    "ss' seconds'",
    "sss' seconds'",
    "s' second'",
];

/// Ordered list of alternative patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserKernel {
    pub patterns: Vec<String>,
}

impl Default for ParserKernel {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.iter().copied())
    }
}

impl ParserKernel {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first successful parse in declared pattern order.
    pub fn parse(&self, input: &str) -> Result<TimeInterval, ParseError> {
        for pattern in &self.patterns {
            match ParserPattern::new(pattern).parse(input) {
                Ok(interval) => return Ok(interval),
                Err(error) => trace!(pattern = %pattern, %error, "kernel pattern rejected input"),
            }
        }
        Err(ParseError::NoPatternMatched {
            input: input.to_owned(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternToken {
    Literal(char),
    Digit(Unit),
}

/// A single compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserPattern {
    tokens: SmallVec<[PatternToken; 24]>,
}

impl ParserPattern {
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let mut tokens = SmallVec::new();
        let mut chars = pattern.trim().chars();
        while let Some(c) = chars.next() {
            if c == '\'' {
                // an unterminated quote runs to the end of the pattern
                tokens.extend(chars.by_ref().take_while(|&c| c != '\'').map(PatternToken::Literal));
                continue;
            }
            let token = Unit::from_symbol(c).map_or(PatternToken::Literal(c), PatternToken::Digit);
            tokens.push(token);
        }
        Self { tokens }
    }

    pub fn parse(&self, input: &str) -> Result<TimeInterval, ParseError> {
        let input: SmallVec<[char; 32]> = input.trim().chars().collect();
        let mut parts: SmallVec<[(Unit, i64); 8]> = SmallVec::new();
        let mut run: Option<Unit> = None;

        for (position, token) in self.tokens.iter().enumerate() {
            let found = input.get(position).copied();
            match *token {
                PatternToken::Literal(expected) => {
                    if found != Some(expected) {
                        return Err(ParseError::LiteralMismatch {
                            expected,
                            found,
                            position,
                        });
                    }
                    run = None;
                }
                PatternToken::Digit(unit) => {
                    let digit = found
                        .and_then(|c| c.to_digit(10))
                        .map(i64::from)
                        .ok_or(ParseError::NotADigit { found, position })?;
                    match parts.last_mut() {
                        Some((last, value)) if run == Some(unit) && *last == unit => {
                            *value = value.saturating_mul(10).saturating_add(digit);
                        }
                        _ => parts.push((unit, digit)),
                    }
                    run = Some(unit);
                }
            }
        }

        build_chain(parts)
    }
}

/// Orders the collected values by precision and links each strictly finer
/// value under the previous one. Values that do not refine the chain
/// (repeated or coarser units) are dropped.
fn build_chain(mut parts: SmallVec<[(Unit, i64); 8]>) -> Result<TimeInterval, ParseError> {
    parts.sort_by_key(|&(unit, _)| unit);

    let mut kept: SmallVec<[(Unit, i64); 8]> = SmallVec::new();
    for (unit, value) in parts {
        match kept.last() {
            Some(&(tail, _)) if unit <= tail => {
                trace!(%unit, value, "dropping token that does not refine the chain");
            }
            _ => kept.push((unit, value)),
        }
    }

    TimeInterval::from_parts(&kept).ok_or(ParseError::NoIntervalsFound)
}

/// A single pattern or a kernel of alternatives.
#[derive(Debug, Clone, Copy)]
pub enum TimeFormat<'a> {
    Pattern(&'a str),
    Kernel(&'a ParserKernel),
}

impl<'a> From<&'a str> for TimeFormat<'a> {
    fn from(pattern: &'a str) -> Self {
        Self::Pattern(pattern)
    }
}

impl<'a> From<&'a String> for TimeFormat<'a> {
    fn from(pattern: &'a String) -> Self {
        Self::Pattern(pattern.as_str())
    }
}

impl<'a> From<&'a ParserKernel> for TimeFormat<'a> {
    fn from(kernel: &'a ParserKernel) -> Self {
        Self::Kernel(kernel)
    }
}

pub fn parse<'a>(input: &str, format: impl Into<TimeFormat<'a>>) -> Result<TimeInterval, ParseError> {
    match format.into() {
        TimeFormat::Pattern(pattern) => ParserPattern::new(pattern).parse(input),
        TimeFormat::Kernel(kernel) => kernel.parse(input),
    }
}

/// Parses with the bundled [`DEFAULT_PATTERNS`] kernel.
pub fn parse_default(input: &str) -> Result<TimeInterval, ParseError> {
    default_kernel().parse(input)
}

/// Process-wide instance of the bundled kernel.
pub fn default_kernel() -> &'static ParserKernel {
    static KERNEL: std::sync::OnceLock<ParserKernel> = std::sync::OnceLock::new();
    KERNEL.get_or_init(ParserKernel::default)
}
