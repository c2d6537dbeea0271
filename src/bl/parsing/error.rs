//! Errors raised while parsing
//!
//! Every violation is terminal: the parser stops at the first one and returns it. Each
//! variant names what was expected and what was found, and carries the [`Location`] of the
//! offending token so callers can point at the source.

use crate::bl::token::{Location, TokenStream};
use std::fmt;

/// Construct whose opening and closing names must agree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Program,
    Instruction,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Program => f.write_str("program"),
            Construct::Instruction => f.write_str("instruction"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A required keyword (or other fixed token) is missing
    #[error("expected {expected}, found \"{found}\" at {at}")]
    UnexpectedToken {
        expected: String,
        found: String,
        at: Location,
    },

    #[error("expected an identifier {role}, found \"{found}\" at {at}")]
    ExpectedIdentifier {
        role: &'static str,
        found: String,
        at: Location,
    },

    #[error("expected a condition, found \"{found}\" at {at}")]
    ExpectedCondition { found: String, at: Location },

    #[error("{construct} \"{start}\" is closed by \"END {end}\" at {at}; the names must match")]
    NameMismatch {
        construct: Construct,
        start: String,
        end: String,
        at: Location,
    },

    #[error("instruction \"{name}\" is already defined (redefined at {at})")]
    DuplicateInstruction { name: String, at: Location },

    #[error("instruction \"{name}\" at {at} redefines a primitive instruction")]
    PrimitiveRedefinition { name: String, at: Location },

    #[error("unexpected end of input at {at}, expected {expected}")]
    UnexpectedEndOfInput { expected: String, at: Location },

    #[error("expected end of input after the program, found \"{found}\" at {at}")]
    TrailingInput { found: String, at: Location },

    #[error("statements nested deeper than {limit} levels at {at}")]
    NestingTooDeep { limit: usize, at: Location },
}

impl ParseError {
    pub fn location(&self) -> &Location {
        match self {
            ParseError::UnexpectedToken { at, .. }
            | ParseError::ExpectedIdentifier { at, .. }
            | ParseError::ExpectedCondition { at, .. }
            | ParseError::NameMismatch { at, .. }
            | ParseError::DuplicateInstruction { at, .. }
            | ParseError::PrimitiveRedefinition { at, .. }
            | ParseError::UnexpectedEndOfInput { at, .. }
            | ParseError::TrailingInput { at, .. }
            | ParseError::NestingTooDeep { at, .. } => at,
        }
    }

    /// `UnexpectedEndOfInput` if the stream is exhausted, `UnexpectedToken` otherwise
    pub(crate) fn unexpected(tokens: &TokenStream, expected: impl Into<String>) -> Self {
        let at = tokens.location();
        if tokens.is_at_end() {
            ParseError::UnexpectedEndOfInput {
                expected: expected.into(),
                at,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: tokens.front().text.clone(),
                at,
            }
        }
    }
}

/// Type alias for parser results
pub type ParseResult<T> = Result<T, ParseError>;

/// Format source code context around an error location
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, location: &Location) -> String {
    let offset = location.span.start.min(source.len());
    let error_line = source
        .get(..offset)
        .map_or(0, |before| before.matches('\n').count());
    let lines: Vec<&str> = source.lines().collect();

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }
    context
}
