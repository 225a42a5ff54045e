use std::num::ParseIntError;

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Why a parse was rejected.
///
/// The kind and the offending name are carried so callers can report which
/// argument failed; [`Parser::parse_ok`](crate::Parser::parse_ok) collapses
/// this to a plain boolean for callers that only need pass/fail.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A short flag character with no registered descriptor.
    #[error("unknown short flag: -{0}")]
    UnknownShort(char),

    /// A long name not present in the registry the token resolves against.
    #[error("unknown argument: --{0}")]
    UnknownLong(String),

    /// A value supplied where an integer was declared, but not parseable as
    /// a base-10 signed integer.
    #[error("invalid integer '{value}' for --{name}")]
    InvalidInteger {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// An argument that never received a value.
    #[error("missing value for --{0}")]
    MissingValue(String),

    /// A multi-value argument collected fewer values than its minimum.
    #[error("--{name} needs at least {min} values, got {got}")]
    TooFewValues {
        name: String,
        min: usize,
        got: usize,
    },

    /// Conflicting declarations, detected before any token is examined.
    #[error("declaration conflict: {0}")]
    Declaration(String),
}
