//! Formatting errors.
//!
//! Every error is local to a single call and carries the byte offset of the
//! `%` that introduced the failing directive. None of them are retryable:
//! the engine is a pure function of its inputs.

use core::fmt;

use thiserror::Error;

/// Why a directive could not be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The format ended in the middle of a directive.
    UnexpectedEnd,
    /// The conversion character is not part of the dialect.
    UnknownConversion(u8),
    /// `0$` was used; positional indices are 1-based.
    ZeroPositionalIndex,
    /// An extension suffix was paired with a conversion other than `s`/`u`.
    ExtensionMismatch { conversion: u8, suffix: u8 },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => f.write_str("format ends inside directive"),
            Self::UnknownConversion(c) => {
                write!(f, "unknown conversion '{}'", c.escape_ascii())
            }
            Self::ZeroPositionalIndex => f.write_str("positional index 0 is not allowed"),
            Self::ExtensionMismatch { conversion, suffix } => write!(
                f,
                "extension '{}' cannot follow conversion '{}'",
                suffix.escape_ascii(),
                conversion.escape_ascii()
            ),
        }
    }
}

/// Error returned by the formatting entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("malformed directive at byte {offset}: {reason}")]
    MalformedDirective {
        offset: usize,
        reason: MalformedReason,
    },
    #[error("%sB at byte {offset} requires an explicit precision")]
    MissingPrecisionForBinary { offset: usize },
    #[error(
        "positional argument {index}$ at byte {offset} is past the {available} supplied arguments"
    )]
    PositionalIndexOutOfRange {
        offset: usize,
        index: usize,
        available: usize,
    },
    #[error("directive at byte {offset} needs more than the {available} supplied arguments")]
    ArgumentsExhausted { offset: usize, available: usize },
    #[error("directive at byte {offset} expects {expected}, argument is {found}")]
    ArgumentTypeMismatch {
        offset: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("%sB at byte {offset} needs {needed} bytes, argument holds {available}")]
    BinaryBufferTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl FormatError {
    /// Stable name of the error kind, used by fixtures and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedDirective { .. } => "MalformedDirective",
            Self::MissingPrecisionForBinary { .. } => "MissingPrecisionForBinary",
            Self::PositionalIndexOutOfRange { .. } => "PositionalIndexOutOfRange",
            Self::ArgumentsExhausted { .. } => "ArgumentsExhausted",
            Self::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            Self::BinaryBufferTooShort { .. } => "BinaryBufferTooShort",
        }
    }

    /// Byte offset of the `%` that started the failing directive.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match *self {
            Self::MalformedDirective { offset, .. }
            | Self::MissingPrecisionForBinary { offset }
            | Self::PositionalIndexOutOfRange { offset, .. }
            | Self::ArgumentsExhausted { offset, .. }
            | Self::ArgumentTypeMismatch { offset, .. }
            | Self::BinaryBufferTooShort { offset, .. } => offset,
        }
    }
}
