//! # Error Types
//!
//! This module defines the error types used throughout the library.
//!
//! Three public error families cover the three stages a sentence goes through:
//!
//! - [`FramingError`]: the line could not be turned into a [`RawSentence`](crate::RawSentence)
//!   at all. Fatal for that line.
//! - [`FieldError`]: a single field of a framed sentence could not be read as the
//!   requested type. Only that accessor fails; the rest of the sentence stays usable.
//! - [`ArgumentError`]: a setter rejected a value while a sentence was being built.
//!
//! Inside the nom parsers a separate [`Error`] type is used, see [`IResult`].

use nom::error::{ErrorKind, FromExternalError, ParseError};
use std::fmt::Debug;

use crate::{Direction, SentenceId};

/// Holds the result of parsing functions.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`).
///
/// The `Ok` side is a pair containing the remainder of the input (the part of the data that
/// was not parsed) and the produced value. The `Err` side contains an instance of `nom::Err`.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, Error<I, E>>;

/// Error produced by the nom parsers of this crate.
///
/// Callers never see this type directly: framing errors are reported as [`FramingError`]
/// and field conversion errors as [`FieldError`].
#[derive(Debug, PartialEq)]
pub enum Error<I, E> {
    /// The text could not be parsed because its format was invalid.
    ///
    /// This wraps nom's standard parsing errors.
    ParsingError(E),

    /// The text had the right shape but a value was out of its valid range,
    /// e.g. minutes of arc not below 60.
    InvalidField(I),
}

impl<I, E> ParseError<I> for Error<I, E>
where
    E: ParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}

/// A line could not be framed into a sentence.
///
/// Framing errors are fatal for the line they were produced for. The parser never retries;
/// skipping or re-reading lines is up to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    /// The line contains non-ASCII characters.
    #[error("sentence contains non-ASCII characters")]
    NonAscii,

    /// The line does not start with `$` or `!`.
    #[error("sentence does not start with '$' or '!'")]
    MissingSentinel,

    /// The address field could not be split into a talker and a sentence type.
    #[error("invalid address field `{0}`")]
    InvalidAddress(String),

    /// No `*hh` suffix was found while the checksum is required.
    #[error("sentence has no checksum")]
    MissingChecksum,

    /// A `*` delimiter was found, but it is not followed by exactly two hex digits.
    #[error("malformed checksum `{0}`")]
    MalformedChecksum(String),

    /// The checksum of the sentence was corrupt or incorrect.
    #[error("checksum mismatch: calculated {expected:02X}, found {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The line does not end with CRLF while CRLF is required.
    #[error("sentence does not end with CRLF")]
    MissingLineEnding,

    /// The line ends with CR or LF while line endings are forbidden.
    #[error("sentence ends with a line terminator")]
    UnexpectedLineEnding,

    /// The sentence was framed correctly but is not of the requested type.
    #[error("expected {expected} sentence, found `{found}`")]
    UnexpectedSentenceType {
        /// The sentence type that was asked for
        expected: SentenceId,
        /// The sentence type found in the address field
        found: String,
    },
}

/// A field of a framed sentence could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field is empty or the sentence has fewer fields than the requested index.
    ///
    /// This is not a sign of corrupt input: the sentence simply does not carry the datum.
    #[error("field {0} is not available")]
    NotAvailable(usize),

    /// The field is present but its text does not convert to the requested type,
    /// is out of range, or has no mapping in the requested enumeration.
    #[error("field {index} is malformed: `{value}`")]
    Malformed {
        /// 1-based index of the field
        index: usize,
        /// Raw text of the field
        value: String,
    },
}

impl FieldError {
    /// Returns `true` for [`FieldError::NotAvailable`].
    pub fn is_not_available(&self) -> bool {
        matches!(self, FieldError::NotAvailable(_))
    }
}

/// Converts a "field not available" outcome into `None`.
///
/// Useful for fields that are optional by nature (e.g. the DGPS station of a GGA sentence).
/// Malformed fields are still reported as errors.
///
/// ```rust
/// use marine_nmea::{FieldError, OptionalField};
///
/// let missing: Result<f64, FieldError> = Err(FieldError::NotAvailable(3));
/// assert_eq!(missing.optional(), Ok(None));
///
/// let present: Result<f64, FieldError> = Ok(1.5);
/// assert_eq!(present.optional(), Ok(Some(1.5)));
/// ```
pub trait OptionalField<T> {
    /// Maps `NotAvailable` to `Ok(None)` and a value to `Ok(Some(value))`.
    fn optional(self) -> Result<Option<T>, FieldError>;
}

impl<T> OptionalField<T> for Result<T, FieldError> {
    fn optional(self) -> Result<Option<T>, FieldError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(FieldError::NotAvailable(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

/// A setter rejected its argument.
///
/// Setters validate eagerly, so the error is raised by the call that introduces the bad
/// value and the sentence is left unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    /// A numeric value is outside of its valid range.
    #[error("{name} out of range: {value}")]
    OutOfRange {
        /// Name of the value
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The field index is zero or beyond the field count of the sentence.
    #[error("field index {index} out of range for a sentence with {count} fields")]
    FieldIndex {
        /// The rejected 1-based index
        index: usize,
        /// Number of fields of the sentence
        count: usize,
    },

    /// The text contains characters that cannot appear inside a field.
    #[error("invalid field text `{0}`")]
    InvalidText(String),

    /// The talker identifier is not two uppercase letters or digits.
    #[error("invalid talker id `{0}`")]
    InvalidTalker(String),

    /// The sentence type is not three or four uppercase letters or digits.
    #[error("invalid sentence type `{0}`")]
    InvalidSentenceType(String),

    /// The direction is not valid for this value.
    #[error("expected {expected}, found {found}")]
    UnexpectedDirection {
        /// Description of the accepted directions
        expected: &'static str,
        /// The rejected direction
        found: Direction,
    },

    /// More values were given than the sentence has room for.
    #[error("{name} accepts at most {max} values, got {count}")]
    TooManyValues {
        /// Name of the value list
        name: &'static str,
        /// Maximum number of values
        max: usize,
        /// Number of values given
        count: usize,
    },
}

/// Checks that `value` is finite and within `range`.
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    range: impl std::ops::RangeBounds<f64>,
) -> Result<f64, ArgumentError> {
    if value.is_finite() && range.contains(&value) {
        Ok(value)
    } else {
        Err(ArgumentError::OutOfRange { name, value })
    }
}
