//! # Parsing Utilities
//!
//! Small nom combinators shared by the field parsers.
//!
//! NMEA fields are parsed one at a time, so a field parser must account for the whole
//! field text: `"12x"` is a malformed integer, not `12` followed by garbage. The
//! combinators here enforce that.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser, bytes::complete::take, error::ErrorKind,
    error::ParseError,
};

/// Ensures that the parser consumes all input.
///
/// Runs `f` and fails with `e` if any input is left over.
///
/// # Examples
///
/// ```rust
/// use marine_nmea::parsing::consumed;
/// use nom::{IResult, Parser, character::complete::digit1, error::ErrorKind};
///
/// let mut parser = consumed(digit1, ErrorKind::Eof);
///
/// let result: IResult<_, _> = parser.parse("0123");
/// assert_eq!(result, Ok(("", "0123")));
///
/// // Trailing text is not silently dropped
/// let result: IResult<_, _> = parser.parse("0123.5");
/// assert!(result.is_err());
/// ```
pub fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    Consumed { f, e }
}

/// Runs `f` on exactly the next `count` characters, which `f` must consume entirely.
///
/// Used for the fixed-width parts of composite fields, e.g. the two degree digits of
/// `ddmm.mmm` or the hour of `hhmmss`.
///
/// # Examples
///
/// ```rust
/// use marine_nmea::parsing::fixed_width;
/// use nom::{IResult, Parser, character::complete::u8};
///
/// let result: IResult<_, _> = fixed_width(2, u8).parse("5536.200");
/// assert_eq!(result, Ok(("36.200", 55)));
///
/// let result: IResult<&str, u8> = fixed_width(2, u8).parse("5");
/// assert!(result.is_err());
/// ```
pub fn fixed_width<I, E: ParseError<I>, F>(
    count: usize,
    f: F,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    take(count).and_then(consumed(f, ErrorKind::Digit))
}

struct Consumed<F> {
    f: F,
    e: ErrorKind,
}

impl<I, F> Parser<I> for Consumed<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, self.e)
            })));
        }

        Ok((i, o))
    }
}
