use nom::{Parser, character::complete::anychar, combinator::verify, number::complete::double};

use crate::IResult;

/// Trait for parsing primitive values out of NMEA 0183 field text.
///
/// Implementations are provided for the integer types, `f32`, `f64` and `char`. Parsing
/// is locale-independent: decimal values always use `.` as the decimal separator.
///
/// The parsers are plain nom parsers, so they may leave input unconsumed. The field
/// accessors of [`RawSentence`](crate::RawSentence) wrap them with
/// [`consumed`](crate::parsing::consumed) so a field must be parsed in full.
///
/// # Examples
///
/// ```rust
/// use marine_nmea::{IResult, NmeaParse};
///
/// let result: IResult<_, _> = u8::parse("42");
/// assert_eq!(result, Ok(("", 42)));
///
/// let result: IResult<_, _> = f64::parse("5536.200");
/// assert_eq!(result, Ok(("", 5536.2)));
///
/// // Not a number at all
/// assert!(i32::parse("RUSKI").is_err());
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use marine_nmea::{IResult, NmeaParse};
/// use nom::{Parser, character::complete::char};
///
/// /// Signal strength written as `<dB>d`.
/// struct Decibels(u8);
///
/// impl NmeaParse for Decibels {
///     fn parse(i: &str) -> IResult<&str, Self> {
///         let (i, value) = u8::parse(i)?;
///         let (i, _) = char('d').parse(i)?;
///         Ok((i, Decibels(value)))
///     }
/// }
///
/// let (_, db) = Decibels::parse("42d").unwrap();
/// assert_eq!(db.0, 42);
/// ```
pub trait NmeaParse: Sized {
    /// Parses a value from the start of `i`, returning the remaining input.
    fn parse(i: &str) -> IResult<&str, Self>;
}

macro_rules! impl_integer_type {
    ($($t:tt),*) => ($(
        impl NmeaParse for $t {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::character::complete::$t.parse(i)
            }
        }
    )*)
}

impl_integer_type!(u8, u16, u32, u64, i8, i16, i32, i64);

impl NmeaParse for f64 {
    fn parse(i: &str) -> IResult<&str, Self> {
        // nom also recognizes "nan" and "inf", neither is a valid NMEA value
        verify(double, |value: &f64| value.is_finite()).parse(i)
    }
}

impl NmeaParse for f32 {
    fn parse(i: &str) -> IResult<&str, Self> {
        verify(f64::parse.map(|value| value as f32), |value: &f32| {
            value.is_finite()
        })
        .parse(i)
    }
}

impl NmeaParse for char {
    fn parse(i: &str) -> IResult<&str, Self> {
        anychar.parse(i)
    }
}
