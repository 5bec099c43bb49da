//! # Position and Time Composer
//!
//! Builds [`Position`]s, times and dates out of one or more raw fields, and formats them
//! back into field text.
//!
//! Coordinates are written as degrees immediately followed by minutes: `ddmm.mmm` for
//! latitude, `dddmm.mmm` for longitude. Decimal degrees are `degrees + minutes / 60`.

use nom::{
    Parser,
    branch::alt,
    character::complete::{char, digit1},
    combinator::{opt, recognize},
    sequence::preceded,
};
use time::{Date, Month, Time};

use crate::{
    ArgumentError, Direction, Error, FieldError, FieldIndex, IResult, NmeaEnum, NmeaParse,
    Position, RawSentence, parsing::fixed_width,
};

/// Two-digit years up to and including this value are in the 2000s, the rest in the 1900s.
///
/// `99` is 1999, `05` is 2005, `80` is 2080 and `81` is 1981.
pub const PIVOT_YEAR: i32 = 80;

/// Resolves a two-digit year against [`PIVOT_YEAR`]. Years of 100 and above are returned
/// unchanged.
///
/// ```rust
/// use marine_nmea::nmea_content::parse::resolve_year;
///
/// assert_eq!(resolve_year(99), 1999);
/// assert_eq!(resolve_year(5), 2005);
/// assert_eq!(resolve_year(2004), 2004);
/// ```
pub fn resolve_year(year: i32) -> i32 {
    if year <= PIVOT_YEAR {
        year + 2000
    } else if year < 100 {
        year + 1900
    } else {
        year
    }
}

fn invalid<T>(i: &str) -> IResult<&str, T> {
    Err(nom::Err::Error(Error::InvalidField(i)))
}

/// Plain decimal minutes, `mm[.mmm]`. No sign and no exponent.
fn decimal_minutes(i: &str) -> IResult<&str, f64> {
    let (rest, text) = recognize((digit1, opt((char('.'), digit1)))).parse(i)?;
    match text.parse::<f64>() {
        Ok(minutes) => Ok((rest, minutes)),
        Err(_) => invalid(i),
    }
}

/// Parses `d…dmm.mmm` with a fixed number of degree digits into decimal degrees.
fn degrees_minutes(i: &str, width: usize, max: f64) -> IResult<&str, f64> {
    let (rest, (degrees, minutes)) = (fixed_width(width, u16::parse), decimal_minutes).parse(i)?;

    if !(0.0..60.0).contains(&minutes) {
        return invalid(i);
    }

    let value = f64::from(degrees) + minutes / 60.0;
    if value > max {
        return invalid(i);
    }

    Ok((rest, value))
}

/// Latitude magnitude of a `ddmm.mmm` field, in decimal degrees.
pub struct Latitude(pub f64);

impl NmeaParse for Latitude {
    fn parse(i: &str) -> IResult<&str, Self> {
        let (i, value) = degrees_minutes(i, 2, 90.0)?;
        Ok((i, Latitude(value)))
    }
}

/// Longitude magnitude of a `dddmm.mmm` field, in decimal degrees.
pub struct Longitude(pub f64);

impl NmeaParse for Longitude {
    fn parse(i: &str) -> IResult<&str, Self> {
        let (i, value) = degrees_minutes(i, 3, 180.0)?;
        Ok((i, Longitude(value)))
    }
}

impl NmeaParse for Time {
    /// Parses `hhmmss` with an optional fraction of a second of any length.
    ///
    /// Fractions are kept to nanosecond precision.
    fn parse(i: &str) -> IResult<&str, Self> {
        let start = i;
        let (i, (hour, minute, second, fraction)) = (
            fixed_width(2, u8::parse),
            fixed_width(2, u8::parse),
            fixed_width(2, u8::parse),
            opt(preceded(char('.'), digit1)),
        )
            .parse(i)?;

        let nanos = match fraction {
            Some(fraction) => {
                let digits: String = fraction
                    .chars()
                    .chain(std::iter::repeat('0'))
                    .take(9)
                    .collect();
                match digits.parse::<u32>() {
                    Ok(nanos) => nanos,
                    Err(_) => return invalid(start),
                }
            }
            None => 0,
        };

        match Time::from_hms_nano(hour, minute, second, nanos) {
            Ok(time) => Ok((i, time)),
            Err(_) => invalid(start),
        }
    }
}

impl NmeaParse for Date {
    /// Parses `ddmmyy` or `ddmmyyyy`. Two-digit years go through [`resolve_year`].
    fn parse(i: &str) -> IResult<&str, Self> {
        let start = i;
        let (i, (day, month, year)) = (
            fixed_width(2, u8::parse),
            fixed_width(2, u8::parse),
            alt((
                fixed_width(4, u16::parse).map(i32::from),
                fixed_width(2, u16::parse)
                    .map(|year| resolve_year(i32::from(year))),
            )),
        )
            .parse(i)?;

        match calendar_date(year, month, day) {
            Some(date) => Ok((i, date)),
            None => invalid(start),
        }
    }
}

/// Builds a date from a 1-based month.
pub(crate) fn calendar_date(year: i32, month: u8, day: u8) -> Option<Date> {
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Reads the latitude magnitude of a `ddmm.mmm` field.
///
/// Fails with [`FieldError::Malformed`] when the degrees are not two digits, the minutes
/// are not in `[0, 60)`, or the result exceeds 90 degrees.
pub fn latitude(raw: &RawSentence, index: impl FieldIndex) -> Result<f64, FieldError> {
    raw.value::<Latitude>(index).map(|Latitude(value)| value)
}

/// Reads the longitude magnitude of a `dddmm.mmm` field.
pub fn longitude(raw: &RawSentence, index: impl FieldIndex) -> Result<f64, FieldError> {
    raw.value::<Longitude>(index).map(|Longitude(value)| value)
}

/// Reads a `N`/`S` field. Any other direction, `E` and `W` included, is malformed.
pub fn lat_hemisphere(raw: &RawSentence, index: impl FieldIndex) -> Result<Direction, FieldError> {
    match raw.enumerated(index)? {
        direction @ (Direction::North | Direction::South) => Ok(direction),
        _ => Err(raw.malformed(index)),
    }
}

/// Reads an `E`/`W` field. Any other direction, `N` and `S` included, is malformed.
pub fn lon_hemisphere(raw: &RawSentence, index: impl FieldIndex) -> Result<Direction, FieldError> {
    match raw.enumerated(index)? {
        direction @ (Direction::East | Direction::West) => Ok(direction),
        _ => Err(raw.malformed(index)),
    }
}

/// Reads the four consecutive fields latitude, `N`/`S`, longitude, `E`/`W` starting at
/// `first`.
///
/// ```rust
/// use marine_nmea::{Direction, Nmea0183Parser, nmea_content::parse::position};
///
/// let raw = Nmea0183Parser::new()
///     .frame("$GPWPL,5536.200,N,01436.500,E,RUSKI*1F")
///     .unwrap();
///
/// let position = position(&raw, 1).unwrap();
/// assert!((position.latitude() - 55.603333).abs() < 1e-6);
/// assert!((position.longitude() - 14.608333).abs() < 1e-6);
/// assert_eq!(position.lat_hemisphere(), Direction::North);
/// ```
pub fn position(raw: &RawSentence, first: usize) -> Result<Position, FieldError> {
    let latitude = latitude(raw, first)?;
    let lat_hemisphere = lat_hemisphere(raw, first + 1)?;
    let longitude = longitude(raw, first + 2)?;
    let lon_hemisphere = lon_hemisphere(raw, first + 3)?;

    // magnitudes and axes are checked by the field parsers above
    Position::from_hemispheres(
        latitude,
        lat_hemisphere,
        longitude,
        lon_hemisphere,
    )
    .map_err(|_| raw.malformed(first))
}

/// Reads an `hhmmss[.sss]` field.
pub fn time(raw: &RawSentence, index: impl FieldIndex) -> Result<Time, FieldError> {
    raw.value(index)
}

/// Reads a `ddmmyy` field, see [`PIVOT_YEAR`].
pub fn date(raw: &RawSentence, index: impl FieldIndex) -> Result<Date, FieldError> {
    raw.value(index)
}

/// Splits a magnitude in degrees into whole degrees and thousandths of minutes.
fn degrees_and_minutes(magnitude: f64) -> (u32, u32) {
    let mut degrees = magnitude.trunc() as u32;
    let mut thousandths = ((magnitude - magnitude.trunc()) * 60_000.0).round() as u32;
    if thousandths >= 60_000 {
        degrees += 1;
        thousandths -= 60_000;
    }
    (degrees, thousandths)
}

/// Formats a latitude magnitude as `ddmm.mmm`. The sign is ignored.
///
/// ```rust
/// use marine_nmea::nmea_content::parse::{format_latitude, format_longitude};
///
/// assert_eq!(format_latitude(55.0 + 36.2 / 60.0), "5536.200");
/// assert_eq!(format_longitude(-(14.0 + 36.5 / 60.0)), "01436.500");
/// ```
pub fn format_latitude(latitude: f64) -> String {
    let (degrees, thousandths) = degrees_and_minutes(latitude.abs());
    let (minutes, fraction) = (thousandths / 1000, thousandths % 1000);
    format!("{degrees:02}{minutes:02}.{fraction:03}")
}

/// Formats a longitude magnitude as `dddmm.mmm`. The sign is ignored.
pub fn format_longitude(longitude: f64) -> String {
    let (degrees, thousandths) = degrees_and_minutes(longitude.abs());
    let (minutes, fraction) = (thousandths / 1000, thousandths % 1000);
    format!("{degrees:03}{minutes:02}.{fraction:03}")
}

/// Formats a time as `hhmmss`, followed by the fraction of a second when it is not zero.
///
/// ```rust
/// use marine_nmea::nmea_content::parse::format_time;
/// use time::Time;
///
/// assert_eq!(format_time(Time::from_hms(12, 0, 44).unwrap()), "120044");
/// assert_eq!(format_time(Time::from_hms_milli(12, 0, 44, 567).unwrap()), "120044.567");
/// ```
pub fn format_time(time: Time) -> String {
    let mut text = format!(
        "{:02}{:02}{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );

    if time.nanosecond() != 0 {
        let fraction = format!("{:09}", time.nanosecond());
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }

    text
}

/// Formats a date as `ddmmyy`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.day(),
        u8::from(date.month()),
        date.year().rem_euclid(100)
    )
}

/// Formats a decimal value with the shortest text that parses back to the same value.
///
/// The text always has a decimal point and never uses an exponent.
///
/// ```rust
/// use marine_nmea::nmea_content::parse::format_decimal;
///
/// assert_eq!(format_decimal(432.3), "432.3");
/// assert_eq!(format_decimal(360.0), "360.0");
/// assert_eq!(format_decimal(-0.5), "-0.5");
/// ```
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

/// Writes a position into four consecutive fields starting at `first`.
///
/// Either all four fields are written or none.
pub fn set_position(
    raw: &mut RawSentence,
    first: usize,
    position: &Position,
) -> Result<(), ArgumentError> {
    raw.check_index(first)?;
    raw.check_index(first + 3)?;

    raw.set_string(first, &format_latitude(position.latitude()))?;
    raw.set_char(first + 1, position.lat_hemisphere().to_char())?;
    raw.set_string(first + 2, &format_longitude(position.longitude()))?;
    raw.set_char(first + 3, position.lon_hemisphere().to_char())
}

pub fn set_time(
    raw: &mut RawSentence,
    index: impl FieldIndex,
    time: Time,
) -> Result<(), ArgumentError> {
    raw.set_string(index, &format_time(time))
}

pub fn set_date(
    raw: &mut RawSentence,
    index: impl FieldIndex,
    date: Date,
) -> Result<(), ArgumentError> {
    raw.set_string(index, &format_date(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Nmea0183Parser, SentenceId, TalkerId};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn fields(values: &[&str]) -> RawSentence {
        let mut raw = RawSentence::with_type(TalkerId::GP, "XXX", values.len())
            .unwrap();
        for (i, value) in values.iter().enumerate() {
            raw.set_string(i + 1, value).unwrap();
        }
        raw
    }

    #[test]
    fn test_resolve_year() {
        assert_eq!(resolve_year(0), 2000);
        assert_eq!(resolve_year(80), 2080);
        assert_eq!(resolve_year(81), 1981);
        assert_eq!(resolve_year(99), 1999);
        assert_eq!(resolve_year(100), 100);
    }

    #[test]
    fn test_latitude() {
        let raw = fields(&[
            "6011.552", "0000.000", "9000.000", "9000.001", "6060.000", "6.11552", "60x1.5",
        ]);

        assert!(approx(latitude(&raw, 1).unwrap(), 60.0 + 11.552 / 60.0));
        assert_eq!(latitude(&raw, 2), Ok(0.0));
        assert_eq!(latitude(&raw, 3), Ok(90.0));
        assert!(matches!(
            latitude(&raw, 4),
            Err(FieldError::Malformed { .. })
        ));
        assert!(matches!(
            latitude(&raw, 5),
            Err(FieldError::Malformed { .. })
        ));
        assert!(matches!(
            latitude(&raw, 6),
            Err(FieldError::Malformed { .. })
        ));
        assert!(matches!(
            latitude(&raw, 7),
            Err(FieldError::Malformed { .. })
        ));
        assert_eq!(latitude(&raw, 8), Err(FieldError::NotAvailable(8)));
    }

    #[test]
    fn test_longitude() {
        let raw = fields(&["02501.941", "18000.000", "18000.500", "2501.941"]);

        assert!(approx(longitude(&raw, 1).unwrap(), 25.0 + 1.941 / 60.0));
        assert_eq!(longitude(&raw, 2), Ok(180.0));
        assert!(longitude(&raw, 3).is_err());
        // degrees are always three digits: 250 degrees and 1.941 minutes
        assert!(matches!(
            longitude(&raw, 4),
            Err(FieldError::Malformed { .. })
        ));
    }

    #[test]
    fn test_minutes_are_plain_decimals() {
        let raw = fields(&[
            "5536", "553.62e1", "55+36.2", "55-36.2", "5536.", "55 36.2",
        ]);

        assert!(approx(latitude(&raw, 1).unwrap(), 55.6));
        for index in 2..=6 {
            assert!(
                matches!(latitude(&raw, index), Err(FieldError::Malformed { .. })),
                "{index}"
            );
        }
        let raw = fields(&["01436.5e0"]);
        assert!(matches!(
            longitude(&raw, 1),
            Err(FieldError::Malformed { index: 1, .. })
        ));
    }

    #[test]
    fn test_hemispheres() {
        let raw = fields(&["N", "S", "E", "W", "X", ""]);

        assert_eq!(lat_hemisphere(&raw, 1), Ok(Direction::North));
        assert_eq!(lat_hemisphere(&raw, 2), Ok(Direction::South));
        assert!(matches!(
            lat_hemisphere(&raw, 3),
            Err(FieldError::Malformed { index: 3, .. })
        ));
        assert_eq!(lon_hemisphere(&raw, 3), Ok(Direction::East));
        assert_eq!(lon_hemisphere(&raw, 4), Ok(Direction::West));
        assert!(matches!(
            lon_hemisphere(&raw, 1),
            Err(FieldError::Malformed { index: 1, .. })
        ));
        assert!(matches!(
            lon_hemisphere(&raw, 5),
            Err(FieldError::Malformed { .. })
        ));
        assert_eq!(lon_hemisphere(&raw, 6), Err(FieldError::NotAvailable(6)));
    }

    #[test]
    fn test_position_signs() {
        let raw = fields(&["3351.408", "S", "15112.918", "W"]);
        let position = position(&raw, 1).unwrap();

        assert!(approx(position.latitude(), -(33.0 + 51.408 / 60.0)));
        assert!(approx(position.longitude(), -(151.0 + 12.918 / 60.0)));
        assert_eq!(position.lon_hemisphere(), Direction::West);
    }

    #[test]
    fn test_time() {
        let raw = fields(&[
            "120044.567",
            "120044",
            "235959.1234567891",
            "240000",
            "1200",
            "120044.",
        ]);

        assert_eq!(
            time(&raw, 1),
            Ok(Time::from_hms_milli(12, 0, 44, 567).unwrap())
        );
        assert_eq!(time(&raw, 2), Ok(Time::from_hms(12, 0, 44).unwrap()));
        assert_eq!(
            time(&raw, 3),
            Ok(Time::from_hms_nano(23, 59, 59, 123_456_789).unwrap())
        );
        assert!(matches!(
            time(&raw, 4),
            Err(FieldError::Malformed { .. })
        ));
        assert!(matches!(
            time(&raw, 5),
            Err(FieldError::Malformed { .. })
        ));
        assert!(matches!(
            time(&raw, 6),
            Err(FieldError::Malformed { .. })
        ));
    }

    #[test]
    fn test_date() {
        let raw = fields(&[
            "160705", "160799", "07082004", "310299", "161399", "1607",
        ]);

        assert_eq!(date(&raw, 1), Ok(calendar_date(2005, 7, 16).unwrap()));
        assert_eq!(date(&raw, 2), Ok(calendar_date(1999, 7, 16).unwrap()));
        assert_eq!(date(&raw, 3), Ok(calendar_date(2004, 8, 7).unwrap()));
        assert!(matches!(
            date(&raw, 4),
            Err(FieldError::Malformed { .. })
        ));
        assert!(matches!(
            date(&raw, 5),
            Err(FieldError::Malformed { .. })
        ));
        assert!(matches!(
            date(&raw, 6),
            Err(FieldError::Malformed { .. })
        ));
    }

    #[test]
    fn test_date_month_is_one_based() {
        let date = calendar_date(2005, 1, 16).unwrap();
        assert_eq!(date.month(), Month::January);
        assert_eq!(format_date(date), "160105");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_latitude(60.0 + 11.552 / 60.0), "6011.552");
        assert_eq!(format_latitude(0.0), "0000.000");
        assert_eq!(format_latitude(59.9999999), "6000.000");
        assert_eq!(format_longitude(25.0 + 1.941 / 60.0), "02501.941");
        assert_eq!(format_longitude(180.0), "18000.000");
    }

    #[test]
    fn test_format_time_and_date() {
        assert_eq!(
            format_time(Time::from_hms_nano(3, 29, 15, 100_000_000).unwrap()),
            "032915.1"
        );
        assert_eq!(
            format_date(calendar_date(1999, 12, 31).unwrap()),
            "311299"
        );
    }

    #[test]
    fn test_set_position() {
        let mut raw = RawSentence::new(TalkerId::GP, SentenceId::WPL, 5);
        let position = Position::from_hemispheres(
            0.0,
            Direction::South,
            14.0 + 36.5 / 60.0,
            Direction::East,
        )
        .unwrap();

        set_position(&mut raw, 1, &position).unwrap();
        assert_eq!(raw.string(1), Ok("0000.000"));
        assert_eq!(raw.string(2), Ok("S"));
        assert_eq!(raw.string(3), Ok("01436.500"));
        assert_eq!(raw.string(4), Ok("E"));

        let read = super::position(&raw, 1).unwrap();
        assert_eq!(read.lat_hemisphere(), Direction::South);
        assert!(approx(read.longitude(), position.longitude()));

        // would run past the last field
        assert!(set_position(&mut raw, 3, &position).is_err());
        assert_eq!(raw.string(3), Ok("01436.500"));
    }

    #[test]
    fn test_framed_position() {
        let raw = Nmea0183Parser::new()
            .frame("$GPGLL,6011.552,N,02501.941,E,120045,A*26")
            .unwrap();

        let position = position(&raw, 1).unwrap();
        assert!(approx(position.latitude(), 60.0 + 11.552 / 60.0));
        assert!(approx(position.longitude(), 25.0 + 1.941 / 60.0));
    }
}
