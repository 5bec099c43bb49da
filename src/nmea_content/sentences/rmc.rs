use time::{Date, PrimitiveDateTime, Time};

use crate::{
    self as marine_nmea, ArgumentError, DataStatus, Direction, FieldError, GpsMode, NmeaEnum,
    Position, RawSentence, Sentence,
    error::check_range,
    nmea_content::{parse, sentences::set_with_unit},
};

field_layout! {
    /// Fields of an [`RMC`] sentence
    pub enum RmcField {
        Time = 1,
        Status = 2,
        Latitude = 3,
        LatHemisphere = 4,
        Longitude = 5,
        LonHemisphere = 6,
        Speed = 7,
        Course = 8,
        Date = 9,
        Variation = 10,
        VariationDirection = 11,
        Mode = 12,
    }
}

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///                                                            12
///         1         2 3       4 5        6  7   8   9    10 11|
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
///
/// The magnetic variation is signed: easterly variation is negative, westerly positive.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(RMC), fields(12))]
pub struct RMC {
    raw: RawSentence,
}

impl RMC {
    /// Fix time in UTC
    pub fn time(&self) -> Result<Time, FieldError> {
        parse::time(&self.raw, RmcField::Time)
    }

    pub fn status(&self) -> Result<DataStatus, FieldError> {
        self.raw.enumerated(RmcField::Status)
    }

    pub fn position(&self) -> Result<Position, FieldError> {
        parse::position(&self.raw, RmcField::Latitude as usize)
    }

    /// Speed over ground in knots
    pub fn speed(&self) -> Result<f64, FieldError> {
        self.raw.double(RmcField::Speed)
    }

    /// Track made good in degrees true
    pub fn course(&self) -> Result<f64, FieldError> {
        self.raw.double(RmcField::Course)
    }

    /// Fix date, two-digit years are resolved with [`PIVOT_YEAR`](parse::PIVOT_YEAR).
    pub fn date(&self) -> Result<Date, FieldError> {
        parse::date(&self.raw, RmcField::Date)
    }

    pub fn date_time(&self) -> Result<PrimitiveDateTime, FieldError> {
        Ok(PrimitiveDateTime::new(self.date()?, self.time()?))
    }

    /// Direction of the magnetic variation, `East` or `West`.
    pub fn direction_of_variation(&self) -> Result<Direction, FieldError> {
        parse::lon_hemisphere(&self.raw, RmcField::VariationDirection)
    }

    /// Magnetic variation in degrees, negative when easterly.
    ///
    /// ```rust
    /// use marine_nmea::{RMC, Sentence};
    ///
    /// let rmc = RMC::parse(
    ///     "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(rmc.variation(), Ok(-6.1));
    /// assert_eq!(rmc.corrected_course(), Ok(353.9));
    /// ```
    pub fn variation(&self) -> Result<f64, FieldError> {
        let magnitude = self.raw.double(RmcField::Variation)?;
        match self.direction_of_variation()? {
            Direction::East => Ok(-magnitude),
            _ => Ok(magnitude),
        }
    }

    /// Course corrected with the magnetic variation.
    pub fn corrected_course(&self) -> Result<f64, FieldError> {
        Ok(self.course()? + self.variation()?)
    }

    /// FAA mode indicator, only present since NMEA 2.3
    pub fn mode(&self) -> Result<GpsMode, FieldError> {
        self.raw.enumerated(RmcField::Mode)
    }

    pub fn set_time(&mut self, time: Time) -> Result<(), ArgumentError> {
        parse::set_time(&mut self.raw, RmcField::Time, time)
    }

    pub fn set_status(&mut self, status: DataStatus) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(RmcField::Status, status)
    }

    pub fn set_position(&mut self, position: &Position) -> Result<(), ArgumentError> {
        parse::set_position(&mut self.raw, RmcField::Latitude as usize, position)
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), ArgumentError> {
        let speed = check_range("speed", speed, 0.0..)?;
        self.raw.set_double(RmcField::Speed, speed)
    }

    /// Sets the course over ground, in `[0, 360)`.
    pub fn set_course(&mut self, course: f64) -> Result<(), ArgumentError> {
        let course = check_range("course", course, 0.0..360.0)?;
        self.raw.set_double(RmcField::Course, course)
    }

    /// Sets the date. The year must be within the two-digit year window, 1981 to 2080.
    pub fn set_date(&mut self, date: Date) -> Result<(), ArgumentError> {
        let date = check_year(date)?;
        parse::set_date(&mut self.raw, RmcField::Date, date)
    }

    /// Sets the date and the time, or neither.
    pub fn set_date_time(&mut self, date_time: PrimitiveDateTime) -> Result<(), ArgumentError> {
        let date = check_year(date_time.date())?;

        let mut raw = self.raw.clone();
        parse::set_date(&mut raw, RmcField::Date, date)?;
        parse::set_time(&mut raw, RmcField::Time, date_time.time())?;

        self.raw = raw;
        Ok(())
    }

    /// Sets the magnetic variation in `[-180, 180]`, negative when easterly.
    pub fn set_variation(&mut self, variation: f64) -> Result<(), ArgumentError> {
        let variation = check_range("variation", variation, -180.0..=180.0)?;
        let direction = if variation < 0.0 {
            Direction::East
        } else {
            Direction::West
        };
        set_with_unit(
            &mut self.raw,
            RmcField::Variation,
            variation.abs(),
            direction.to_char(),
        )
    }

    pub fn set_mode(&mut self, mode: GpsMode) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(RmcField::Mode, mode)
    }
}

/// A year written with two digits must resolve back to itself.
fn check_year(date: Date) -> Result<Date, ArgumentError> {
    let first = parse::resolve_year(parse::PIVOT_YEAR + 1);
    if (first..first + 100).contains(&date.year()) {
        Ok(date)
    } else {
        Err(ArgumentError::OutOfRange {
            name: "year",
            value: f64::from(date.year()),
        })
    }
}
