use time::Time;

use crate::{
    self as marine_nmea, ArgumentError, DataStatus, FieldError, GpsMode, Position, RawSentence,
    Sentence, nmea_content::parse,
};

field_layout! {
    /// Fields of a [`GLL`] sentence
    pub enum GllField {
        Latitude = 1,
        LatHemisphere = 2,
        Longitude = 3,
        LonHemisphere = 4,
        Time = 5,
        Status = 6,
        Mode = 7,
    }
}

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
///
/// The mode indicator was added in NMEA 2.3 and is not available in older sentences.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(GLL), fields(7))]
pub struct GLL {
    raw: RawSentence,
}

impl GLL {
    pub fn position(&self) -> Result<Position, FieldError> {
        parse::position(&self.raw, GllField::Latitude as usize)
    }

    /// Fix time in UTC
    pub fn time(&self) -> Result<Time, FieldError> {
        parse::time(&self.raw, GllField::Time)
    }

    pub fn status(&self) -> Result<DataStatus, FieldError> {
        self.raw.enumerated(GllField::Status)
    }

    pub fn mode(&self) -> Result<GpsMode, FieldError> {
        self.raw.enumerated(GllField::Mode)
    }

    pub fn set_position(&mut self, position: &Position) -> Result<(), ArgumentError> {
        parse::set_position(&mut self.raw, GllField::Latitude as usize, position)
    }

    pub fn set_time(&mut self, time: Time) -> Result<(), ArgumentError> {
        parse::set_time(&mut self.raw, GllField::Time, time)
    }

    pub fn set_status(&mut self, status: DataStatus) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(GllField::Status, status)
    }

    pub fn set_mode(&mut self, mode: GpsMode) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(GllField::Mode, mode)
    }
}
