use time::Time;

use crate::{
    self as marine_nmea, ArgumentError, FieldError, GpsFixQuality, NmeaEnum, Position,
    RawSentence, Sentence, Units,
    error::check_range,
    nmea_content::{
        parse,
        sentences::{set_padded, set_with_unit},
    },
};

field_layout! {
    /// Fields of a [`GGA`] sentence
    pub enum GgaField {
        Time = 1,
        Latitude = 2,
        LatHemisphere = 3,
        Longitude = 4,
        LonHemisphere = 5,
        FixQuality = 6,
        SatelliteCount = 7,
        HorizontalDop = 8,
        Altitude = 9,
        AltitudeUnits = 10,
        GeoidalHeight = 11,
        GeoidalHeightUnits = 12,
        DgpsAge = 13,
        DgpsStationId = 14,
    }
}

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |  |  |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,ddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(GGA), fields(14))]
pub struct GGA {
    raw: RawSentence,
}

impl GGA {
    /// Fix time in UTC
    pub fn time(&self) -> Result<Time, FieldError> {
        parse::time(&self.raw, GgaField::Time)
    }

    pub fn position(&self) -> Result<Position, FieldError> {
        parse::position(&self.raw, GgaField::Latitude as usize)
    }

    pub fn fix_quality(&self) -> Result<GpsFixQuality, FieldError> {
        self.raw.enumerated(GgaField::FixQuality)
    }

    /// Number of satellites in use
    pub fn satellite_count(&self) -> Result<u8, FieldError> {
        self.raw.value(GgaField::SatelliteCount)
    }

    /// Horizontal dilution of precision
    pub fn horizontal_dop(&self) -> Result<f64, FieldError> {
        self.raw.double(GgaField::HorizontalDop)
    }

    /// Antenna altitude above mean sea level, see [`GGA::altitude_units`]
    pub fn altitude(&self) -> Result<f64, FieldError> {
        self.raw.double(GgaField::Altitude)
    }

    pub fn altitude_units(&self) -> Result<Units, FieldError> {
        self.raw.enumerated(GgaField::AltitudeUnits)
    }

    /// Height of the geoid above the WGS84 ellipsoid, see [`GGA::geoidal_height_units`]
    pub fn geoidal_height(&self) -> Result<f64, FieldError> {
        self.raw.double(GgaField::GeoidalHeight)
    }

    pub fn geoidal_height_units(&self) -> Result<Units, FieldError> {
        self.raw.enumerated(GgaField::GeoidalHeightUnits)
    }

    /// Seconds since the last DGPS update
    pub fn dgps_age(&self) -> Result<f64, FieldError> {
        self.raw.double(GgaField::DgpsAge)
    }

    pub fn dgps_station_id(&self) -> Result<&str, FieldError> {
        self.raw.string(GgaField::DgpsStationId)
    }

    pub fn set_time(&mut self, time: Time) -> Result<(), ArgumentError> {
        parse::set_time(&mut self.raw, GgaField::Time, time)
    }

    pub fn set_position(&mut self, position: &Position) -> Result<(), ArgumentError> {
        parse::set_position(&mut self.raw, GgaField::Latitude as usize, position)
    }

    pub fn set_fix_quality(&mut self, quality: GpsFixQuality) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(GgaField::FixQuality, quality)
    }

    pub fn set_satellite_count(&mut self, count: u8) -> Result<(), ArgumentError> {
        set_padded(&mut self.raw, GgaField::SatelliteCount, u16::from(count))
    }

    /// Sets the horizontal dilution of precision, not negative.
    pub fn set_horizontal_dop(&mut self, hdop: f64) -> Result<(), ArgumentError> {
        let hdop = check_range("horizontal dilution of precision", hdop, 0.0..)?;
        self.raw.set_double(GgaField::HorizontalDop, hdop)
    }

    pub fn set_altitude(&mut self, altitude: f64, units: Units) -> Result<(), ArgumentError> {
        let altitude = check_range("altitude", altitude, ..)?;
        set_with_unit(&mut self.raw, GgaField::Altitude, altitude, units.to_char())
    }

    pub fn set_geoidal_height(&mut self, height: f64, units: Units) -> Result<(), ArgumentError> {
        let height = check_range("geoidal height", height, ..)?;
        let units = units.to_char();
        set_with_unit(&mut self.raw, GgaField::GeoidalHeight, height, units)
    }

    /// Sets the age of the DGPS data in seconds, not negative.
    pub fn set_dgps_age(&mut self, age: f64) -> Result<(), ArgumentError> {
        let age = check_range("DGPS age", age, 0.0..)?;
        self.raw.set_double(GgaField::DgpsAge, age)
    }

    pub fn set_dgps_station_id(&mut self, id: &str) -> Result<(), ArgumentError> {
        self.raw.set_string(GgaField::DgpsStationId, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, OptionalField, TalkerId};

    const GGA_LINE: &str =
        "$GPGGA,120044.567,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*63";

    #[test]
    fn test_gga_getters() {
        let gga = GGA::parse(GGA_LINE).unwrap();

        assert_eq!(
            gga.time(),
            Ok(Time::from_hms_milli(12, 0, 44, 567).unwrap())
        );
        let position = gga.position().unwrap();
        assert_eq!(position.lat_hemisphere(), Direction::North);
        assert!((position.latitude() - (60.0 + 11.552 / 60.0)).abs() < 1e-9);
        assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::GPSFix));
        assert_eq!(gga.satellite_count(), Ok(0));
        assert_eq!(gga.horizontal_dop(), Ok(2.0));
        assert_eq!(gga.altitude(), Ok(28.0));
        assert_eq!(gga.altitude_units(), Ok(Units::Meter));
        assert_eq!(gga.geoidal_height(), Ok(19.6));
        assert_eq!(gga.geoidal_height_units(), Ok(Units::Meter));
        assert_eq!(gga.dgps_age().optional(), Ok(None));
        assert_eq!(gga.dgps_station_id(), Err(FieldError::NotAvailable(14)));
    }

    #[test]
    fn test_gga_build() {
        let source = GGA::parse(GGA_LINE).unwrap();
        let mut gga = GGA::new(TalkerId::GP);

        gga.set_time(source.time().unwrap()).unwrap();
        gga.set_position(&source.position().unwrap()).unwrap();
        gga.set_fix_quality(GpsFixQuality::GPSFix).unwrap();
        gga.set_satellite_count(0).unwrap();
        gga.set_horizontal_dop(2.0).unwrap();
        gga.set_altitude(28.0, Units::Meter).unwrap();
        gga.set_geoidal_height(19.6, Units::Meter).unwrap();

        assert_eq!(gga.to_string(), GGA_LINE);
    }

    #[test]
    fn test_gga_setter_validation() {
        let mut gga = GGA::new(TalkerId::GN);

        assert!(gga.set_horizontal_dop(-1.0).is_err());
        assert!(gga.set_dgps_age(-0.5).is_err());
        assert!(gga.set_altitude(f64::INFINITY, Units::Meter).is_err());
        assert!(gga.set_altitude(-12.5, Units::Feet).is_ok());
        assert_eq!(gga.altitude(), Ok(-12.5));
        assert_eq!(gga.altitude_units(), Ok(Units::Feet));
        assert!(gga.horizontal_dop().unwrap_err().is_not_available());
    }

    #[test]
    fn test_gga_malformed_quality() {
        let mut gga = GGA::new(TalkerId::GP);
        gga.raw_mut().set_string(GgaField::FixQuality, "9").unwrap();

        assert!(matches!(
            gga.fix_quality(),
            Err(FieldError::Malformed { index: 6, .. })
        ));
    }
}
