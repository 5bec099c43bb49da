use crate::{
    self as marine_nmea, ArgumentError, FieldError, RawSentence, Sentence, error::check_range,
    nmea_content::sentences::set_with_unit,
};

field_layout! {
    /// Fields of a [`BOD`] sentence
    pub enum BodField {
        TrueBearing = 1,
        TrueReference = 2,
        MagneticBearing = 3,
        MagneticReference = 4,
        DestinationId = 5,
        OriginId = 6,
    }
}

/// BOD - Bearing - Waypoint to Waypoint
///
/// Bearing from the origin waypoint to the destination waypoint.
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_bod_bearing_waypoint_to_waypoint>
///
/// ```text
///         1   2 3   4 5    6
///         |   | |   | |    |
///  $--BOD,x.x,T,x.x,M,c--c,c--c*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(BOD), fields(6))]
pub struct BOD {
    raw: RawSentence,
}

impl BOD {
    /// True bearing from origin to destination in degrees
    pub fn true_bearing(&self) -> Result<f64, FieldError> {
        self.raw.double(BodField::TrueBearing)
    }

    /// Magnetic bearing from origin to destination in degrees
    pub fn magnetic_bearing(&self) -> Result<f64, FieldError> {
        self.raw.double(BodField::MagneticBearing)
    }

    pub fn destination_id(&self) -> Result<&str, FieldError> {
        self.raw.string(BodField::DestinationId)
    }

    /// Not available when the sentence is not part of an active route.
    pub fn origin_id(&self) -> Result<&str, FieldError> {
        self.raw.string(BodField::OriginId)
    }

    /// Sets the true bearing, in `[0, 360)`.
    pub fn set_true_bearing(&mut self, bearing: f64) -> Result<(), ArgumentError> {
        let bearing = check_range("true bearing", bearing, 0.0..360.0)?;
        set_with_unit(&mut self.raw, BodField::TrueBearing, bearing, 'T')
    }

    /// Sets the magnetic bearing, in `[0, 360)`.
    pub fn set_magnetic_bearing(&mut self, bearing: f64) -> Result<(), ArgumentError> {
        let bearing = check_range("magnetic bearing", bearing, 0.0..360.0)?;
        set_with_unit(&mut self.raw, BodField::MagneticBearing, bearing, 'M')
    }

    pub fn set_destination_id(&mut self, id: &str) -> Result<(), ArgumentError> {
        self.raw.set_string(BodField::DestinationId, id)
    }

    pub fn set_origin_id(&mut self, id: &str) -> Result<(), ArgumentError> {
        self.raw.set_string(BodField::OriginId, id)
    }
}
