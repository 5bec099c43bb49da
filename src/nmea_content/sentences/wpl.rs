use crate::{
    self as marine_nmea, ArgumentError, FieldError, RawSentence, Sentence, Waypoint,
    nmea_content::parse,
};

field_layout! {
    /// Fields of a [`WPL`] sentence
    pub enum WplField {
        Latitude = 1,
        LatHemisphere = 2,
        Longitude = 3,
        LonHemisphere = 4,
        WaypointId = 5,
    }
}

/// WPL - Waypoint Location
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_wpl_waypoint_location>
///
/// ```text
///         1       2 3        4 5
///         |       | |        | |
///  $--WPL,llll.ll,a,yyyyy.yy,a,c--c*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(WPL), fields(5))]
pub struct WPL {
    raw: RawSentence,
}

impl WPL {
    pub fn waypoint(&self) -> Result<Waypoint, FieldError> {
        let position = parse::position(&self.raw, WplField::Latitude as usize)?;
        let id = self.raw.string(WplField::WaypointId)?;
        Ok(Waypoint::new(id, position))
    }

    pub fn set_waypoint(&mut self, waypoint: &Waypoint) -> Result<(), ArgumentError> {
        let mut raw = self.raw.clone();
        parse::set_position(&mut raw, WplField::Latitude as usize, &waypoint.position())?;
        raw.set_string(WplField::WaypointId, waypoint.id())?;

        self.raw = raw;
        Ok(())
    }
}
