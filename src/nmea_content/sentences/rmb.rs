use crate::{
    self as marine_nmea, ArgumentError, DataStatus, Direction, FieldError, RawSentence, Sentence,
    Waypoint,
    error::check_range,
    nmea_content::parse,
};

field_layout! {
    /// Fields of an [`RMB`] sentence
    pub enum RmbField {
        Status = 1,
        CrossTrackError = 2,
        SteerTo = 3,
        OriginId = 4,
        DestinationId = 5,
        DestLatitude = 6,
        DestLatHemisphere = 7,
        DestLongitude = 8,
        DestLonHemisphere = 9,
        Range = 10,
        Bearing = 11,
        Velocity = 12,
        ArrivalStatus = 13,
    }
}

/// RMB - Recommended Minimum Navigation Information
///
/// Steering information towards the destination waypoint of the active route.
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmb_recommended_minimum_navigation_information>
///
/// ```text
///                                                              14
///         1 2   3 4    5    6       7 8        9 10  11  12  13|
///         | |   | |    |    |       | |        | |   |   |   | |
///  $--RMB,A,x.x,a,c--c,c--c,llll.ll,a,yyyyy.yy,a,x.x,x.x,x.x,A,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(RMB), fields(13))]
pub struct RMB {
    raw: RawSentence,
}

impl RMB {
    pub fn status(&self) -> Result<DataStatus, FieldError> {
        self.raw.enumerated(RmbField::Status)
    }

    /// Cross track error in nautical miles, see [`RMB::steer_to`] for the side.
    pub fn cross_track_error(&self) -> Result<f64, FieldError> {
        self.raw.double(RmbField::CrossTrackError)
    }

    /// Direction to steer to correct the cross track error, `Left` or `Right`.
    pub fn steer_to(&self) -> Result<Direction, FieldError> {
        match self.raw.enumerated(RmbField::SteerTo)? {
            direction @ (Direction::Left | Direction::Right) => Ok(direction),
            _ => Err(self.raw.malformed(RmbField::SteerTo)),
        }
    }

    pub fn origin_id(&self) -> Result<&str, FieldError> {
        self.raw.string(RmbField::OriginId)
    }

    pub fn destination(&self) -> Result<Waypoint, FieldError> {
        let id = self.raw.string(RmbField::DestinationId)?;
        let position = parse::position(&self.raw, RmbField::DestLatitude as usize)?;
        Ok(Waypoint::new(id, position))
    }

    /// Range to the destination in nautical miles
    pub fn range(&self) -> Result<f64, FieldError> {
        self.raw.double(RmbField::Range)
    }

    /// True bearing to the destination in degrees
    pub fn bearing(&self) -> Result<f64, FieldError> {
        self.raw.double(RmbField::Bearing)
    }

    /// Velocity towards the destination in knots
    pub fn velocity(&self) -> Result<f64, FieldError> {
        self.raw.double(RmbField::Velocity)
    }

    pub fn arrival_status(&self) -> Result<DataStatus, FieldError> {
        self.raw.enumerated(RmbField::ArrivalStatus)
    }

    /// Returns `true` when the arrival circle has been entered.
    pub fn has_arrived(&self) -> Result<bool, FieldError> {
        Ok(self.arrival_status()? == DataStatus::Active)
    }

    pub fn set_status(&mut self, status: DataStatus) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(RmbField::Status, status)
    }

    /// Sets the cross track error. The sign is dropped, the side is given with
    /// [`RMB::set_steer_to`].
    pub fn set_cross_track_error(&mut self, xte: f64) -> Result<(), ArgumentError> {
        let xte = check_range("cross track error", xte, ..)?;
        self.raw.set_double(RmbField::CrossTrackError, xte.abs())
    }

    pub fn set_steer_to(&mut self, direction: Direction) -> Result<(), ArgumentError> {
        match direction {
            Direction::Left | Direction::Right => {
                self.raw.set_enumerated(RmbField::SteerTo, direction)
            }
            found => Err(ArgumentError::UnexpectedDirection {
                expected: "Left or Right",
                found,
            }),
        }
    }

    pub fn set_origin_id(&mut self, id: &str) -> Result<(), ArgumentError> {
        self.raw.set_string(RmbField::OriginId, id)
    }

    /// Writes the destination id and position.
    pub fn set_destination(&mut self, destination: &Waypoint) -> Result<(), ArgumentError> {
        let mut raw = self.raw.clone();
        raw.set_string(RmbField::DestinationId, destination.id())?;
        parse::set_position(
            &mut raw,
            RmbField::DestLatitude as usize,
            &destination.position(),
        )?;

        self.raw = raw;
        Ok(())
    }

    pub fn set_range(&mut self, range: f64) -> Result<(), ArgumentError> {
        let range = check_range("range", range, 0.0..)?;
        self.raw.set_double(RmbField::Range, range)
    }

    /// Sets the bearing to the destination, in `[0, 360)`.
    pub fn set_bearing(&mut self, bearing: f64) -> Result<(), ArgumentError> {
        let bearing = check_range("bearing", bearing, 0.0..360.0)?;
        self.raw.set_double(RmbField::Bearing, bearing)
    }

    pub fn set_velocity(&mut self, velocity: f64) -> Result<(), ArgumentError> {
        let velocity = check_range("velocity", velocity, 0.0..)?;
        self.raw.set_double(RmbField::Velocity, velocity)
    }

    pub fn set_arrival_status(&mut self, status: DataStatus) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(RmbField::ArrivalStatus, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, TalkerId};

    const RMB_LINE: &str =
        "$GPRMB,A,0.00,R,,RUSKI,5536.200,N,01436.500,E,432.3,234.9,,V*58";

    #[test]
    fn test_rmb_getters() {
        let rmb = RMB::parse(RMB_LINE).unwrap();

        assert_eq!(rmb.status(), Ok(DataStatus::Active));
        assert_eq!(rmb.cross_track_error(), Ok(0.0));
        assert_eq!(rmb.steer_to(), Ok(Direction::Right));
        assert_eq!(rmb.origin_id(), Err(FieldError::NotAvailable(4)));
        assert_eq!(rmb.range(), Ok(432.3));
        assert_eq!(rmb.bearing(), Ok(234.9));
        assert!(rmb.velocity().unwrap_err().is_not_available());
        assert_eq!(rmb.has_arrived(), Ok(false));

        let destination = rmb.destination().unwrap();
        assert_eq!(destination.id(), "RUSKI");
        let position = destination.position();
        assert!((position.latitude() - (55.0 + 36.2 / 60.0)).abs() < 1e-9);
        assert!((position.longitude() - (14.0 + 36.5 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_rmb_steer_to_hemisphere_is_malformed() {
        let mut rmb = RMB::parse(RMB_LINE).unwrap();
        rmb.raw_mut().set_char(RmbField::SteerTo, 'N').unwrap();

        assert_eq!(
            rmb.steer_to(),
            Err(FieldError::Malformed {
                index: 3,
                value: "N".to_owned()
            })
        );
        assert_eq!(
            rmb.set_steer_to(Direction::East),
            Err(ArgumentError::UnexpectedDirection {
                expected: "Left or Right",
                found: Direction::East
            })
        );
    }

    #[test]
    fn test_rmb_build() {
        let mut rmb = RMB::new(TalkerId::GP);
        let position = Position::new(55.0 + 36.2 / 60.0, 14.0 + 36.5 / 60.0).unwrap();
        let destination = Waypoint::new("RUSKI", position);

        rmb.set_status(DataStatus::Active).unwrap();
        rmb.set_cross_track_error(-0.25).unwrap();
        rmb.set_steer_to(Direction::Left).unwrap();
        rmb.set_origin_id("MELIN").unwrap();
        rmb.set_destination(&destination).unwrap();
        rmb.set_range(432.3).unwrap();
        rmb.set_bearing(234.9).unwrap();
        rmb.set_velocity(5.5).unwrap();
        rmb.set_arrival_status(DataStatus::Void).unwrap();

        let parsed = RMB::parse(&rmb.to_string()).unwrap();
        assert_eq!(parsed.cross_track_error(), Ok(0.25));
        assert_eq!(parsed.steer_to(), Ok(Direction::Left));
        assert_eq!(parsed.origin_id(), Ok("MELIN"));
        assert_eq!(parsed.raw().string(RmbField::DestLatitude), Ok("5536.200"));
        assert_eq!(
            parsed.raw().string(RmbField::DestLongitude),
            Ok("01436.500")
        );
        assert_eq!(parsed.destination().unwrap().id(), "RUSKI");
        assert_eq!(parsed.velocity(), Ok(5.5));
        assert_eq!(parsed.has_arrived(), Ok(false));
    }

    #[test]
    fn test_rmb_setter_validation() {
        let mut rmb = RMB::new(TalkerId::GP);

        assert!(rmb.set_bearing(360.0).is_err());
        assert!(rmb.set_range(-1.0).is_err());
        assert!(rmb.set_velocity(-0.1).is_err());
        assert!(rmb.set_cross_track_error(f64::NAN).is_err());
        let invalid = Waypoint::new("A*B", Position::new(0.0, 0.0).unwrap());
        assert!(rmb.set_destination(&invalid).is_err());
        assert!(!rmb.raw().has_value(RmbField::DestLatitude));
    }
}
