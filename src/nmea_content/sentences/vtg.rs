use crate::{
    self as marine_nmea, ArgumentError, FieldError, GpsMode, RawSentence, Sentence,
    error::check_range,
    nmea_content::sentences::set_with_unit,
};

field_layout! {
    /// Fields of a [`VTG`] sentence
    pub enum VtgField {
        TrueCourse = 1,
        TrueReference = 2,
        MagneticCourse = 3,
        MagneticReference = 4,
        SpeedKnots = 5,
        KnotsUnit = 6,
        SpeedKmh = 7,
        KmhUnit = 8,
        Mode = 9,
    }
}

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(VTG), fields(9))]
pub struct VTG {
    raw: RawSentence,
}

impl VTG {
    /// Course over ground in degrees true
    pub fn true_course(&self) -> Result<f64, FieldError> {
        self.raw.double(VtgField::TrueCourse)
    }

    /// Course over ground in degrees magnetic
    pub fn magnetic_course(&self) -> Result<f64, FieldError> {
        self.raw.double(VtgField::MagneticCourse)
    }

    pub fn speed_knots(&self) -> Result<f64, FieldError> {
        self.raw.double(VtgField::SpeedKnots)
    }

    pub fn speed_kmh(&self) -> Result<f64, FieldError> {
        self.raw.double(VtgField::SpeedKmh)
    }

    /// FAA mode indicator, only present since NMEA 2.3
    pub fn mode(&self) -> Result<GpsMode, FieldError> {
        self.raw.enumerated(VtgField::Mode)
    }

    pub fn set_true_course(&mut self, course: f64) -> Result<(), ArgumentError> {
        let course = check_range("true course", course, 0.0..360.0)?;
        set_with_unit(&mut self.raw, VtgField::TrueCourse, course, 'T')
    }

    pub fn set_magnetic_course(&mut self, course: f64) -> Result<(), ArgumentError> {
        let course = check_range("magnetic course", course, 0.0..360.0)?;
        set_with_unit(&mut self.raw, VtgField::MagneticCourse, course, 'M')
    }

    pub fn set_speed_knots(&mut self, speed: f64) -> Result<(), ArgumentError> {
        let speed = check_range("speed", speed, 0.0..)?;
        set_with_unit(&mut self.raw, VtgField::SpeedKnots, speed, 'N')
    }

    pub fn set_speed_kmh(&mut self, speed: f64) -> Result<(), ArgumentError> {
        let speed = check_range("speed", speed, 0.0..)?;
        set_with_unit(&mut self.raw, VtgField::SpeedKmh, speed, 'K')
    }

    pub fn set_mode(&mut self, mode: GpsMode) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(VtgField::Mode, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TalkerId;

    const VTG_LINE: &str = "$GPVTG,46.96,T,,,16.89,N,31.28,K,A*43";

    #[test]
    fn test_vtg_getters() {
        let vtg = VTG::parse(VTG_LINE).unwrap();

        assert_eq!(vtg.true_course(), Ok(46.96));
        assert_eq!(vtg.magnetic_course(), Err(FieldError::NotAvailable(3)));
        assert_eq!(vtg.speed_knots(), Ok(16.89));
        assert_eq!(vtg.speed_kmh(), Ok(31.28));
        assert_eq!(vtg.mode(), Ok(GpsMode::Autonomous));
    }

    #[test]
    fn test_vtg_build() {
        let mut vtg = VTG::new(TalkerId::GP);

        vtg.set_true_course(46.96).unwrap();
        vtg.set_speed_knots(16.89).unwrap();
        vtg.set_speed_kmh(31.28).unwrap();
        vtg.set_mode(GpsMode::Autonomous).unwrap();

        assert_eq!(vtg.to_string(), VTG_LINE);
    }

    #[test]
    fn test_vtg_setter_validation() {
        let mut vtg = VTG::new(TalkerId::GP);

        assert!(vtg.set_magnetic_course(360.0).is_err());
        assert!(vtg.set_speed_kmh(-1.0).is_err());
        assert!(!vtg.raw().has_value(VtgField::KmhUnit));

        vtg.set_magnetic_course(12.0).unwrap();
        assert_eq!(vtg.raw().character(VtgField::MagneticReference), Ok('M'));
    }
}
