use time::{Date, PrimitiveDateTime, Time, UtcOffset};

use crate::{
    self as marine_nmea, ArgumentError, FieldError, OptionalField, RawSentence, Sentence,
    error::check_range,
    nmea_content::parse,
};

field_layout! {
    /// Fields of a [`ZDA`] sentence
    pub enum ZdaField {
        Time = 1,
        Day = 2,
        Month = 3,
        Year = 4,
        LocalZoneHours = 5,
        LocalZoneMinutes = 6,
    }
}

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// The local zone is the offset from UTC. Its minutes take the sign of the hours, so
/// `-05,30` is five and a half hours west of Greenwich.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(ZDA), fields(6))]
pub struct ZDA {
    raw: RawSentence,
}

impl ZDA {
    /// Time in UTC
    pub fn time(&self) -> Result<Time, FieldError> {
        parse::time(&self.raw, ZdaField::Time)
    }

    /// Date in UTC. The year is written with four digits; a two-digit year is resolved
    /// with [`PIVOT_YEAR`](parse::PIVOT_YEAR).
    pub fn date(&self) -> Result<Date, FieldError> {
        let day = self.raw.value::<u8>(ZdaField::Day)?;
        let month = self.raw.value::<u8>(ZdaField::Month)?;
        let year = self.raw.value::<u16>(ZdaField::Year)?;

        parse::calendar_date(parse::resolve_year(i32::from(year)), month, day)
            .ok_or_else(|| self.raw.malformed(ZdaField::Day))
    }

    pub fn date_time(&self) -> Result<PrimitiveDateTime, FieldError> {
        Ok(PrimitiveDateTime::new(self.date()?, self.time()?))
    }

    /// Hours of the local zone offset
    pub fn local_zone_hours(&self) -> Result<i8, FieldError> {
        self.raw.value(ZdaField::LocalZoneHours)
    }

    /// Minutes of the local zone offset, negative when the hours are. Empty hours carry
    /// no sign.
    pub fn local_zone_minutes(&self) -> Result<i8, FieldError> {
        let minutes = self.raw.value::<i8>(ZdaField::LocalZoneMinutes)?;
        // "-00" has no sign of its own once parsed
        let west = self
            .raw
            .string(ZdaField::LocalZoneHours)
            .optional()?
            .is_some_and(|hours| hours.starts_with('-'));
        if west && minutes > 0 {
            Ok(-minutes)
        } else {
            Ok(minutes)
        }
    }

    /// The local zone as an offset from UTC.
    ///
    /// ```rust
    /// use marine_nmea::{Sentence, ZDA};
    /// use time::UtcOffset;
    ///
    /// let zda = ZDA::parse("$GPZDA,201530.00,04,07,2002,-05,30*4B").unwrap();
    /// assert_eq!(zda.utc_offset(), Ok(UtcOffset::from_hms(-5, -30, 0).unwrap()));
    /// ```
    pub fn utc_offset(&self) -> Result<UtcOffset, FieldError> {
        let hours = self.local_zone_hours()?;
        let minutes = self.local_zone_minutes()?;
        UtcOffset::from_hms(hours, minutes, 0)
            .map_err(|_| self.raw.malformed(ZdaField::LocalZoneMinutes))
    }

    pub fn set_time(&mut self, time: Time) -> Result<(), ArgumentError> {
        parse::set_time(&mut self.raw, ZdaField::Time, time)
    }

    /// Writes the day, month and four-digit year.
    pub fn set_date(&mut self, date: Date) -> Result<(), ArgumentError> {
        check_range("year", f64::from(date.year()), 0.0..=9999.0)?;
        let year = date.year();

        let mut raw = self.raw.clone();
        raw.set_string(ZdaField::Day, &format!("{:02}", date.day()))?;
        raw.set_string(ZdaField::Month, &format!("{:02}", u8::from(date.month())))?;
        raw.set_string(ZdaField::Year, &format!("{year:04}"))?;

        self.raw = raw;
        Ok(())
    }

    pub fn set_date_time(&mut self, date_time: PrimitiveDateTime) -> Result<(), ArgumentError> {
        self.set_date(date_time.date())?;
        self.set_time(date_time.time())
    }

    /// Sets the hours of the local zone, in `-13..=13`.
    pub fn set_local_zone_hours(&mut self, hours: i8) -> Result<(), ArgumentError> {
        check_range("local zone hours", f64::from(hours), -13.0..=13.0)?;
        let text = if hours < 0 {
            format!("-{:02}", hours.unsigned_abs())
        } else {
            format!("{hours:02}")
        };
        self.raw.set_string(ZdaField::LocalZoneHours, &text)
    }

    /// Sets the minutes of the local zone, in `-59..=59`.
    pub fn set_local_zone_minutes(&mut self, minutes: i8) -> Result<(), ArgumentError> {
        check_range("local zone minutes", f64::from(minutes), -59.0..=59.0)?;
        let text = if minutes < 0 {
            format!("-{:02}", minutes.unsigned_abs())
        } else {
            format!("{minutes:02}")
        };
        self.raw.set_string(ZdaField::LocalZoneMinutes, &text)
    }

    /// Writes the local zone hours and minutes. Seconds of the offset are dropped.
    pub fn set_utc_offset(&mut self, offset: UtcOffset) -> Result<(), ArgumentError> {
        let mut zone = self.clone();
        zone.set_local_zone_hours(offset.whole_hours())?;
        zone.set_local_zone_minutes(offset.minutes_past_hour())?;

        *self = zone;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;
    use crate::TalkerId;

    const ZDA_LINE: &str = "$GPZDA,032915,07,08,2004,00,00*4D";

    #[test]
    fn test_zda_getters() {
        let zda = ZDA::parse(ZDA_LINE).unwrap();

        assert_eq!(zda.time(), Ok(Time::from_hms(3, 29, 15).unwrap()));
        assert_eq!(
            zda.date(),
            Ok(Date::from_calendar_date(2004, Month::August, 7).unwrap())
        );
        assert_eq!(zda.local_zone_hours(), Ok(0));
        assert_eq!(zda.local_zone_minutes(), Ok(0));
        assert_eq!(zda.utc_offset(), Ok(UtcOffset::UTC));
    }

    #[test]
    fn test_zda_negative_zone() {
        let zda = ZDA::parse("$GPZDA,201530.00,04,07,2002,-05,30*4B").unwrap();

        assert_eq!(zda.local_zone_hours(), Ok(-5));
        assert_eq!(zda.local_zone_minutes(), Ok(-30));
        assert_eq!(
            zda.date_time(),
            Ok(PrimitiveDateTime::new(
                Date::from_calendar_date(2002, Month::July, 4).unwrap(),
                Time::from_hms(20, 15, 30).unwrap()
            ))
        );

        let mut zda = zda;
        zda.raw_mut().set_string(ZdaField::LocalZoneHours, "-00").unwrap();
        assert_eq!(zda.local_zone_minutes(), Ok(-30));
        assert_eq!(
            zda.utc_offset(),
            Ok(UtcOffset::from_hms(0, -30, 0).unwrap())
        );
    }

    #[test]
    fn test_zda_invalid_date() {
        let mut zda = ZDA::parse(ZDA_LINE).unwrap();
        zda.raw_mut().set_string(ZdaField::Day, "31").unwrap();
        zda.raw_mut().set_string(ZdaField::Month, "02").unwrap();

        assert_eq!(
            zda.date(),
            Err(FieldError::Malformed {
                index: 2,
                value: "31".to_owned()
            })
        );
    }

    #[test]
    fn test_zda_signed_year() {
        for line in [
            "$GPZDA,032915,07,08,-5,00,00*53",
            "$GPZDA,032915,07,08,+004,00,00*54",
        ] {
            let zda = ZDA::parse(line).unwrap();
            assert!(
                matches!(zda.date(), Err(FieldError::Malformed { index: 4, .. })),
                "{line}"
            );
            assert!(zda.date_time().is_err());
        }
    }

    #[test]
    fn test_zda_minutes_without_hours() {
        let zda = ZDA::parse("$GPZDA,032915,07,08,2004,,30*4E").unwrap();

        assert_eq!(zda.local_zone_hours(), Err(FieldError::NotAvailable(5)));
        assert_eq!(zda.local_zone_minutes(), Ok(30));
        assert_eq!(zda.utc_offset(), Err(FieldError::NotAvailable(5)));
    }

    #[test]
    fn test_zda_build() {
        let source = ZDA::parse(ZDA_LINE).unwrap();
        let mut zda = ZDA::new(TalkerId::GP);

        zda.set_date_time(source.date_time().unwrap()).unwrap();
        zda.set_utc_offset(UtcOffset::UTC).unwrap();

        assert_eq!(zda.to_string(), ZDA_LINE);
    }

    #[test]
    fn test_zda_zone_setters() {
        let mut zda = ZDA::new(TalkerId::GP);

        zda.set_local_zone_hours(-5).unwrap();
        zda.set_local_zone_minutes(30).unwrap();
        assert_eq!(zda.raw().string(ZdaField::LocalZoneHours), Ok("-05"));
        assert_eq!(zda.local_zone_minutes(), Ok(-30));

        assert!(zda.set_local_zone_hours(14).is_err());
        assert!(zda.set_local_zone_minutes(-60).is_err());

        let offset = UtcOffset::from_hms(9, 30, 0).unwrap();
        zda.set_utc_offset(offset).unwrap();
        assert_eq!(zda.utc_offset(), Ok(offset));

        let offset = UtcOffset::from_hms(-3, -45, 0).unwrap();
        zda.set_utc_offset(offset).unwrap();
        assert_eq!(zda.raw().string(ZdaField::LocalZoneMinutes), Ok("-45"));
        assert_eq!(zda.utc_offset(), Ok(offset));

        let far = UtcOffset::from_hms(14, 0, 0).unwrap();
        assert!(zda.set_utc_offset(far).is_err());
        assert_eq!(zda.utc_offset(), Ok(offset));
    }
}
