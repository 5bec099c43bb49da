use crate::{
    self as marine_nmea, ArgumentError, FieldError, FixMode, OptionalField, RawSentence,
    SelectionMode, Sentence,
    error::check_range,
    nmea_content::sentences::set_padded,
};

/// Maximum number of satellite ids in one GSA sentence.
pub const MAX_SATELLITE_IDS: usize = 12;

field_layout! {
    /// Fields of a [`GSA`] sentence
    pub enum GsaField {
        SelectionMode = 1,
        FixMode = 2,
        SatelliteId1 = 3,
        SatelliteId2 = 4,
        SatelliteId3 = 5,
        SatelliteId4 = 6,
        SatelliteId5 = 7,
        SatelliteId6 = 8,
        SatelliteId7 = 9,
        SatelliteId8 = 10,
        SatelliteId9 = 11,
        SatelliteId10 = 12,
        SatelliteId11 = 13,
        SatelliteId12 = 14,
        Pdop = 15,
        Hdop = 16,
        Vdop = 17,
    }
}

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        14 15  16  17
///         | | |                         |  |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(GSA), fields(17))]
pub struct GSA {
    raw: RawSentence,
}

impl GSA {
    pub fn selection_mode(&self) -> Result<SelectionMode, FieldError> {
        self.raw.enumerated(GsaField::SelectionMode)
    }

    pub fn fix_mode(&self) -> Result<FixMode, FieldError> {
        self.raw.enumerated(GsaField::FixMode)
    }

    /// Ids of the satellites used for the fix. Empty slots are skipped.
    pub fn satellite_ids(&self) -> Result<heapless::Vec<u16, MAX_SATELLITE_IDS>, FieldError> {
        let first = GsaField::SatelliteId1 as usize;
        let mut ids = heapless::Vec::new();

        for index in first..first + MAX_SATELLITE_IDS {
            if let Some(id) = self.raw.value::<u16>(index).optional()? {
                // at most MAX_SATELLITE_IDS iterations
                let _ = ids.push(id);
            }
        }

        Ok(ids)
    }

    /// Position dilution of precision
    pub fn pdop(&self) -> Result<f64, FieldError> {
        self.raw.double(GsaField::Pdop)
    }

    /// Horizontal dilution of precision
    pub fn hdop(&self) -> Result<f64, FieldError> {
        self.raw.double(GsaField::Hdop)
    }

    /// Vertical dilution of precision
    pub fn vdop(&self) -> Result<f64, FieldError> {
        self.raw.double(GsaField::Vdop)
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(GsaField::SelectionMode, mode)
    }

    pub fn set_fix_mode(&mut self, mode: FixMode) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(GsaField::FixMode, mode)
    }

    /// Writes the ids into the first slots and clears the remaining ones.
    pub fn set_satellite_ids(&mut self, ids: &[u16]) -> Result<(), ArgumentError> {
        if ids.len() > MAX_SATELLITE_IDS {
            return Err(ArgumentError::TooManyValues {
                name: "satellite ids",
                max: MAX_SATELLITE_IDS,
                count: ids.len(),
            });
        }

        let first = GsaField::SatelliteId1 as usize;
        let mut raw = self.raw.clone();
        for slot in 0..MAX_SATELLITE_IDS {
            match ids.get(slot) {
                Some(&id) => set_padded(&mut raw, first + slot, id)?,
                None => raw.clear(first + slot)?,
            }
        }

        self.raw = raw;
        Ok(())
    }

    pub fn set_pdop(&mut self, pdop: f64) -> Result<(), ArgumentError> {
        let pdop = check_range("position dilution of precision", pdop, 0.0..)?;
        self.raw.set_double(GsaField::Pdop, pdop)
    }

    pub fn set_hdop(&mut self, hdop: f64) -> Result<(), ArgumentError> {
        let hdop = check_range("horizontal dilution of precision", hdop, 0.0..)?;
        self.raw.set_double(GsaField::Hdop, hdop)
    }

    pub fn set_vdop(&mut self, vdop: f64) -> Result<(), ArgumentError> {
        let vdop = check_range("vertical dilution of precision", vdop, 0.0..)?;
        self.raw.set_double(GsaField::Vdop, vdop)
    }
}
