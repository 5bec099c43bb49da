use crate::{
    self as marine_nmea, ArgumentError, FieldError, OptionalField, RawSentence, Satellite,
    Sentence,
    nmea_content::sentences::{check_sequence, set_padded},
};

/// Maximum number of satellites in one GSV sentence.
pub const MAX_SATELLITES: usize = 4;

/// Fields per satellite block.
const BLOCK_LEN: usize = 4;

field_layout! {
    /// Fields of a [`GSV`] sentence
    pub enum GsvField {
        SentenceCount = 1,
        SentenceIndex = 2,
        SatelliteCount = 3,
        Prn1 = 4,
        Elevation1 = 5,
        Azimuth1 = 6,
        Snr1 = 7,
        Prn2 = 8,
        Elevation2 = 9,
        Azimuth2 = 10,
        Snr2 = 11,
        Prn3 = 12,
        Elevation3 = 13,
        Azimuth3 = 14,
        Snr3 = 15,
        Prn4 = 16,
        Elevation4 = 17,
        Azimuth4 = 18,
        Snr4 = 19,
    }
}

/// GSV - Satellites in view
///
/// The satellites in view are spread over several sentences, four per sentence.
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...*hh<CR><LF>
/// ```
///
/// NMEA 4.11 appends a signal id after the last satellite block. It is recognized by the
/// field count: one field more than the header and a whole number of blocks.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(GSV), fields(19))]
pub struct GSV {
    raw: RawSentence,
}

impl GSV {
    /// Total number of GSV sentences in this cycle
    pub fn sentence_count(&self) -> Result<u8, FieldError> {
        self.raw.value(GsvField::SentenceCount)
    }

    /// 1-based index of this sentence in the cycle
    pub fn sentence_index(&self) -> Result<u8, FieldError> {
        self.raw.value(GsvField::SentenceIndex)
    }

    /// Total number of satellites in view
    pub fn satellite_count(&self) -> Result<u16, FieldError> {
        self.raw.value(GsvField::SatelliteCount)
    }

    pub fn is_first(&self) -> Result<bool, FieldError> {
        Ok(self.sentence_index()? == 1)
    }

    pub fn is_last(&self) -> Result<bool, FieldError> {
        Ok(self.sentence_index()? == self.sentence_count()?)
    }

    /// Satellites of this sentence. Blocks without a PRN are skipped, the other values
    /// of a block may be missing.
    pub fn satellites(&self) -> Result<heapless::Vec<Satellite, MAX_SATELLITES>, FieldError> {
        let mut satellites = heapless::Vec::new();

        for block in 0..self.block_slots() {
            let first = GsvField::Prn1 as usize + block * BLOCK_LEN;
            let Some(prn) = self.raw.value::<u16>(first).optional()? else {
                continue;
            };

            let satellite = Satellite {
                prn,
                elevation: self.raw.value(first + 1).optional()?,
                azimuth: self.raw.value(first + 2).optional()?,
                snr: self.raw.value(first + 3).optional()?,
            };
            // at most MAX_SATELLITES iterations
            let _ = satellites.push(satellite);
        }

        Ok(satellites)
    }

    /// Signal id of the GNSS signal, a single hex digit (NMEA 4.11).
    ///
    /// ```rust
    /// use marine_nmea::{GSV, Sentence};
    ///
    /// let gsv = GSV::parse("$GPGSV,3,3,10,29,18,120,32,31,42,045,37,1*64").unwrap();
    /// assert_eq!(gsv.signal_id(), Ok(1));
    /// assert_eq!(gsv.satellites().unwrap().len(), 2);
    /// ```
    pub fn signal_id(&self) -> Result<u8, FieldError> {
        let count = self.raw.field_count();
        if !self.has_signal_id_slot() {
            return Err(FieldError::NotAvailable(count + 1));
        }

        let text = self.raw.string(count)?;
        match text.as_bytes() {
            [digit] if digit.is_ascii_hexdigit() => {
                u8::from_str_radix(text, 16).map_err(|_| self.raw.malformed(count))
            }
            _ => Err(self.raw.malformed(count)),
        }
    }

    fn has_signal_id_slot(&self) -> bool {
        let count = self.raw.field_count();
        count > GsvField::SatelliteCount as usize
            && (count - GsvField::SatelliteCount as usize) % BLOCK_LEN == 1
    }

    /// Last field that belongs to a satellite block.
    fn last_block_field(&self) -> usize {
        let count = self.raw.field_count();
        if self.has_signal_id_slot() {
            count - 1
        } else {
            count
        }
    }

    /// Number of blocks the sentence has room for, a partial trailing block included.
    fn block_slots(&self) -> usize {
        let block_fields = self
            .last_block_field()
            .saturating_sub(GsvField::SatelliteCount as usize);
        block_fields.div_ceil(BLOCK_LEN).min(MAX_SATELLITES)
    }

    pub fn set_sentence_count(&mut self, count: u8) -> Result<(), ArgumentError> {
        let count = check_sequence("sentence count", count)?;
        self.raw.set_integer(GsvField::SentenceCount, i64::from(count))
    }

    pub fn set_sentence_index(&mut self, index: u8) -> Result<(), ArgumentError> {
        let index = check_sequence("sentence index", index)?;
        self.raw.set_integer(GsvField::SentenceIndex, i64::from(index))
    }

    pub fn set_satellite_count(&mut self, count: u16) -> Result<(), ArgumentError> {
        set_padded(&mut self.raw, GsvField::SatelliteCount, count)
    }

    /// Writes the satellite blocks and clears the unused ones.
    ///
    /// A parsed sentence keeps its field count, so it only takes as many satellites as it
    /// has blocks. A signal id is left untouched.
    pub fn set_satellites(&mut self, satellites: &[Satellite]) -> Result<(), ArgumentError> {
        let slots = self.block_slots();
        if satellites.len() > slots {
            return Err(ArgumentError::TooManyValues {
                name: "satellites",
                max: slots,
                count: satellites.len(),
            });
        }

        let last = self.last_block_field();
        let mut raw = self.raw.clone();
        for block in 0..slots {
            let first = GsvField::Prn1 as usize + block * BLOCK_LEN;
            match satellites.get(block) {
                Some(satellite) => write_satellite(&mut raw, first, satellite)?,
                None => {
                    for index in first..=last.min(first + BLOCK_LEN - 1) {
                        raw.clear(index)?;
                    }
                }
            }
        }

        self.raw = raw;
        Ok(())
    }
}

/// Writes one block. The azimuth is written with three digits, the other values with two.
fn write_satellite(
    raw: &mut RawSentence,
    first: usize,
    satellite: &Satellite,
) -> Result<(), ArgumentError> {
    set_padded(raw, first, satellite.prn)?;

    let values = [
        satellite.elevation.map(|elevation| format!("{elevation:02}")),
        satellite.azimuth.map(|azimuth| format!("{azimuth:03}")),
        satellite.snr.map(|snr| format!("{snr:02}")),
    ];
    for (offset, value) in values.into_iter().enumerate() {
        let index = first + 1 + offset;
        match value {
            Some(value) => raw.set_string(index, &value)?,
            None => raw.clear(index)?,
        }
    }

    Ok(())
}
