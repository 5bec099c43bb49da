//! # Raw Sentences
//!
//! A [`RawSentence`] is the framed form of one NMEA 0183 line: the sentinel, the address
//! field split into talker and sentence type, and the ordered list of raw field strings.
//! It is the only place the field text lives; every typed value is derived from it on
//! demand.

use std::fmt;

use nom::{Parser, error::ErrorKind};

use crate::{
    ArgumentError, FieldError, NmeaParse, SentenceId, checksum,
    nmea_content::{NmeaEnum, parse::format_decimal},
    parsing::consumed,
};

/// Characters that delimit or frame fields and therefore cannot appear inside one.
const RESERVED: &[char] = &['$', '!', '*', ',', '\r', '\n'];

/// Anything that names a field of a sentence.
///
/// Field indices are 1-based, as in the NMEA 0183 sentence descriptions: field 1 is the
/// first field after the address. Plain `usize` indices and the per-sentence layout enums
/// (e.g. [`RmcField`](crate::nmea_content::sentences::RmcField)) both implement it.
pub trait FieldIndex: Copy {
    /// The 1-based index of the field.
    fn index(self) -> usize;
}

impl FieldIndex for usize {
    fn index(self) -> usize {
        self
    }
}

/// Two-character talker identifier, e.g. `GP` for GPS receivers.
///
/// ```rust
/// use marine_nmea::TalkerId;
///
/// let talker = TalkerId::new("GN").unwrap();
/// assert_eq!(talker.as_str(), "GN");
/// assert_eq!(TalkerId::GP.to_string(), "GP");
/// assert!(TalkerId::new("gps").is_err());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TalkerId([u8; 2]);

impl TalkerId {
    /// GPS
    pub const GP: TalkerId = TalkerId(*b"GP");
    /// GLONASS
    pub const GL: TalkerId = TalkerId(*b"GL");
    /// Galileo
    pub const GA: TalkerId = TalkerId(*b"GA");
    /// BeiDou
    pub const GB: TalkerId = TalkerId(*b"GB");
    /// Combined GNSS
    pub const GN: TalkerId = TalkerId(*b"GN");
    /// Integrated instrumentation
    pub const II: TalkerId = TalkerId(*b"II");
    /// Integrated navigation
    pub const IN: TalkerId = TalkerId(*b"IN");
    /// Electronic chart display
    pub const EC: TalkerId = TalkerId(*b"EC");
    /// AIS
    pub const AI: TalkerId = TalkerId(*b"AI");

    /// Creates a talker identifier from two uppercase ASCII letters or digits.
    pub fn new(talker: &str) -> Result<Self, ArgumentError> {
        match talker.as_bytes() {
            &[a, b] if is_address_byte(a) && is_address_byte(b) => Ok(TalkerId([a, b])),
            _ => Err(ArgumentError::InvalidTalker(talker.to_owned())),
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        // only ever built from ASCII bytes
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for TalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn is_address_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}

/// One framed NMEA 0183 sentence.
///
/// Holds the talker, the sentence type (raw text and resolved [`SentenceId`]) and the
/// ordered field strings between the address field and the checksum. Empty fields
/// (`,,`) are kept as empty strings, so the number of fields is exactly the number of
/// commas after the address. The field count never changes after construction.
///
/// The accessors (`string`, `integer`, `double`, `character`, `enumerated`, `value`) are
/// pure reads. They fail with [`FieldError::NotAvailable`] when the field is empty or the
/// index is beyond the field count, and with [`FieldError::Malformed`] when the text does
/// not convert.
///
/// # Examples
///
/// ```rust
/// use marine_nmea::{FieldError, Nmea0183Parser, SentenceId};
///
/// let raw = Nmea0183Parser::new()
///     .frame("$GPRMB,A,0.00,R,,RUSKI,5536.200,N,01436.500,E,432.3,234.9,,V*58")
///     .unwrap();
///
/// assert_eq!(raw.talker_id().as_str(), "GP");
/// assert_eq!(raw.sentence_id(), SentenceId::RMB);
/// assert_eq!(raw.field_count(), 13);
///
/// assert_eq!(raw.string(5), Ok("RUSKI"));
/// assert_eq!(raw.double(10), Ok(432.3));
/// assert_eq!(raw.character(1), Ok('A'));
///
/// // Empty field and index past the end are both "not available"
/// assert_eq!(raw.string(4), Err(FieldError::NotAvailable(4)));
/// assert_eq!(raw.string(14), Err(FieldError::NotAvailable(14)));
///
/// // Text that is not a number is malformed, never zero
/// assert!(matches!(raw.double(5), Err(FieldError::Malformed { index: 5, .. })));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawSentence {
    begin_char: char,
    talker_id: TalkerId,
    sentence_type: String,
    sentence_id: SentenceId,
    fields: Vec<String>,
    original: Option<String>,
}

impl RawSentence {
    /// Creates an empty sentence of a known type with `field_count` empty fields.
    pub fn new(talker_id: TalkerId, sentence_id: SentenceId, field_count: usize) -> Self {
        Self {
            begin_char: '$',
            talker_id,
            sentence_type: sentence_id.as_str().to_owned(),
            sentence_id,
            fields: vec![String::new(); field_count],
            original: None,
        }
    }

    /// Creates an empty sentence from a raw sentence type code.
    ///
    /// The code must be three or four uppercase letters or digits. Codes outside the
    /// known set are allowed and resolve to [`SentenceId::Unknown`].
    pub fn with_type(
        talker_id: TalkerId,
        sentence_type: &str,
        field_count: usize,
    ) -> Result<Self, ArgumentError> {
        let valid = (3..=4).contains(&sentence_type.len())
            && sentence_type.bytes().all(is_address_byte);
        if !valid {
            return Err(ArgumentError::InvalidSentenceType(sentence_type.to_owned()));
        }

        Ok(Self {
            begin_char: '$',
            talker_id,
            sentence_type: sentence_type.to_owned(),
            sentence_id: SentenceId::from_type_code(sentence_type),
            fields: vec![String::new(); field_count],
            original: None,
        })
    }

    pub(crate) fn from_parts(
        begin_char: char,
        talker_id: TalkerId,
        sentence_type: &str,
        fields: Vec<String>,
        original: &str,
    ) -> Self {
        Self {
            begin_char,
            talker_id,
            sentence_type: sentence_type.to_owned(),
            sentence_id: SentenceId::from_type_code(sentence_type),
            fields,
            original: Some(original.to_owned()),
        }
    }

    /// The sentinel the sentence starts with, `$` or `!`.
    pub fn begin_char(&self) -> char {
        self.begin_char
    }

    pub fn talker_id(&self) -> TalkerId {
        self.talker_id
    }

    /// The sentence type code as found in the address field, e.g. `"RMC"`.
    pub fn sentence_type(&self) -> &str {
        &self.sentence_type
    }

    pub fn sentence_id(&self) -> SentenceId {
        self.sentence_id
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over the raw field strings, empty ones included.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// The line this sentence was framed from.
    ///
    /// `None` for sentences built in code, and for framed sentences once a setter has
    /// changed any field.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Returns `true` if the field exists and is not empty.
    pub fn has_value(&self, index: impl FieldIndex) -> bool {
        self.string(index).is_ok()
    }

    /// Returns the raw text of a field.
    pub fn string(&self, index: impl FieldIndex) -> Result<&str, FieldError> {
        let index = index.index();
        match index.checked_sub(1).and_then(|i| self.fields.get(i)) {
            Some(field) if !field.is_empty() => Ok(field),
            _ => Err(FieldError::NotAvailable(index)),
        }
    }

    /// Parses a field as any [`NmeaParse`] type. The whole field must be consumed.
    pub fn value<T: NmeaParse>(&self, index: impl FieldIndex) -> Result<T, FieldError> {
        let field = self.string(index)?;
        consumed(T::parse, ErrorKind::Eof)
            .parse(field)
            .map(|(_, value)| value)
            .map_err(|_| self.malformed(index))
    }

    pub fn integer(&self, index: impl FieldIndex) -> Result<i32, FieldError> {
        self.value(index)
    }

    pub fn double(&self, index: impl FieldIndex) -> Result<f64, FieldError> {
        self.value(index)
    }

    /// Returns the character of a single-character field.
    pub fn character(&self, index: impl FieldIndex) -> Result<char, FieldError> {
        self.value(index)
    }

    /// Reads a single-character field and maps it through the enumeration's char table.
    pub fn enumerated<T: NmeaEnum>(&self, index: impl FieldIndex) -> Result<T, FieldError> {
        let c = self.character(index)?;
        T::from_char(c).ok_or_else(|| self.malformed(index))
    }

    /// Builds a [`FieldError::Malformed`] carrying the current text of the field.
    pub(crate) fn malformed(&self, index: impl FieldIndex) -> FieldError {
        let index = index.index();
        let value = index
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .cloned()
            .unwrap_or_default();
        FieldError::Malformed { index, value }
    }

    /// Checks that `index` names an existing field.
    pub(crate) fn check_index(&self, index: impl FieldIndex) -> Result<usize, ArgumentError> {
        let index = index.index();
        if (1..=self.fields.len()).contains(&index) {
            Ok(index)
        } else {
            Err(ArgumentError::FieldIndex {
                index,
                count: self.fields.len(),
            })
        }
    }

    /// Replaces the text of a field.
    ///
    /// Fails if the index does not exist or if the text contains non-ASCII characters or
    /// any of `$ ! * ,` CR LF. Other fields are left untouched.
    pub fn set_string(&mut self, index: impl FieldIndex, value: &str) -> Result<(), ArgumentError> {
        let index = self.check_index(index)?;
        if !value.is_ascii() || value.contains(RESERVED) {
            return Err(ArgumentError::InvalidText(value.to_owned()));
        }

        self.fields[index - 1] = value.to_owned();
        self.original = None;
        Ok(())
    }

    /// Empties a field, marking its value as not available.
    pub fn clear(&mut self, index: impl FieldIndex) -> Result<(), ArgumentError> {
        self.set_string(index, "")
    }

    pub fn set_char(&mut self, index: impl FieldIndex, value: char) -> Result<(), ArgumentError> {
        self.set_string(index, value.encode_utf8(&mut [0; 4]))
    }

    pub fn set_integer(&mut self, index: impl FieldIndex, value: i64) -> Result<(), ArgumentError> {
        self.set_string(index, &value.to_string())
    }

    /// Writes a decimal value using the shortest text that parses back to the same value.
    pub fn set_double(&mut self, index: impl FieldIndex, value: f64) -> Result<(), ArgumentError> {
        if !value.is_finite() {
            return Err(ArgumentError::OutOfRange {
                name: "decimal field",
                value,
            });
        }
        self.set_string(index, &format_decimal(value))
    }

    pub fn set_enumerated<T: NmeaEnum>(
        &mut self,
        index: impl FieldIndex,
        value: T,
    ) -> Result<(), ArgumentError> {
        self.set_char(index, value.to_char())
    }

    /// The text covered by the checksum: address and fields, without sentinel.
    fn checksummed_data(&self) -> String {
        let mut data = format!("{}{}", self.talker_id, self.sentence_type);
        for field in &self.fields {
            data.push(',');
            data.push_str(field);
        }
        data
    }
}

/// Emits the sentence with a freshly calculated checksum, without line terminator.
impl fmt::Display for RawSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.checksummed_data();
        let checksum = checksum(data.as_bytes());
        write!(f, "{}{}*{checksum:02X}", self.begin_char, data)
    }
}
