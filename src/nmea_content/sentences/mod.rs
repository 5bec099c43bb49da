//! # Sentence Types
//!
//! The registry of known sentence types and the typed views over [`RawSentence`].
//!
//! Every typed sentence wraps exactly one [`RawSentence`] and reads its values from it on
//! each call. Getters fail with a [`FieldError`](crate::FieldError) for the field they
//! read; setters validate their argument and fail with an
//! [`ArgumentError`](crate::ArgumentError) without touching the sentence.

use std::fmt;

use crate::{ArgumentError, FieldIndex, FramingError, Nmea0183Parser, RawSentence, TalkerId};

/// Declares the field layout of a sentence type: one variant per field, with its 1-based
/// index as discriminant.
macro_rules! field_layout {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $index:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $index,
            )*
        }

        impl $name {
            /// All fields, in field order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// The name of the field.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)*
                }
            }

            /// Looks a field up by name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|field| field.name() == name)
            }
        }

        impl $crate::FieldIndex for $name {
            fn index(self) -> usize {
                self as usize
            }
        }
    };
}

mod bod;
mod gga;
mod gll;
mod gsa;
mod gsv;
mod rmb;
mod rmc;
mod rte;
mod vtg;
mod wpl;
mod zda;

pub use bod::{BOD, BodField};
pub use gga::{GGA, GgaField};
pub use gll::{GLL, GllField};
pub use gsa::{GSA, GsaField};
pub use gsv::{GSV, GsvField};
pub use rmb::{RMB, RmbField};
pub use rmc::{RMC, RmcField};
pub use rte::{RTE, RteField};
pub use vtg::{VTG, VtgField};
pub use wpl::{WPL, WplField};
pub use zda::{ZDA, ZdaField};

/// Sentence types with a typed layout.
///
/// Any other type code resolves to [`SentenceId::Unknown`]; resolution never fails.
///
/// ```rust
/// use marine_nmea::SentenceId;
///
/// assert_eq!(SentenceId::from_type_code("RMC"), SentenceId::RMC);
/// assert_eq!(SentenceId::from_type_code("XDR"), SentenceId::Unknown);
/// assert_eq!(SentenceId::from_type_code(""), SentenceId::Unknown);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceId {
    /// Bearing - Origin to Destination
    BOD,
    /// Global Positioning System Fix Data
    GGA,
    /// Geographic Position - Latitude/Longitude
    GLL,
    /// GPS DOP and active satellites
    GSA,
    /// Satellites in View
    GSV,
    /// Recommended Minimum Navigation Information
    RMB,
    /// Recommended Minimum Specific GNSS Data
    RMC,
    /// Routes
    RTE,
    /// Track made good and Ground speed
    VTG,
    /// Waypoint Location
    WPL,
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA,
    /// Any other sentence type
    Unknown,
}

impl SentenceId {
    /// Resolves a sentence type code, e.g. `"GGA"`.
    pub fn from_type_code(code: &str) -> Self {
        match code {
            "BOD" => Self::BOD,
            "GGA" => Self::GGA,
            "GLL" => Self::GLL,
            "GSA" => Self::GSA,
            "GSV" => Self::GSV,
            "RMB" => Self::RMB,
            "RMC" => Self::RMC,
            "RTE" => Self::RTE,
            "VTG" => Self::VTG,
            "WPL" => Self::WPL,
            "ZDA" => Self::ZDA,
            _ => Self::Unknown,
        }
    }

    /// The type code of the sentence, empty for [`SentenceId::Unknown`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BOD => "BOD",
            Self::GGA => "GGA",
            Self::GLL => "GLL",
            Self::GSA => "GSA",
            Self::GSV => "GSV",
            Self::RMB => "RMB",
            Self::RMC => "RMC",
            Self::RTE => "RTE",
            Self::VTG => "VTG",
            Self::WPL => "WPL",
            Self::ZDA => "ZDA",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            id => f.write_str(id.as_str()),
        }
    }
}

/// A typed view over one [`RawSentence`].
///
/// Implemented with `#[derive(Sentence)]`, see [`marine_nmea_derive`].
///
/// # Examples
///
/// ```rust
/// use marine_nmea::{FramingError, Sentence, SentenceId, TalkerId, WPL};
///
/// let wpl = WPL::parse("$GPWPL,5536.200,N,01436.500,E,RUSKI*1F").unwrap();
/// assert_eq!(wpl.talker_id(), TalkerId::GP);
///
/// // A sentence of another type is not a WPL
/// assert_eq!(
///     WPL::parse("$GPGLL,6011.552,N,02501.941,E,120045,A*26"),
///     Err(FramingError::UnexpectedSentenceType {
///         expected: SentenceId::WPL,
///         found: "GLL".to_owned()
///     })
/// );
///
/// // An empty sentence to be filled in with setters
/// let empty = WPL::new(TalkerId::EC);
/// assert_eq!(empty.to_string(), "$ECWPL,,,,,*61");
/// ```
pub trait Sentence: Sized {
    /// The sentence type this view is bound to.
    const SENTENCE_ID: SentenceId;

    /// Number of fields of a sentence built with [`Sentence::new`].
    const FIELD_COUNT: usize;

    /// Wraps a raw sentence without checking its type.
    #[doc(hidden)]
    fn from_raw_unchecked(raw: RawSentence) -> Self;

    fn raw(&self) -> &RawSentence;

    fn raw_mut(&mut self) -> &mut RawSentence;

    fn into_raw(self) -> RawSentence;

    /// Wraps a raw sentence of the matching type.
    ///
    /// Sentences with fewer fields than [`Sentence::FIELD_COUNT`] are accepted; the
    /// missing fields read as not available.
    fn from_raw(raw: RawSentence) -> Result<Self, FramingError> {
        if raw.sentence_id() != Self::SENTENCE_ID {
            return Err(FramingError::UnexpectedSentenceType {
                expected: Self::SENTENCE_ID,
                found: raw.sentence_type().to_owned(),
            });
        }
        Ok(Self::from_raw_unchecked(raw))
    }

    /// Frames a line with the default [`Nmea0183Parser`] and wraps it.
    fn parse(line: &str) -> Result<Self, FramingError> {
        Self::from_raw(Nmea0183Parser::new().frame(line)?)
    }

    /// Creates an empty sentence, every field not available.
    fn new(talker_id: TalkerId) -> Self {
        Self::from_raw_unchecked(RawSentence::new(
            talker_id,
            Self::SENTENCE_ID,
            Self::FIELD_COUNT,
        ))
    }

    fn talker_id(&self) -> TalkerId {
        self.raw().talker_id()
    }
}

/// A parsed sentence of any type.
///
/// Each known [`SentenceId`] maps to exactly one variant; everything else is kept as a
/// [`NmeaSentence::Generic`] raw sentence, whose fields stay accessible.
///
/// ## Example Usage
///
/// ```rust
/// use marine_nmea::{NmeaSentence, parse_sentence};
///
/// let sentence = parse_sentence("$GPZDA,032915,07,08,2004,00,00*4D").unwrap();
/// match sentence {
///     NmeaSentence::ZDA(zda) => {
///         assert!(zda.time().is_ok());
///         assert!(zda.date().is_ok());
///     }
///     _ => panic!("expected a ZDA sentence"),
/// }
///
/// // Unrecognized types are not an error
/// let sentence = parse_sentence("$IIXDR,C,19.52,C,TempAir*19").unwrap();
/// assert_eq!(sentence.raw().string(4), Ok("TempAir"));
/// ```
///
/// ## Supported Sentence Types
///
/// | Variant      | Sentence Type                                           | Description                      |
/// |--------------|---------------------------------------------------------|----------------------------------|
/// | BOD([`BOD`]) | Bearing - Origin to Destination                         | Bearing between two waypoints    |
/// | GGA([`GGA`]) | Global Positioning System Fix Data                      | GPS position and fix quality     |
/// | GLL([`GLL`]) | Geographic Position - Latitude/Longitude                | Latitude/longitude with time     |
/// | GSA([`GSA`]) | GPS DOP and active satellites                           | Satellite constellation info     |
/// | GSV([`GSV`]) | Satellites in View                                      | Individual satellite details     |
/// | RMB([`RMB`]) | Recommended Minimum Navigation Information              | Steering to a destination        |
/// | RMC([`RMC`]) | Recommended Minimum Specific GNSS Data                  | Essential navigation data        |
/// | RTE([`RTE`]) | Routes                                                  | Waypoint identifiers of a route  |
/// | VTG([`VTG`]) | Track made good and Ground speed                        | Velocity information             |
/// | WPL([`WPL`]) | Waypoint Location                                       | Named position                   |
/// | ZDA([`ZDA`]) | Time & Date - UTC, day, month, year and local time zone | UTC time and date with time zone |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    /// Bearing - Origin to Destination
    BOD(BOD),
    /// Global Positioning System Fix Data
    GGA(GGA),
    /// Geographic Position - Latitude/Longitude
    GLL(GLL),
    /// GPS DOP and active satellites
    GSA(GSA),
    /// Satellites in View
    GSV(GSV),
    /// Recommended Minimum Navigation Information
    RMB(RMB),
    /// Recommended Minimum Specific GNSS Data
    RMC(RMC),
    /// Routes
    RTE(RTE),
    /// Track made good and Ground speed
    VTG(VTG),
    /// Waypoint Location
    WPL(WPL),
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA(ZDA),
    /// Any sentence type without a typed layout
    Generic(RawSentence),
}

impl NmeaSentence {
    /// Wraps a raw sentence into the variant of its type.
    pub fn from_raw(raw: RawSentence) -> Self {
        match raw.sentence_id() {
            SentenceId::BOD => Self::BOD(BOD::from_raw_unchecked(raw)),
            SentenceId::GGA => Self::GGA(GGA::from_raw_unchecked(raw)),
            SentenceId::GLL => Self::GLL(GLL::from_raw_unchecked(raw)),
            SentenceId::GSA => Self::GSA(GSA::from_raw_unchecked(raw)),
            SentenceId::GSV => Self::GSV(GSV::from_raw_unchecked(raw)),
            SentenceId::RMB => Self::RMB(RMB::from_raw_unchecked(raw)),
            SentenceId::RMC => Self::RMC(RMC::from_raw_unchecked(raw)),
            SentenceId::RTE => Self::RTE(RTE::from_raw_unchecked(raw)),
            SentenceId::VTG => Self::VTG(VTG::from_raw_unchecked(raw)),
            SentenceId::WPL => Self::WPL(WPL::from_raw_unchecked(raw)),
            SentenceId::ZDA => Self::ZDA(ZDA::from_raw_unchecked(raw)),
            SentenceId::Unknown => {
                tracing::trace!(
                    talker_id = %raw.talker_id(),
                    sentence_type = raw.sentence_type(),
                    "no typed layout, keeping generic sentence"
                );
                Self::Generic(raw)
            }
        }
    }

    pub fn raw(&self) -> &RawSentence {
        match self {
            Self::BOD(sentence) => sentence.raw(),
            Self::GGA(sentence) => sentence.raw(),
            Self::GLL(sentence) => sentence.raw(),
            Self::GSA(sentence) => sentence.raw(),
            Self::GSV(sentence) => sentence.raw(),
            Self::RMB(sentence) => sentence.raw(),
            Self::RMC(sentence) => sentence.raw(),
            Self::RTE(sentence) => sentence.raw(),
            Self::VTG(sentence) => sentence.raw(),
            Self::WPL(sentence) => sentence.raw(),
            Self::ZDA(sentence) => sentence.raw(),
            Self::Generic(raw) => raw,
        }
    }

    pub fn into_raw(self) -> RawSentence {
        match self {
            Self::BOD(sentence) => sentence.into_raw(),
            Self::GGA(sentence) => sentence.into_raw(),
            Self::GLL(sentence) => sentence.into_raw(),
            Self::GSA(sentence) => sentence.into_raw(),
            Self::GSV(sentence) => sentence.into_raw(),
            Self::RMB(sentence) => sentence.into_raw(),
            Self::RMC(sentence) => sentence.into_raw(),
            Self::RTE(sentence) => sentence.into_raw(),
            Self::VTG(sentence) => sentence.into_raw(),
            Self::WPL(sentence) => sentence.into_raw(),
            Self::ZDA(sentence) => sentence.into_raw(),
            Self::Generic(raw) => raw,
        }
    }

    pub fn sentence_id(&self) -> SentenceId {
        self.raw().sentence_id()
    }

    pub fn talker_id(&self) -> TalkerId {
        self.raw().talker_id()
    }
}

impl From<RawSentence> for NmeaSentence {
    fn from(raw: RawSentence) -> Self {
        NmeaSentence::from_raw(raw)
    }
}

impl fmt::Display for NmeaSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.raw(), f)
    }
}

impl Nmea0183Parser {
    /// Resolves the type of a framed sentence. Never fails: unrecognized type codes are
    /// [`SentenceId::Unknown`].
    pub fn resolve_type(&self, raw: &RawSentence) -> SentenceId {
        SentenceId::from_type_code(raw.sentence_type())
    }

    /// Frames a line and wraps it into the [`NmeaSentence`] variant of its type.
    ///
    /// ```rust
    /// use marine_nmea::{FramingError, Nmea0183Parser, NmeaSentence};
    ///
    /// let parser = Nmea0183Parser::strict();
    ///
    /// let sentence = parser.parse("$GPWPL,5536.200,N,01436.500,E,RUSKI*1F").unwrap();
    /// assert!(matches!(sentence, NmeaSentence::WPL(_)));
    ///
    /// assert_eq!(
    ///     parser.parse("$GPWPL,5536.200,N,01436.500,E,RUSKI"),
    ///     Err(FramingError::MissingChecksum)
    /// );
    /// ```
    pub fn parse(&self, line: &str) -> Result<NmeaSentence, FramingError> {
        self.frame(line).map(NmeaSentence::from_raw)
    }
}

/// Parses one line with the default [`Nmea0183Parser`].
pub fn parse_sentence(line: &str) -> Result<NmeaSentence, FramingError> {
    Nmea0183Parser::new().parse(line)
}

/// Writes a decimal value and the unit or reference marker in the field after it.
pub(crate) fn set_with_unit(
    raw: &mut RawSentence,
    index: impl FieldIndex,
    value: f64,
    unit: char,
) -> Result<(), ArgumentError> {
    let index = raw.check_index(index)?;
    raw.check_index(index + 1)?;

    raw.set_double(index, value)?;
    raw.set_char(index + 1, unit)
}

/// Writes a two-digit (or wider) integer, as used for counts and satellite numbers.
pub(crate) fn set_padded(
    raw: &mut RawSentence,
    index: impl FieldIndex,
    value: u16,
) -> Result<(), ArgumentError> {
    raw.set_string(index, &format!("{value:02}"))
}

/// Checks a 1-based sentence count or index of a multi-sentence message.
pub(crate) fn check_sequence(name: &'static str, value: u8) -> Result<u8, ArgumentError> {
    if value == 0 {
        return Err(ArgumentError::OutOfRange {
            name,
            value: f64::from(value),
        });
    }
    Ok(value)
}
