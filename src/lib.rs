//! # Marine NMEA
//!
//! This library decodes and encodes NMEA 0183 sentences of the form:
//! `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! Decoding happens in layers:
//! - The [`Nmea0183Parser`] frames a line into a [`RawSentence`]: sentinel, talker,
//!   sentence type and the raw field strings, with the checksum verified
//! - The [`RawSentence`] field accessors read typed values out of single fields
//! - The composer in [`nmea_content::parse`] builds positions, times and dates out of
//!   groups of fields
//! - The registry maps the sentence type to one of the typed views, see [`NmeaSentence`]
//!
//! Every typed view can also be built with setters and written back with [`Display`].
//!
//! [`Display`]: std::fmt::Display
//!
//! ## Usage
//!
//! ```rust
//! use marine_nmea::{FieldError, NmeaSentence, Nmea0183Parser};
//!
//! let parser = Nmea0183Parser::new();
//!
//! match parser.parse("$GPGLL,6011.552,N,02501.941,E,120045,A*26\r\n") {
//!     Ok(NmeaSentence::GLL(gll)) => {
//!         let position = gll.position().unwrap();
//!         assert!(position.latitude() > 60.0);
//!
//!         // NMEA 2.3 mode indicator, not present in this sentence
//!         assert_eq!(gll.mode(), Err(FieldError::NotAvailable(7)));
//!     }
//!     Ok(other) => println!("other sentence: {other}"),
//!     Err(error) => println!("rejected line: {error}"),
//! }
//! ```
//!
//! ## Building Sentences
//!
//! ```rust
//! use marine_nmea::{Position, Sentence, TalkerId, WPL, Waypoint};
//!
//! let mut wpl = WPL::new(TalkerId::GP);
//! let position = Position::new(55.0 + 36.2 / 60.0, 14.0 + 36.5 / 60.0).unwrap();
//! wpl.set_waypoint(&Waypoint::new("RUSKI", position)).unwrap();
//!
//! assert_eq!(wpl.to_string(), "$GPWPL,5536.200,N,01436.500,E,RUSKI*1F");
//! ```

pub mod error;
mod nmea0183;
pub mod nmea_content;
mod parse;
pub mod parsing;
mod sentence;

pub use error::{ArgumentError, Error, FieldError, FramingError, IResult, OptionalField};
pub use nmea0183::*;
pub use nmea_content::{
    DataStatus, Direction, FixMode, GpsFixQuality, GpsMode, NmeaEnum, Position, RouteType,
    Satellite, SelectionMode, Units, Waypoint,
    sentences::{
        BOD, BodField, GGA, GLL, GSA, GSV, GgaField, GllField, GsaField, GsvField, NmeaSentence,
        RMB, RMC, RTE, RmbField, RmcField, RteField, Sentence, SentenceId, VTG, VtgField, WPL,
        WplField, ZDA, ZdaField, parse_sentence,
    },
};
pub use parse::NmeaParse;
pub use sentence::{FieldIndex, RawSentence, TalkerId};

/// Derives [`Sentence`](trait@Sentence) for a struct wrapping a single [`RawSentence`].
pub use marine_nmea_derive::Sentence;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;

#[cfg(test)]
mod tests {
    mod checksum;
    mod dispatch;
    mod framing;
    mod round_trip;
    mod scenarios;
}
