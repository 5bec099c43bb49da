//! # NMEA Content
//!
//! Value types derived from sentence fields: [`Position`], [`Waypoint`], [`Satellite`]
//! and the closed single-character enumerations used across sentence types.
//!
//! All of them are plain values. They are computed from the fields of a
//! [`RawSentence`](crate::RawSentence) on each call and hold no reference back to it.

pub mod parse;
pub mod sentences;

use std::fmt;

use nom::Parser;

use crate::{ArgumentError, IResult, NmeaParse, error::check_range};

/// A closed enumeration written as a single character in a sentence field.
///
/// Each enumeration owns its character table and the inverse mapping.
pub trait NmeaEnum: Sized + Copy {
    /// Maps a field character to its value, `None` if the character has no mapping.
    fn from_char(c: char) -> Option<Self>;

    /// The character the value is written as.
    fn to_char(self) -> char;
}

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl NmeaEnum for $name {
            fn from_char(c: char) -> Option<Self> {
                match c {
                    $($char => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn to_char(self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl NmeaParse for $name {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => stringify!($variant),)*
                })
            }
        }
    };
}

parsable_enum! {
    /// Data status, e.g. of an RMC fix or an RMB arrival alarm
    pub enum DataStatus {
        /// A - Active, data valid
        'A' => Active,
        /// V - Void, data invalid
        'V' => Void,
    }
}

parsable_enum! {
    /// Compass direction, hemisphere or steering side
    pub enum Direction {
        /// N - North
        'N' => North,
        /// S - South
        'S' => South,
        /// E - East
        'E' => East,
        /// W - West
        'W' => West,
        /// L - Left (port)
        'L' => Left,
        /// R - Right (starboard)
        'R' => Right,
    }
}

impl Direction {
    /// Returns `true` for the latitude hemispheres `North` and `South`.
    pub fn is_latitude(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Returns `true` for the longitude hemispheres `East` and `West`.
    pub fn is_longitude(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Sign a hemisphere applies to a coordinate magnitude.
    pub(crate) fn sign(self) -> f64 {
        match self {
            Direction::South | Direction::West => -1.0,
            _ => 1.0,
        }
    }
}

parsable_enum! {
    /// FAA Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum GpsMode {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// D - Differential Mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// F - RTK Float mode
        'F' => FloatRtk,
        /// M - Manual Input Mode
        'M' => Manual,
        /// N - Data Not Valid
        'N' => NotValid,
        /// P - Precise
        'P' => Precise,
        /// R - RTK Integer mode
        'R' => FixedRtk,
        /// S - Simulated Mode
        'S' => Simulator,
    }
}

parsable_enum! {
    /// Units of measurement
    pub enum Units {
        /// M - Meters
        'M' => Meter,
        /// f - Feet
        'f' => Feet,
        /// K - Kilometers per hour
        'K' => Kmh,
        /// N - Knots
        'N' => Knot,
    }
}

parsable_enum! {
    /// Quality of the GPS fix
    pub enum GpsFixQuality {
        /// 0 - Fix not available
        '0' => NoFix,
        /// 1 - GPS fix
        '1' => GPSFix,
        /// 2 - Differential GPS fix
        '2' => DGPSFix,
        /// 3 - PPS fix
        '3' => PPSFix,
        /// 4 - Real Time Kinematic
        '4' => RTK,
        /// 5 - Float RTK
        '5' => FloatRTK,
        /// 6 - estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulation,
    }
}

parsable_enum! {
    /// Selection Mode
    pub enum SelectionMode {
        /// A - Automatic, 2D/3D
        'A' => Automatic,
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
    }
}

parsable_enum! {
    /// Fix Mode
    pub enum FixMode {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D Fix
        '2' => Fix2D,
        /// 3 - 3D Fix
        '3' => Fix3D,
    }
}

parsable_enum! {
    /// Route type of an RTE sentence
    pub enum RouteType {
        /// c - Complete route, all waypoints
        'c' => Complete,
        /// w - Working route, first waypoint is the one last passed
        'w' => Working,
    }
}

/// Geographic position in decimal degrees.
///
/// Each coordinate carries its hemisphere. The signed values always equal the magnitude
/// times the hemisphere sign, and the hemisphere is kept even for a magnitude of zero so
/// `0000.000,S` is written back as it was read.
///
/// ```rust
/// use marine_nmea::{Direction, Position};
///
/// let position = Position::new(-33.8568, 151.2153).unwrap();
/// assert_eq!(position.lat_hemisphere(), Direction::South);
/// assert_eq!(position.lon_hemisphere(), Direction::East);
///
/// assert!(Position::new(90.5, 0.0).is_err());
/// assert!(Position::from_hemispheres(12.0, Direction::East, 0.0, Direction::East).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
    lat_hemisphere: Direction,
    lon_hemisphere: Direction,
}

impl Position {
    /// Creates a position from signed decimal degrees.
    ///
    /// Negative latitudes are south, negative longitudes are west.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ArgumentError> {
        let latitude = check_range("latitude", latitude, -90.0..=90.0)?;
        let longitude = check_range("longitude", longitude, -180.0..=180.0)?;

        Ok(Position {
            latitude,
            longitude,
            lat_hemisphere: if latitude < 0.0 {
                Direction::South
            } else {
                Direction::North
            },
            lon_hemisphere: if longitude < 0.0 {
                Direction::West
            } else {
                Direction::East
            },
        })
    }

    /// Creates a position from unsigned magnitudes and explicit hemispheres.
    pub fn from_hemispheres(
        latitude: f64,
        lat_hemisphere: Direction,
        longitude: f64,
        lon_hemisphere: Direction,
    ) -> Result<Self, ArgumentError> {
        if !lat_hemisphere.is_latitude() {
            return Err(ArgumentError::UnexpectedDirection {
                expected: "North or South",
                found: lat_hemisphere,
            });
        }
        if !lon_hemisphere.is_longitude() {
            return Err(ArgumentError::UnexpectedDirection {
                expected: "East or West",
                found: lon_hemisphere,
            });
        }

        let latitude = check_range("latitude", latitude, 0.0..=90.0)?;
        let longitude = check_range("longitude", longitude, 0.0..=180.0)?;

        Ok(Position {
            latitude: latitude * lat_hemisphere.sign(),
            longitude: longitude * lon_hemisphere.sign(),
            lat_hemisphere,
            lon_hemisphere,
        })
    }

    /// Latitude in decimal degrees, negative in the southern hemisphere.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees, negative in the western hemisphere.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn lat_hemisphere(&self) -> Direction {
        self.lat_hemisphere
    }

    pub fn lon_hemisphere(&self) -> Direction {
        self.lon_hemisphere
    }
}

/// A named position, as used by WPL and RMB.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    id: String,
    position: Position,
}

impl Waypoint {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Waypoint {
            id: id.into(),
            position,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Satellite information
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Satellite {
    /// Satellite PRN number
    pub prn: u16,
    /// Elevation in degrees (0-90)
    pub elevation: Option<u8>,
    /// Azimuth in degrees (0-359)
    pub azimuth: Option<u16>,
    /// Signal-to-noise ratio in dB (0-99)
    pub snr: Option<u8>,
}
