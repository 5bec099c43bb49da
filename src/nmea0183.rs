//! # NMEA 0183 Framing
//!
//! This module turns one line of text into a [`RawSentence`]. It handles the standard
//! NMEA 0183 format: `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! The framer is configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - Line ending requirements (CRLF required, forbidden, or stripped when present)
//!
//! The checksum codec ([`checksum`], [`calculate_checksum`], [`checksum_status`]) is
//! exposed on its own for callers that only need to validate or emit lines.

use nom::{
    Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::one_of,
    combinator::{eof, peek},
    error::ErrorKind,
    sequence::terminated,
};

use crate::{FramingError, IResult, RawSentence, TalkerId, parsing::consumed};

/// Defines how the parser should handle NMEA message checksums.
///
/// NMEA 0183 messages can include an optional checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// message content (excluding the `$` prefix and `*` delimiter).
///
/// In both modes a checksum that *is* present must be well formed and must match.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// Checksum is required and must be present.
    ///
    /// The parser will fail with [`FramingError::MissingChecksum`] if no `*CC` checksum
    /// is found at the end of the message.
    ///
    /// Use this mode for strict NMEA 0183 compliance or when data integrity is critical.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// Use this mode when working with mixed message sources or legacy equipment
    /// that may not always include checksums.
    #[default]
    Optional,
}

/// Defines how the parser should handle line endings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    /// CRLF line ending is required and must be present.
    ///
    /// Use this mode when parsing standard NMEA log files or serial port data.
    Required,

    /// Line endings are forbidden: the message must not end with CR or LF.
    ///
    /// Use this mode when parsing messages from APIs, databases, or other
    /// sources where line endings have been removed.
    Forbidden,

    /// Trailing whitespace and line terminators are stripped if present.
    #[default]
    Optional,
}

/// Outcome of validating the checksum suffix of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// The line has no `*` delimiter.
    Missing,
    /// The suffix matches the calculated checksum.
    Valid,
    /// The suffix is well formed but does not match.
    Mismatch {
        /// The checksum calculated from the line
        expected: u8,
        /// The checksum found after `*`
        found: u8,
    },
    /// The text after `*` is not exactly two hex digits.
    Malformed,
}

/// Calculates the NMEA 0183 checksum of `data`: the XOR of all its bytes.
///
/// `data` is the message content only, without the sentinel, the `*` delimiter and the
/// checksum itself. Use [`calculate_checksum`] to compute it from a complete line.
pub fn checksum(data: impl AsRef<[u8]>) -> u8 {
    data.as_ref()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Calculates the checksum of a complete line.
///
/// Covers every byte after the `$`/`!` sentinel up to the `*` delimiter, or up to the
/// end of the line (trailing whitespace excluded) when there is none.
///
/// ```rust
/// use marine_nmea::calculate_checksum;
///
/// assert_eq!(calculate_checksum("$GPWPL,5536.200,N,01436.500,E,RUSKI*1F"), 0x1F);
/// assert_eq!(calculate_checksum("$GPWPL,5536.200,N,01436.500,E,RUSKI\r\n"), 0x1F);
/// ```
pub fn calculate_checksum(line: &str) -> u8 {
    let data = line.strip_prefix(['$', '!']).unwrap_or(line);
    let data = match data.split_once('*') {
        Some((data, _)) => data,
        None => data.trim_end(),
    };
    checksum(data)
}

/// Validates the checksum suffix of a complete line.
///
/// Tells apart a line without checksum from one whose checksum does not match. Hex
/// digits are compared case-insensitively.
///
/// ```rust
/// use marine_nmea::{ChecksumStatus, checksum_status};
///
/// assert_eq!(
///     checksum_status("$GPWPL,5536.200,N,01436.500,E,RUSKI*1f"),
///     ChecksumStatus::Valid
/// );
/// assert_eq!(
///     checksum_status("$GPWPL,5536.200,N,01436.500,E,RUSKI"),
///     ChecksumStatus::Missing
/// );
/// assert_eq!(
///     checksum_status("$GPWPL,5536.200,N,01436.500,E,RUSKI*2F"),
///     ChecksumStatus::Mismatch { expected: 0x1F, found: 0x2F }
/// );
/// assert_eq!(
///     checksum_status("$GPWPL,5536.200,N,01436.500,E,RUSKI*1"),
///     ChecksumStatus::Malformed
/// );
/// ```
pub fn checksum_status(line: &str) -> ChecksumStatus {
    let line = line.trim_end();
    let data = line.strip_prefix(['$', '!']).unwrap_or(line);

    let Some((data, suffix)) = data.split_once('*') else {
        return ChecksumStatus::Missing;
    };

    match parse_checksum(suffix) {
        Some(found) if found == checksum(data) => ChecksumStatus::Valid,
        Some(found) => ChecksumStatus::Mismatch {
            expected: checksum(data),
            found,
        },
        None => ChecksumStatus::Malformed,
    }
}

/// Returns `true` if the line carries a checksum and it matches.
pub fn is_valid_checksum(line: &str) -> bool {
    checksum_status(line) == ChecksumStatus::Valid
}

/// Renders a checksum as two uppercase hex digits.
///
/// ```rust
/// use marine_nmea::format_checksum;
///
/// assert_eq!(format_checksum(0x0B), "0B");
/// assert_eq!(format_checksum(0xAF), "AF");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Parses the two hex digits after `*`.
fn checksum_suffix(i: &str) -> IResult<&str, u8> {
    consumed(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        ErrorKind::HexDigit,
    )
    .map_res(|hex| u8::from_str_radix(hex, 16))
    .parse(i)
}

fn parse_checksum(suffix: &str) -> Option<u8> {
    checksum_suffix(suffix).ok().map(|(_, cc)| cc)
}

fn is_address_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

/// Parses the address field into talker and sentence type.
///
/// The address must be followed by a field delimiter or the end of the data.
fn address(i: &str) -> IResult<&str, (&str, &str)> {
    terminated(
        (
            take_while_m_n(2, 2, is_address_char),
            take_while_m_n(3, 4, is_address_char),
        ),
        peek(alt((tag(","), eof))),
    )
    .parse(i)
}

/// Configures an NMEA 0183 framer.
///
/// It uses the builder pattern to allow for flexible configuration of the parser settings.
///
/// # Examples
///
/// ```rust
/// use marine_nmea::{ChecksumMode, FramingError, LineEndingMode, Nmea0183ParserBuilder};
///
/// // Strict: checksum and CRLF both required
/// let strict = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Required)
///     .line_ending_mode(LineEndingMode::Required)
///     .build();
/// assert!(strict.frame("$GPGLL,6011.552,N,02501.941,E,120045,A*26\r\n").is_ok());
/// assert_eq!(
///     strict.frame("$GPGLL,6011.552,N,02501.941,E,120045,A*26"),
///     Err(FramingError::MissingLineEnding)
/// );
/// assert_eq!(
///     strict.frame("$GPGLL,6011.552,N,02501.941,E,120045,A\r\n"),
///     Err(FramingError::MissingChecksum)
/// );
///
/// // Lenient: checksum optional, CRLF forbidden
/// let lenient = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Optional)
///     .line_ending_mode(LineEndingMode::Forbidden)
///     .build();
/// assert!(lenient.frame("$GPGLL,6011.552,N,02501.941,E,120045,A*26").is_ok());
/// assert!(lenient.frame("$GPGLL,6011.552,N,02501.941,E,120045,A").is_ok());
/// assert!(lenient.frame("$GPGLL,6011.552,N,02501.941,E,120045,A*99").is_err());
/// assert_eq!(
///     lenient.frame("$GPGLL,6011.552,N,02501.941,E,120045,A\r\n"),
///     Err(FramingError::UnexpectedLineEnding)
/// );
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy)]
pub struct Nmea0183ParserBuilder {
    /// Checksum mode for the parser.
    checksum_mode: ChecksumMode,

    /// Line ending mode for the parser.
    line_ending_mode: LineEndingMode,
}

impl Nmea0183ParserBuilder {
    /// Creates a new NMEA 0183 parser builder with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Optional`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    pub fn new() -> Self {
        Nmea0183ParserBuilder::default()
    }

    /// Sets the checksum mode for the parser.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode for the parser.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Builds the parser with the configured settings.
    pub fn build(self) -> Nmea0183Parser {
        Nmea0183Parser {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
        }
    }
}

/// Frames NMEA 0183 lines and dispatches them to typed sentences.
///
/// The parser holds only its configuration. It is `Copy` and can be shared freely between
/// threads; there is no global instance.
///
/// ```rust
/// use marine_nmea::{FramingError, Nmea0183Parser};
///
/// let line = "$GPGLL,6011.552,N,02501.941,E,120045,A";
///
/// // A missing checksum is accepted by default...
/// assert!(Nmea0183Parser::new().frame(line).is_ok());
///
/// // ...and rejected in strict mode
/// assert_eq!(
///     Nmea0183Parser::strict().frame(line),
///     Err(FramingError::MissingChecksum)
/// );
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Nmea0183Parser {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
}

impl Nmea0183Parser {
    /// Creates a parser with the default settings, see [`Nmea0183ParserBuilder::new`].
    pub fn new() -> Self {
        Nmea0183Parser::default()
    }

    /// Creates a parser that requires a checksum on every line.
    pub fn strict() -> Self {
        Nmea0183ParserBuilder::new()
            .checksum_mode(ChecksumMode::Required)
            .build()
    }

    pub fn builder() -> Nmea0183ParserBuilder {
        Nmea0183ParserBuilder::new()
    }

    pub fn checksum_mode(&self) -> ChecksumMode {
        self.checksum_mode
    }

    pub fn line_ending_mode(&self) -> LineEndingMode {
        self.line_ending_mode
    }

    /// Frames one line into a [`RawSentence`].
    ///
    /// The framer will:
    /// * Handle the line ending according to the [`LineEndingMode`]
    /// * Validate that the input is ASCII-only
    /// * Expect the message to start with `$` or `!`
    /// * Validate the checksum according to the [`ChecksumMode`]
    /// * Split the address field into talker and sentence type
    /// * Split the rest into fields, keeping empty ones
    ///
    /// Fields are not trimmed.
    pub fn frame(&self, line: &str) -> Result<RawSentence, FramingError> {
        self.frame_line(line).inspect_err(|error| {
            tracing::debug!(%error, line, "rejected NMEA 0183 sentence");
        })
    }

    fn frame_line(&self, line: &str) -> Result<RawSentence, FramingError> {
        let data = self.strip_line_ending(line)?;

        if !data.is_ascii() {
            return Err(FramingError::NonAscii);
        }

        let sentinel: IResult<&str, char> = one_of("$!").parse(data);
        let (data, begin_char) = sentinel.map_err(|_| FramingError::MissingSentinel)?;

        let (data, suffix) = match data.split_once('*') {
            Some((data, suffix)) => (data, Some(suffix)),
            None => (data, None),
        };

        match suffix {
            Some(suffix) => {
                let found = parse_checksum(suffix)
                    .ok_or_else(|| FramingError::MalformedChecksum(suffix.to_owned()))?;
                let expected = checksum(data);

                if found != expected {
                    return Err(FramingError::ChecksumMismatch { expected, found });
                }
            }
            None if self.checksum_mode == ChecksumMode::Required => {
                return Err(FramingError::MissingChecksum);
            }
            None => {}
        }

        let (rest, (talker, sentence_type)) = address(data).map_err(|_| {
            let address = data.split(',').next().unwrap_or_default();
            FramingError::InvalidAddress(address.to_owned())
        })?;
        let talker_id =
            TalkerId::new(talker).map_err(|_| FramingError::InvalidAddress(talker.to_owned()))?;

        let fields = match rest.strip_prefix(',') {
            Some(fields) => fields.split(',').map(str::to_owned).collect(),
            None => Vec::new(),
        };

        Ok(RawSentence::from_parts(
            begin_char,
            talker_id,
            sentence_type,
            fields,
            line,
        ))
    }

    fn strip_line_ending<'a>(&self, line: &'a str) -> Result<&'a str, FramingError> {
        match self.line_ending_mode {
            LineEndingMode::Required => line
                .strip_suffix("\r\n")
                .ok_or(FramingError::MissingLineEnding),
            LineEndingMode::Forbidden if line.ends_with(['\r', '\n']) => {
                Err(FramingError::UnexpectedLineEnding)
            }
            LineEndingMode::Forbidden => Ok(line),
            LineEndingMode::Optional => Ok(line.trim_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WPL: &str = "$GPWPL,5536.200,N,01436.500,E,RUSKI*1F";

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(""), 0);
        assert_eq!(checksum("GPWPL,5536.200,N,01436.500,E,RUSKI"), 0x1F);
        assert_eq!(checksum(b"AA"), 0);
    }

    #[test]
    fn test_checksum_suffix() {
        let res: IResult<_, _> = checksum_suffix("1F");
        assert_eq!(res, Ok(("", 0x1F)));

        let res: IResult<_, _> = checksum_suffix("af");
        assert_eq!(res, Ok(("", 0xAF)));

        assert!(checksum_suffix("1").is_err());
        assert!(checksum_suffix("1F43").is_err());
        assert!(checksum_suffix("1z").is_err());
        assert!(checksum_suffix("").is_err());
    }

    #[test]
    fn test_checksum_status_ignores_line_ending() {
        assert_eq!(
            checksum_status(&format!("{WPL}\r\n")),
            ChecksumStatus::Valid
        );
        assert!(is_valid_checksum(WPL));
        assert!(!is_valid_checksum("$GPWPL,5536.200,N,01436.500,E,RUSKI"));
    }

    #[test]
    fn test_address() {
        let res: IResult<_, _> = address("GPRMC,1,2");
        assert_eq!(res, Ok((",1,2", ("GP", "RMC"))));

        let res: IResult<_, _> = address("GPRMC");
        assert_eq!(res, Ok(("", ("GP", "RMC"))));

        let res: IResult<_, _> = address("GPRMCA,1");
        assert_eq!(res, Ok((",1", ("GP", "RMCA"))));

        assert!(address("GPRM,1").is_err());
        assert!(address("GPRMCAB,1").is_err());
        assert!(address("gpRMC,1").is_err());
        assert!(address(",1,2").is_err());
    }

    #[test]
    fn test_line_endings() {
        let required = Nmea0183Parser::builder()
            .line_ending_mode(LineEndingMode::Required)
            .build();
        assert!(required.frame(&format!("{WPL}\r\n")).is_ok());
        assert_eq!(required.frame(WPL), Err(FramingError::MissingLineEnding));
        assert_eq!(
            required.frame(&format!("{WPL}\n")),
            Err(FramingError::MissingLineEnding)
        );

        let forbidden = Nmea0183Parser::builder()
            .line_ending_mode(LineEndingMode::Forbidden)
            .build();
        assert!(forbidden.frame(WPL).is_ok());
        assert_eq!(
            forbidden.frame(&format!("{WPL}\n")),
            Err(FramingError::UnexpectedLineEnding)
        );

        let optional = Nmea0183Parser::new();
        assert!(optional.frame(WPL).is_ok());
        assert!(optional.frame(&format!("{WPL}\r\n")).is_ok());
        assert!(optional.frame(&format!("{WPL} \n")).is_ok());
    }

    #[test]
    fn test_frame_keeps_original() {
        let line = format!("{WPL}\r\n");
        let raw = Nmea0183Parser::new().frame(&line).unwrap();
        assert_eq!(raw.original(), Some(line.as_str()));
    }

    #[test]
    fn test_frame_rejects() {
        let parser = Nmea0183Parser::new();

        assert_eq!(
            parser.frame("GPWPL,5536.200,N,01436.500,E,RUSKI*1F"),
            Err(FramingError::MissingSentinel)
        );
        assert_eq!(parser.frame(""), Err(FramingError::MissingSentinel));
        assert_eq!(
            parser.frame("$GPWPL,5536.200,N,01436.500,E,RÜSKI"),
            Err(FramingError::NonAscii)
        );
        assert_eq!(
            parser.frame("$GP,5536.200"),
            Err(FramingError::InvalidAddress("GP".to_owned()))
        );
        assert_eq!(
            parser.frame("$GPWPL,5536.200,N,01436.500,E,RUSKI*1G"),
            Err(FramingError::MalformedChecksum("1G".to_owned()))
        );
        assert_eq!(
            parser.frame("$GPWPL,5536.200,N,01436.500,E,RUSKI*1E"),
            Err(FramingError::ChecksumMismatch {
                expected: 0x1F,
                found: 0x1E
            })
        );
    }

    #[test]
    fn test_frame_without_fields() {
        let raw = Nmea0183Parser::new().frame("$GPRMC").unwrap();
        assert_eq!(raw.sentence_type(), "RMC");
        assert_eq!(raw.field_count(), 0);
    }

    #[test]
    fn test_frame_ais() {
        let raw = Nmea0183Parser::strict()
            .frame("!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26")
            .unwrap();

        assert_eq!(raw.begin_char(), '!');
        assert_eq!(raw.talker_id(), TalkerId::AI);
        assert_eq!(raw.sentence_type(), "VDM");
        assert_eq!(raw.field_count(), 6);
        assert_eq!(raw.string(3), Err(crate::FieldError::NotAvailable(3)));
        assert_eq!(raw.string(5), Ok("13aEOK?P00PD2wVMdLDRhgvL289?"));
    }
}
