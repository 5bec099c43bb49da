use crate::{
    ChecksumStatus, FramingError, Nmea0183Parser, calculate_checksum, checksum_status,
    format_checksum, is_valid_checksum,
};

const VALID_LINES: &[&str] = &[
    "$GPWPL,5536.200,N,01436.500,E,RUSKI*1F",
    "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B",
    "$GPRMB,A,0.00,R,,RUSKI,5536.200,N,01436.500,E,432.3,234.9,,V*58",
    "$GPVTG,46.96,T,,,16.89,N,31.28,K,A*43",
    "$GPGGA,120044.567,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*63",
    "$GPGLL,6011.552,N,02501.941,E,120045,A*26",
    "$GPGSA,A,3,02,,,07,,09,24,26,,,,,1.6,1.6,1.0*3D",
    "$GPGSV,3,2,12,15,56,182,51,17,38,163,47,18,63,058,50,21,53,329,47*73",
    "$GPRTE,1,1,c,0,MELIN,RUSKI,KNUDAN*25",
    "$GPZDA,032915,07,08,2004,00,00*4D",
    "$GPBOD,234.9,T,228.8,M,RUSKI,*1D",
    "$IIXDR,C,19.52,C,TempAir*19",
    "!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26",
];

#[test]
fn test_valid_lines() {
    for line in VALID_LINES {
        assert!(is_valid_checksum(line), "{line}");

        let (_, suffix) = line.split_once('*').unwrap();
        assert_eq!(format_checksum(calculate_checksum(line)), suffix, "{line}");
    }
}

#[test]
fn test_suffix_case_insensitive() {
    assert!(is_valid_checksum(
        "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0b"
    ));
    assert!(is_valid_checksum(
        "$GPGSA,A,3,02,,,07,,09,24,26,,,,,1.6,1.6,1.0*3d"
    ));
}

#[test]
fn test_single_byte_change_is_detected() {
    for line in VALID_LINES {
        let corrupted = line.replacen(',', ";", 1);
        assert!(
            matches!(
                checksum_status(&corrupted),
                ChecksumStatus::Mismatch { .. }
            ),
            "{corrupted}"
        );
    }
}

#[test]
fn test_missing_is_not_mismatch() {
    let line = "$GPWPL,5536.200,N,01436.500,E,RUSKI";

    assert_eq!(checksum_status(line), ChecksumStatus::Missing);
    assert!(!is_valid_checksum(line));
    assert_eq!(calculate_checksum(line), 0x1F);

    assert_eq!(
        Nmea0183Parser::strict().frame(line),
        Err(FramingError::MissingChecksum)
    );
    assert_eq!(
        Nmea0183Parser::strict().frame("$GPWPL,5536.200,N,01436.500,E,RUSKI*11"),
        Err(FramingError::ChecksumMismatch {
            expected: 0x1F,
            found: 0x11
        })
    );
}

#[test]
fn test_malformed_suffix() {
    for suffix in ["", "1", "1F0", "G1", " 1F"] {
        let line = format!("$GPWPL,5536.200,N,01436.500,E,RUSKI*{suffix}");
        assert_eq!(checksum_status(&line), ChecksumStatus::Malformed, "{line}");
        assert_eq!(
            Nmea0183Parser::new().frame(&line),
            Err(FramingError::MalformedChecksum(suffix.to_owned()))
        );
    }
}

#[test]
fn test_emitted_checksum_is_uppercase() {
    let raw = Nmea0183Parser::new()
        .frame("$GPZDA,032915,07,08,2004,00,00*4d")
        .unwrap();

    assert_eq!(raw.to_string(), "$GPZDA,032915,07,08,2004,00,00*4D");
}
