use std::thread;

use crate::{
    FramingError, Nmea0183Parser, NmeaSentence, RMC, RawSentence, Sentence, SentenceId, TalkerId,
    WPL, parse_sentence,
};

const TYPED_LINES: &[(&str, SentenceId)] = &[
    ("$GPBOD,234.9,T,228.8,M,RUSKI,*1D", SentenceId::BOD),
    (
        "$GPGGA,120044.567,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*63",
        SentenceId::GGA,
    ),
    ("$GPGLL,6011.552,N,02501.941,E,120045,A*26", SentenceId::GLL),
    ("$GPGSA,A,3,02,,,07,,09,24,26,,,,,1.6,1.6,1.0*3D", SentenceId::GSA),
    (
        "$GPGSV,3,2,12,15,56,182,51,17,38,163,47,18,63,058,50,21,53,329,47*73",
        SentenceId::GSV,
    ),
    (
        "$GPRMB,A,0.00,R,,RUSKI,5536.200,N,01436.500,E,432.3,234.9,,V*58",
        SentenceId::RMB,
    ),
    (
        "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B",
        SentenceId::RMC,
    ),
    ("$GPRTE,1,1,c,0,MELIN,RUSKI,KNUDAN*25", SentenceId::RTE),
    ("$GPVTG,46.96,T,,,16.89,N,31.28,K,A*43", SentenceId::VTG),
    ("$GPWPL,5536.200,N,01436.500,E,RUSKI*1F", SentenceId::WPL),
    ("$GPZDA,032915,07,08,2004,00,00*4D", SentenceId::ZDA),
];

fn variant_id(sentence: &NmeaSentence) -> Option<SentenceId> {
    let id = match sentence {
        NmeaSentence::BOD(_) => SentenceId::BOD,
        NmeaSentence::GGA(_) => SentenceId::GGA,
        NmeaSentence::GLL(_) => SentenceId::GLL,
        NmeaSentence::GSA(_) => SentenceId::GSA,
        NmeaSentence::GSV(_) => SentenceId::GSV,
        NmeaSentence::RMB(_) => SentenceId::RMB,
        NmeaSentence::RMC(_) => SentenceId::RMC,
        NmeaSentence::RTE(_) => SentenceId::RTE,
        NmeaSentence::VTG(_) => SentenceId::VTG,
        NmeaSentence::WPL(_) => SentenceId::WPL,
        NmeaSentence::ZDA(_) => SentenceId::ZDA,
        NmeaSentence::Generic(_) => return None,
    };
    Some(id)
}

#[test]
fn test_every_type_dispatches_to_its_variant() {
    let parser = Nmea0183Parser::strict();

    for &(line, id) in TYPED_LINES {
        let raw = parser.frame(line).unwrap();
        assert_eq!(parser.resolve_type(&raw), id, "{line}");

        let sentence = parser.parse(line).unwrap();
        assert_eq!(variant_id(&sentence), Some(id), "{line}");
        assert_eq!(sentence.sentence_id(), id);
        assert_eq!(sentence.talker_id(), TalkerId::GP);
        assert_eq!(sentence.to_string(), line);
        assert_eq!(sentence.into_raw(), raw);
    }
}

#[test]
fn test_resolve_type_is_total() {
    for code in ["XDR", "VDM", "RME", "GGAX", "", "gga", "GG", "GGA ", "ÄÄÄ"] {
        let expected = if code == "GGA" {
            SentenceId::GGA
        } else {
            SentenceId::Unknown
        };
        assert_eq!(SentenceId::from_type_code(code), expected, "{code}");
    }
}

#[test]
fn test_generic_sentence() {
    let sentence = parse_sentence("$IIXDR,C,19.52,C,TempAir*19").unwrap();

    let NmeaSentence::Generic(raw) = &sentence else {
        panic!("expected a generic sentence");
    };
    assert_eq!(raw.sentence_type(), "XDR");
    assert_eq!(raw.double(2), Ok(19.52));
    assert_eq!(sentence.sentence_id(), SentenceId::Unknown);

    // a generic sentence can also be built
    let mut raw = RawSentence::with_type(TalkerId::II, "XDR", 4).unwrap();
    raw.set_char(1, 'C').unwrap();
    raw.set_double(2, 19.52).unwrap();
    raw.set_char(3, 'C').unwrap();
    raw.set_string(4, "TempAir").unwrap();
    assert_eq!(raw.to_string(), "$IIXDR,C,19.52,C,TempAir*19");
}

#[test]
fn test_typed_view_rejects_other_type() {
    let raw = Nmea0183Parser::new()
        .frame("$GPWPL,5536.200,N,01436.500,E,RUSKI*1F")
        .unwrap();

    assert_eq!(
        RMC::try_from(raw.clone()),
        Err(FramingError::UnexpectedSentenceType {
            expected: SentenceId::RMC,
            found: "WPL".to_owned()
        })
    );

    let wpl = WPL::from_raw(raw.clone()).unwrap();
    assert_eq!(RawSentence::from(wpl), raw);
}

#[test]
fn test_parser_is_shared_across_threads() {
    let parser = Nmea0183Parser::strict();

    thread::scope(|scope| {
        for &(line, id) in TYPED_LINES {
            scope.spawn(move || {
                let sentence = parser.parse(line).unwrap();
                assert_eq!(sentence.sentence_id(), id);
            });
        }
    });
}
