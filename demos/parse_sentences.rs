use marine_nmea::{
    ArgumentError, ChecksumMode, FramingError, LineEndingMode, Nmea0183Parser, NmeaSentence,
    OptionalField, Position, Sentence, TalkerId, WPL, Waypoint,
};

const LOG: &[&str] = &[
    "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B\r\n",
    "$GPGGA,120044.567,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*63\r\n",
    "$GPGSV,3,2,12,15,56,182,51,17,38,163,47,18,63,058,50,21,53,329,47*73\r\n",
    "$GPRTE,1,1,c,0,MELIN,RUSKI,KNUDAN*25\r\n",
    "$GPWPL,5536.200,N,01436.500,E,RUSKI*1F\r\n",
    "$IIXDR,C,19.52,C,TempAir*19\r\n",
    "$GPGLL,6011.552,N,02501.941,E,120045,A*27\r\n",
    "GPZDA,032915,07,08,2004,00,00*4D\r\n",
];

fn print(result: Result<NmeaSentence, FramingError>) {
    let sentence = match result {
        Ok(sentence) => sentence,
        Err(error) => {
            println!("Rejected: {error}");
            return;
        }
    };

    match &sentence {
        NmeaSentence::RMC(rmc) => {
            println!(
                "RMC fix at {:?}, variation {:?}",
                rmc.date_time(),
                rmc.variation().optional()
            );
        }
        NmeaSentence::GGA(gga) => {
            println!(
                "GGA position {:?}, altitude {:?}",
                gga.position(),
                gga.altitude().optional()
            );
        }
        NmeaSentence::GSV(gsv) => {
            for satellite in gsv.satellites().unwrap_or_default() {
                println!("GSV satellite {satellite:?}");
            }
        }
        NmeaSentence::RTE(rte) => {
            println!(
                "RTE {:?} waypoints {:?}",
                rte.route_id(),
                rte.waypoint_ids()
            );
        }
        NmeaSentence::WPL(wpl) => println!("WPL {:?}", wpl.waypoint()),
        NmeaSentence::Generic(raw) => {
            println!(
                "{} sentence from {}, {} fields",
                raw.sentence_type(),
                raw.talker_id(),
                raw.field_count()
            );
        }
        other => println!("{:?} from {}", other.sentence_id(), other.talker_id()),
    }
}

fn main() -> Result<(), ArgumentError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let parser = Nmea0183Parser::builder()
        .checksum_mode(ChecksumMode::Required)
        .line_ending_mode(LineEndingMode::Required)
        .build();

    for line in LOG {
        print(parser.parse(line));
    }

    // Sentences are built with setters and written back in wire form
    let mut wpl = WPL::new(TalkerId::EC);
    let position = Position::new(-33.8568, 151.2153)?;
    wpl.set_waypoint(&Waypoint::new("OPERA", position))?;
    println!("{wpl}");

    Ok(())
}
