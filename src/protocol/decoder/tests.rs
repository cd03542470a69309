//! Decoder pipeline tests: dialect parsing, filtering, network map, unit
//! preferences.
use super::*;

const HEAVE_LINE: &str = "A000057.055 09FF7 0FF00 3F9FDCFFFFFFFFFF";
const CLAIM_LINE: &str = "2022-09-10T12:10:16.614Z,6,60928,5,255,8,fb,9b,70,22,00,9b,50,c0";

fn decoder() -> Decoder {
    Decoder::new(DecoderOptions::default()).unwrap()
}

fn float_of(message: &Message, id: &str) -> f64 {
    message
        .field_value(id)
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| panic!("field {id} has no numeric value"))
}

#[test]
fn actisense_heave() {
    let mut decoder = decoder();
    let message = decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();

    assert_eq!(message.pgn, 65280);
    assert_eq!(message.priority, 7);
    assert_eq!(message.source, 9);
    assert_eq!(message.destination, 255);
    assert_eq!(message.description, "Furuno: Heave");
    assert_eq!(message.fields.len(), 5);

    let mfg = &message.fields[0];
    assert_eq!(mfg.id, "manufacturer_code");
    assert_eq!(mfg.name, "Manufacturer Code");
    assert_eq!(mfg.value, FieldValue::Str("Furuno".into()));
    assert_eq!(mfg.description, "Furuno");

    let industry = &message.fields[2];
    assert_eq!(industry.id, "industry_code");
    assert_eq!(industry.value, FieldValue::Str("Marine".into()));
    assert_eq!(industry.description, "Marine Industry");

    let heave = float_of(&message, "heave");
    assert!((heave + 0.036).abs() < 1e-9, "heave = {heave}");
}

#[test]
fn actisense_line_without_timestamp() {
    let mut decoder = decoder();
    let message = decoder
        .decode_actisense("09FF7 0FF00 3F9FDCFFFFFFFFFF")
        .unwrap()
        .unwrap();
    assert_eq!(message.pgn, 65280);
    assert_eq!(message.source, 9);
}

#[test]
fn actisense_fast_packet_arrives_combined() {
    let mut decoder = decoder();
    let message = decoder
        .decode_actisense(
            "09FF7 1FF1A 3F9F24000000FFFFFFFFEFFFFFFF009AFFFFFFADFFFFFF050000000000",
        )
        .unwrap()
        .unwrap();

    assert_eq!(message.pgn, 130842);
    assert_eq!(
        message.description,
        "Furuno: Six Degrees Of Freedom Movement"
    );
    assert_eq!(message.fields.len(), 12);
    assert_eq!(message.field_value("a"), Some(&FieldValue::Int(36)));
    assert_eq!(message.field_value("b"), Some(&FieldValue::Int(-1)));
    assert_eq!(message.field_value("c"), Some(&FieldValue::Int(-17)));
    assert_eq!(message.field_value("d"), Some(&FieldValue::Int(0)));
    assert_eq!(message.field_value("e"), Some(&FieldValue::Int(-102)));
    assert_eq!(message.field_value("f"), Some(&FieldValue::Int(-83)));
    assert_eq!(message.field_value("g"), Some(&FieldValue::Int(5)));
    assert_eq!(message.field_value("h"), Some(&FieldValue::Int(0)));
    assert_eq!(message.field_value("i"), Some(&FieldValue::Int(0)));
}

#[test]
fn binary_frame_matches_actisense() {
    let mut decoder = decoder();
    let packet = [
        0x88, 0x1C, 0xFF, 0x00, 0x09, 0x3F, 0x9F, 0xDC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    ];
    let message = decoder.decode_frame_binary(&packet).unwrap().unwrap();

    assert_eq!(message.pgn, 65280);
    assert_eq!(message.priority, 7);
    assert_eq!(message.source, 9);
    assert_eq!(message.destination, 255);
    let heave = float_of(&message, "heave");
    assert!((heave + 0.036).abs() < 1e-9);
}

#[test]
fn serial_frame_round() {
    // Same Furuno Heave frame in the 0xAA .. 0x55 serial dialect: the CAN id
    // travels little-endian, the payload in wire order.
    let mut packet = vec![0xAA, 0xE8];
    packet.extend_from_slice(&0x1CFF0009u32.to_le_bytes());
    packet.extend_from_slice(&[0x3F, 0x9F, 0xDC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    packet.push(0x55);

    let mut decoder = decoder();
    let message = decoder.decode_frame_serial(&packet).unwrap().unwrap();
    assert_eq!(message.pgn, 65280);
    let heave = float_of(&message, "heave");
    assert!((heave + 0.036).abs() < 1e-9);
}

#[test]
fn serial_frame_sentinels_checked() {
    let mut decoder = decoder();
    let result = decoder.decode_frame_serial(&[0xAB, 0xE8, 0, 0, 0, 0, 0, 0x55]);
    assert!(matches!(result, Err(DecodeError::Framing { .. })));
    let result = decoder.decode_frame_serial(&[0xAA, 0xE8]);
    assert!(matches!(result, Err(DecodeError::Framing { .. })));
}

#[test]
fn yacht_devices_line() {
    let mut decoder = decoder();
    let message = decoder
        .decode_yacht_devices("17:33:21.107 R 1CFF0009 3F 9F DC FF FF FF FF FF")
        .unwrap()
        .unwrap();
    assert_eq!(message.pgn, 65280);
    assert_eq!(message.source, 9);
    let heave = float_of(&message, "heave");
    assert!((heave + 0.036).abs() < 1e-9);
}

#[test]
fn basic_csv_claim() {
    let mut decoder = decoder();
    let message = decoder.decode_basic(CLAIM_LINE, true).unwrap().unwrap();

    assert_eq!(message.pgn, 60928);
    assert_eq!(message.id, "isoAddressClaim");
    assert_eq!(
        message.field_value("manufacturer_code"),
        Some(&FieldValue::Str("Navico".into()))
    );
    assert_eq!(
        message.field_value("industry_group"),
        Some(&FieldValue::Str("Marine".into()))
    );
    assert_eq!(
        message.field_value("arbitrary_address_capable"),
        Some(&FieldValue::Str("Yes".into()))
    );
    // The claim also lands in the address map.
    assert!(decoder.network_map().name_for(5).is_some());
}

#[test]
fn unknown_pgn_is_an_error() {
    let mut decoder = decoder();
    let line = "2022-09-10T12:10:16.614Z,6,12345,5,255,2,00,00";
    assert!(matches!(
        decoder.decode_basic(line, true),
        Err(DecodeError::UnknownPgn { pgn: 12345 })
    ));
}

#[test]
fn exclusive_filters_rejected() {
    let options = DecoderOptions {
        exclude_pgns: vec![60928],
        include_pgns: vec![65280],
        ..DecoderOptions::default()
    };
    assert!(Decoder::new(options).is_err());
}

#[test]
fn pgn_filtering_is_deterministic() {
    // Two identically configured decoders make identical decisions.
    let make = || {
        Decoder::new(DecoderOptions {
            include_pgns: vec![65280],
            ..DecoderOptions::default()
        })
        .unwrap()
    };
    let lines = [
        HEAVE_LINE,
        "09FF7 1FF1A 3F9F24000000FFFFFFFFEFFFFFFF009AFFFFFFADFFFFFF050000000000",
    ];

    let mut first = make();
    let mut second = make();
    for line in lines {
        let a = first.decode_actisense(line).unwrap().map(|m| m.pgn);
        let b = second.decode_actisense(line).unwrap().map(|m| m.pgn);
        assert_eq!(a, b);
    }
    // Only the included PGN came through.
    assert_eq!(
        first.decode_actisense(HEAVE_LINE).unwrap().map(|m| m.pgn),
        Some(65280)
    );
}

#[test]
fn id_filtering_applies_after_decode() {
    let mut decoder = Decoder::new(DecoderOptions {
        exclude_ids: vec!["furunoHeave".into()],
        ..DecoderOptions::default()
    })
    .unwrap();
    assert!(decoder.decode_actisense(HEAVE_LINE).unwrap().is_none());
}

#[test]
fn excluded_claim_still_updates_the_map() {
    let mut decoder = Decoder::new(DecoderOptions {
        exclude_pgns: vec![60928],
        build_network_map: true,
        ..DecoderOptions::default()
    })
    .unwrap();

    // The claim is suppressed but tracked.
    assert!(decoder.decode_basic(CLAIM_LINE, true).unwrap().is_none());
    assert!(decoder.network_map().name_for(5).is_some());

    // A follow-up message from the same source is attributed.
    let config = "2022-09-10T12:10:17.000Z,6,126998,5,255,10,04,01,41,42,04,01,43,44,02,01";
    let message = decoder.decode_basic(config, true).unwrap().unwrap();
    assert_eq!(message.id, "configurationInformation");
    assert!(message.source_iso_name.is_some());
    assert!(message.hash.is_some());
    assert_eq!(
        message.field_value("installation_description_1"),
        Some(&FieldValue::Str("AB".into()))
    );
}

#[test]
fn grace_window_drops_unknown_sources() {
    let mut decoder = Decoder::new(DecoderOptions {
        build_network_map: true,
        ..DecoderOptions::default()
    })
    .unwrap();
    // No claim seen for source 9 yet.
    assert!(decoder.decode_actisense(HEAVE_LINE).unwrap().is_none());
}

#[test]
fn after_grace_window_unknown_sources_pass() {
    let mut decoder = Decoder::new(DecoderOptions {
        build_network_map: true,
        grace_window: Some(Duration::from_secs(0)),
        ..DecoderOptions::default()
    })
    .unwrap();
    let message = decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();
    assert!(message.source_iso_name.is_none());
    assert!(message.hash.is_none());
}

#[test]
fn manufacturer_filtering_requires_known_name() {
    let mut decoder = Decoder::new(DecoderOptions {
        exclude_manufacturers: vec![275], // Navico
        ..DecoderOptions::default()
    })
    .unwrap();

    // Claim from a Navico device at source 5.
    assert!(decoder.decode_basic(CLAIM_LINE, true).unwrap().is_some());

    // Subsequent traffic from source 5 is now filtered out.
    let config = "2022-09-10T12:10:17.000Z,6,126998,5,255,10,04,01,41,42,04,01,43,44,02,01";
    assert!(decoder.decode_basic(config, true).unwrap().is_none());

    // The same message from an unattributed source passes.
    let config = "2022-09-10T12:10:17.000Z,6,126998,7,255,10,04,01,41,42,04,01,43,44,02,01";
    assert!(decoder.decode_basic(config, true).unwrap().is_some());
}

//==================================================================================UNIT_PREFERENCES

const ENGINE_LINE: &str = "2022-09-10T12:10:18.000Z,2,127489,5,255,26,\
00,a0,0f,fe,0d,27,79,78,05,32,00,10,0e,00,00,e8,03,2c,01,ff,05,00,00,00,50,4b";

#[test]
fn preferred_units_convert_pressure_and_temperature() {
    let mut decoder = Decoder::new(DecoderOptions {
        preferred_units: HashMap::from([
            (PhysicalQuantity::Temperature, "C".to_string()),
            (PhysicalQuantity::Pressure, "Bar".to_string()),
        ]),
        ..DecoderOptions::default()
    })
    .unwrap();

    let message = decoder.decode_basic(ENGINE_LINE, true).unwrap().unwrap();
    assert_eq!(message.id, "engineParametersDynamic");

    let oil_pressure = message.field("oil_pressure").unwrap();
    assert_eq!(oil_pressure.unit_of_measurement, "Bar");
    assert!((float_of(&message, "oil_pressure") - 4.0).abs() < 1e-9);

    let temperature = message.field("temperature").unwrap();
    assert_eq!(temperature.unit_of_measurement, "C");
    assert!((float_of(&message, "temperature") - 37.0).abs() < 1e-9);

    let oil_temperature = message.field("oil_temperature").unwrap();
    assert_eq!(oil_temperature.unit_of_measurement, "C");
    assert!((float_of(&message, "oil_temperature") - 85.05).abs() < 1e-9);

    // Engine status bits resolve to their labels.
    assert_eq!(
        message.field_value("discrete_status_1"),
        Some(&FieldValue::Str("Check Engine, Low Oil Pressure".into()))
    );
}

#[test]
fn preferred_units_are_idempotent() {
    let decoder = Decoder::new(DecoderOptions {
        preferred_units: HashMap::from([
            (PhysicalQuantity::Temperature, "C".to_string()),
            (PhysicalQuantity::Pressure, "Bar".to_string()),
        ]),
        ..DecoderOptions::default()
    })
    .unwrap();

    let mut probe = Decoder::new(DecoderOptions::default()).unwrap();
    let mut message = probe.decode_basic(ENGINE_LINE, true).unwrap().unwrap();

    decoder.apply_preferred_units(&mut message);
    let once: Vec<(String, Option<f64>)> = message
        .fields
        .iter()
        .map(|f| (f.unit_of_measurement.clone(), f.value.as_f64()))
        .collect();

    decoder.apply_preferred_units(&mut message);
    let twice: Vec<(String, Option<f64>)> = message
        .fields
        .iter()
        .map(|f| (f.unit_of_measurement.clone(), f.value.as_f64()))
        .collect();

    assert_eq!(once, twice);
    // Physical quantity tags survive the conversion.
    assert_eq!(
        message.field("temperature").unwrap().physical_quantities,
        Some(PhysicalQuantity::Temperature)
    );
}

#[test]
fn dump_sink_appends_jsonl() {
    let path = std::env::temp_dir().join(format!(
        "marebus_dump_{}_{}.jsonl",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
    ));
    let mut decoder = Decoder::new(DecoderOptions {
        dump_pgns: vec![65280],
        dump_path: Some(path.clone()),
        ..DecoderOptions::default()
    })
    .unwrap();

    decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();
    decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();
    decoder.flush();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["PGN"], 65280);
    assert_eq!(parsed["id"], "furunoHeave");
    assert_eq!(parsed["fields"][0]["value"], "Furuno");
    std::fs::remove_file(&path).ok();
}
