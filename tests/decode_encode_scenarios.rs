//! End-to-end codec scenarios: real captures through the public API, across
//! dialects, with enrichment enabled.
use marebus::core::{FieldValue, PhysicalQuantity};
use marebus::protocol::decoder::{Decoder, DecoderOptions};
use marebus::protocol::encoder::Encoder;
use std::collections::HashMap;

const HEAVE_LINE: &str = "09FF7 0FF00 3F9FDCFFFFFFFFFF";
const SIX_DOF_LINE: &str =
    "09FF7 1FF1A 3F9F24000000FFFFFFFFEFFFFFFF009AFFFFFFADFFFFFF050000000000";

fn decoder() -> Decoder {
    Decoder::new(DecoderOptions::default()).unwrap()
}

#[test]
fn furuno_heave_from_actisense() {
    let mut decoder = decoder();
    let message = decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();

    assert_eq!(message.pgn, 65280);
    assert_eq!(message.priority, 7);
    assert_eq!(message.source, 9);
    assert_eq!(message.destination, 255);
    assert_eq!(message.description, "Furuno: Heave");
    assert_eq!(message.fields.len(), 5);
    assert_eq!(
        message.field_value("manufacturer_code"),
        Some(&FieldValue::Str("Furuno".into()))
    );
    assert_eq!(
        message.field_value("industry_code"),
        Some(&FieldValue::Str("Marine".into()))
    );
    let heave = message
        .field_value("heave")
        .and_then(FieldValue::as_f64)
        .unwrap();
    assert!((heave + 0.036).abs() < 1e-9);
}

#[test]
fn navico_address_claim_from_csv() {
    let mut decoder = decoder();
    let line = "2022-09-10T12:10:16.614Z,6,60928,5,255,8,fb,9b,70,22,00,9b,50,c0";
    let message = decoder.decode_basic(line, true).unwrap().unwrap();

    assert_eq!(message.pgn, 60928);
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
}

#[test]
fn binary_frame_agrees_with_actisense() {
    let mut decoder = decoder();
    let from_line = decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();

    let packet = [
        0x88, 0x1C, 0xFF, 0x00, 0x09, 0x3F, 0x9F, 0xDC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    ];
    let from_binary = decoder.decode_frame_binary(&packet).unwrap().unwrap();

    assert_eq!(from_binary.pgn, from_line.pgn);
    assert_eq!(from_binary.source, from_line.source);
    assert_eq!(from_binary.priority, from_line.priority);
    let a = from_line.field_value("heave").and_then(FieldValue::as_f64);
    let b = from_binary.field_value("heave").and_then(FieldValue::as_f64);
    assert_eq!(a, b);
}

#[test]
fn heave_reencodes_to_the_same_line() {
    let mut decoder = decoder();
    let encoder = Encoder::new();
    let message = decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();
    assert_eq!(encoder.encode_actisense(&message).unwrap(), HEAVE_LINE);
}

#[test]
fn furuno_six_dof_fast_packet() {
    let mut decoder = decoder();
    let message = decoder.decode_actisense(SIX_DOF_LINE).unwrap().unwrap();

    assert_eq!(message.pgn, 130842);
    assert_eq!(
        message.description,
        "Furuno: Six Degrees Of Freedom Movement"
    );
    assert_eq!(message.fields.len(), 12);
    let expected = [
        ("a", 36),
        ("b", -1),
        ("c", -17),
        ("d", 0),
        ("e", -102),
        ("f", -83),
        ("g", 5),
        ("h", 0),
        ("i", 0),
    ];
    for (id, value) in expected {
        assert_eq!(
            message.field_value(id),
            Some(&FieldValue::Int(value)),
            "field {id}"
        );
    }
}

#[test]
fn six_dof_streams_through_yacht_devices_frames() {
    // Fragment the fast packet ourselves, then feed the frames back in
    // arrival order through the Yacht Devices dialect.
    let mut decoder = decoder();
    let mut encoder = Encoder::new();
    let original = decoder.decode_actisense(SIX_DOF_LINE).unwrap().unwrap();
    let lines = encoder.encode_yacht_devices(&original).unwrap();
    assert_eq!(lines.len(), 5);

    let mut stream_decoder = Decoder::new(DecoderOptions::default()).unwrap();
    let mut complete = Vec::new();
    for line in &lines {
        // Replay as received traffic.
        let received = format!("17:33:21.107 R {}", line.trim_end());
        if let Some(message) = stream_decoder.decode_yacht_devices(&received).unwrap() {
            complete.push(message);
        }
    }
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0].field_value("c"), Some(&FieldValue::Int(-17)));
}

#[test]
fn excluded_claim_still_feeds_the_network_map() {
    let mut decoder = Decoder::new(DecoderOptions {
        exclude_pgns: vec![60928],
        build_network_map: true,
        ..DecoderOptions::default()
    })
    .unwrap();

    let claim = "2022-09-10T12:10:16.614Z,6,60928,5,255,8,fb,9b,70,22,00,9b,50,c0";
    assert!(decoder.decode_basic(claim, true).unwrap().is_none());

    let config = "2022-09-10T12:10:17.000Z,6,126998,5,255,10,04,01,41,42,04,01,43,44,02,01";
    let message = decoder.decode_basic(config, true).unwrap().unwrap();
    assert!(message.source_iso_name.is_some());
    assert!(message.hash.is_some());
}

#[test]
fn engine_dynamic_parameters_with_preferred_units() {
    let mut decoder = Decoder::new(DecoderOptions {
        preferred_units: HashMap::from([
            (PhysicalQuantity::Temperature, "C".to_string()),
            (PhysicalQuantity::Pressure, "Bar".to_string()),
        ]),
        ..DecoderOptions::default()
    })
    .unwrap();

    let line = "2022-09-10T12:10:18.000Z,2,127489,5,255,26,\
00,a0,0f,fe,0d,27,79,78,05,32,00,10,0e,00,00,e8,03,2c,01,ff,05,00,00,00,50,4b";
    let message = decoder.decode_basic(line, true).unwrap().unwrap();

    let oil_pressure = message.field("oil_pressure").unwrap();
    assert_eq!(oil_pressure.unit_of_measurement, "Bar");
    assert_eq!(oil_pressure.value.as_f64(), Some(4.0));

    let temperature = message.field("temperature").unwrap();
    assert_eq!(temperature.unit_of_measurement, "C");
    assert_eq!(temperature.value.as_f64(), Some(37.0));
}

#[test]
fn json_dump_shape() {
    let mut decoder = decoder();
    let message = decoder.decode_actisense(HEAVE_LINE).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

    assert_eq!(json["PGN"], 65280);
    assert_eq!(json["id"], "furunoHeave");
    assert_eq!(json["description"], "Furuno: Heave");
    assert_eq!(json["source"], 9);
    assert_eq!(json["destination"], 255);
    assert_eq!(json["priority"], 7);
    assert!(json["timestamp"].is_string());

    let field = &json["fields"][3];
    assert_eq!(field["id"], "heave");
    assert_eq!(field["type"], "NUMBER");
    assert_eq!(field["unit_of_measurement"], "m");
    assert_eq!(field["physical_quantities"], "DISTANCE");
    assert_eq!(field["part_of_primary_key"], false);
    assert!(field["value"].is_f64());
    assert!(field["raw_value"].is_u64());
}
