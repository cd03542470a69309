//! Header codec tests: PDU1/PDU2 decomposition, round trips, range checks.
use super::*;

#[test]
/// PDU2 identifier from the Furuno Heave capture: priority 7, source 9,
/// broadcast, PGN 65280.
fn test_pdu2_decompose() {
    let id = CanId(0x1CFF0009);
    let header = id.header();
    assert_eq!(header.priority, 7);
    assert_eq!(header.source, 9);
    assert_eq!(header.destination, 255);
    assert_eq!(header.pgn, 65280);
}

#[test]
/// PDU1 identifier: PS is the destination and the PGN low byte reads zero.
fn test_pdu1_decompose() {
    // PGN 59904 (0x0EA00), destination 0x23, source 0x05, priority 6.
    let header = CanHeader {
        pgn: 59904,
        source: 0x05,
        destination: 0x23,
        priority: 6,
    };
    let id = CanId::from_header(&header).unwrap();
    let round = id.header();
    assert_eq!(round.pgn, 59904);
    assert_eq!(round.destination, 0x23);
    assert_eq!(round.source, 0x05);
    assert_eq!(round.priority, 6);
}

#[test]
/// PDU2 round trip preserves the full tuple.
fn test_pdu2_round_trip() {
    let header = CanHeader {
        pgn: 130842,
        source: 42,
        destination: 255,
        priority: 3,
    };
    let id = CanId::from_header(&header).unwrap();
    assert_eq!(id.header(), header);
}

#[test]
/// For PDU1 PGNs the low byte of the PGN is cleared on the way back.
fn test_pdu1_low_byte_cleared() {
    let header = CanHeader {
        pgn: 59904 | 0x12, // dirty low byte
        source: 1,
        destination: 9,
        priority: 6,
    };
    let id = CanId::from_header(&header).unwrap();
    let round = id.header();
    assert_eq!(round.pgn, 59904);
    assert_eq!(round.destination, 9);
}

#[test]
/// Exhaustive-ish round trip across the PDU2 space.
fn test_round_trip_sweep() {
    for pgn in [65280u32, 126992, 129025, 130306, 0x3FF00, 0x1FF1A] {
        for priority in 0..8u8 {
            let header = CanHeader {
                pgn,
                source: 0xF3,
                destination: 255,
                priority,
            };
            let id = CanId::from_header(&header).unwrap();
            assert_eq!(id.header(), header, "pgn {pgn} priority {priority}");
        }
    }
}

#[test]
/// Out-of-range priority and PGN are refused.
fn test_invalid_ranges() {
    let header = CanHeader {
        pgn: 65280,
        source: 0,
        destination: 255,
        priority: 8,
    };
    assert!(matches!(
        CanId::from_header(&header),
        Err(HeaderError::InvalidPriority { priority: 8 })
    ));

    let header = CanHeader {
        pgn: 0x40000,
        source: 0,
        destination: 255,
        priority: 6,
    };
    assert!(matches!(
        CanId::from_header(&header),
        Err(HeaderError::InvalidPgn { pgn: 0x40000 })
    ));
}
