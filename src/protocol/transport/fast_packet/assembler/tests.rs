//! Fast Packet reassembly tests covering sequencing, keying, duplicates,
//! and supersession.
use super::*;

const PGN: u32 = 130842;
const SRC: u8 = 42;
const DST: u8 = 255;

#[test]
/// Rebuild a complete message from three valid fragments.
fn test_full_reassembly() {
    let mut assembler = FastPacketAssembler::new();

    // Frame 0: total length 15, six data bytes.
    let frame0 = [0b000_00000, 15, 1, 2, 3, 4, 5, 6];
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &frame0),
        ProcessResult::FragmentConsumed
    );

    // Frame 1: seven data bytes.
    let frame1 = [0b000_00001, 7, 8, 9, 10, 11, 12, 13];
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &frame1),
        ProcessResult::FragmentConsumed
    );

    // Frame 2: two data bytes, remainder is padding and gets truncated away.
    let frame2 = [0b000_00010, 14, 15, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    let result = assembler.process_frame(PGN, SRC, DST, &frame2);

    let expected: Vec<u8> = (1..=15).collect();
    assert_eq!(result, ProcessResult::MessageComplete(expected));
    assert_eq!(assembler.pending(), 0);
}

#[test]
/// Continuation frames without a first frame are dropped silently.
fn test_orphan_continuation() {
    let mut assembler = FastPacketAssembler::new();
    let frame1 = [0b000_00001, 7, 8, 9, 10, 11, 12, 13];
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &frame1),
        ProcessResult::Ignored
    );
    assert_eq!(assembler.pending(), 0);
}

#[test]
/// Frames of a stale sequence are ignored while a session is active.
fn test_sequence_mismatch() {
    let mut assembler = FastPacketAssembler::new();
    let frame0 = [0b001_00000, 15, 1, 2, 3, 4, 5, 6];
    assembler.process_frame(PGN, SRC, DST, &frame0);

    // Continuation tagged with sequence 2 instead of 1.
    let stray = [0b010_00001, 7, 8, 9, 10, 11, 12, 13];
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &stray),
        ProcessResult::Ignored
    );
    // The in-flight session is untouched.
    assert_eq!(assembler.pending(), 1);
}

#[test]
/// Duplicated frames within one sequence are ignored.
fn test_duplicate_frames() {
    let mut assembler = FastPacketAssembler::new();
    let frame0 = [0b000_00000, 15, 1, 2, 3, 4, 5, 6];
    let frame1 = [0b000_00001, 7, 8, 9, 10, 11, 12, 13];

    assembler.process_frame(PGN, SRC, DST, &frame0);
    assembler.process_frame(PGN, SRC, DST, &frame1);
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &frame1),
        ProcessResult::Ignored
    );
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &frame0),
        ProcessResult::Ignored
    );

    // The message still completes correctly afterwards.
    let frame2 = [0b000_00010, 14, 15, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    let expected: Vec<u8> = (1..=15).collect();
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &frame2),
        ProcessResult::MessageComplete(expected)
    );
}

#[test]
/// A new sequence at frame 0 supersedes the partial prior assembly.
fn test_new_sequence_supersedes() {
    let mut assembler = FastPacketAssembler::new();
    let old0 = [0b000_00000, 15, 9, 9, 9, 9, 9, 9];
    assembler.process_frame(PGN, SRC, DST, &old0);

    // Fresh sequence restarts the session.
    let new0 = [0b011_00000, 13, 1, 2, 3, 4, 5, 6];
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &new0),
        ProcessResult::FragmentConsumed
    );
    let new1 = [0b011_00001, 7, 8, 9, 10, 11, 12, 13];
    let result = assembler.process_frame(PGN, SRC, DST, &new1);
    let expected: Vec<u8> = (1..=13).collect();
    assert_eq!(result, ProcessResult::MessageComplete(expected));
}

#[test]
/// Streams with distinct keys do not interfere.
fn test_independent_streams() {
    let mut assembler = FastPacketAssembler::new();
    let a0 = [0b000_00000, 10, 1, 2, 3, 4, 5, 6];
    let b0 = [0b000_00000, 10, 21, 22, 23, 24, 25, 26];

    assembler.process_frame(PGN, 10, DST, &a0);
    assembler.process_frame(PGN, 20, DST, &b0);
    assert_eq!(assembler.pending(), 2);

    let a1 = [0b000_00001, 7, 8, 9, 10, 0xFF, 0xFF, 0xFF];
    assert_eq!(
        assembler.process_frame(PGN, 10, DST, &a1),
        ProcessResult::MessageComplete(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10])
    );

    let b1 = [0b000_00001, 27, 28, 29, 30, 0xFF, 0xFF, 0xFF];
    assert_eq!(
        assembler.process_frame(PGN, 20, DST, &b1),
        ProcessResult::MessageComplete(vec![21, 22, 23, 24, 25, 26, 27, 28, 29, 30])
    );
}

#[test]
/// Declared lengths outside the Fast Packet range are refused.
fn test_bogus_length() {
    let mut assembler = FastPacketAssembler::new();
    let frame0 = [0b000_00000, 0, 1, 2, 3, 4, 5, 6];
    assert_eq!(
        assembler.process_frame(PGN, SRC, DST, &frame0),
        ProcessResult::Ignored
    );
}
