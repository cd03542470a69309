//! Bit cursor tests: span extraction across byte boundaries, bounds and
//! alignment checks, read/write symmetry.
use super::*;

#[test]
fn reads_follow_little_endian_bit_order() {
    // 0xC5 = 1100_0101: bit 0 is the low bit of the first byte.
    let data = [0xC5, 0x01];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_u64(1).unwrap(), 1);
    assert_eq!(reader.read_u64(2).unwrap(), 0b10);
    assert_eq!(reader.read_u64(5).unwrap(), 0b11000);
    assert_eq!(reader.read_u64(8).unwrap(), 0x01);
}

#[test]
fn spans_cross_byte_boundaries() {
    // 12-bit field at offset 6: (0x04_83_5A >> 6) & 0xFFF.
    let data = [0x5A, 0x83, 0x04];
    let mut reader = BitReader::new(&data);
    reader.skip(6).unwrap();
    let expected = (0x04835Au64 >> 6) & 0xFFF;
    assert_eq!(reader.read_u64(12).unwrap(), expected);
}

#[test]
fn full_word_spans() {
    let data: [u8; 9] = [0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01, 0xF0];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_u64(64).unwrap(), 0x0123456789ABCDEF);

    // A 64-bit span starting mid-byte straddles nine bytes.
    let mut reader = BitReader::new(&data);
    reader.skip(4).unwrap();
    assert_eq!(reader.read_u64(64).unwrap(), 0x00123456789ABCDE);
}

#[test]
fn span_lengths_are_bounded() {
    let data = [0u8; 16];
    let mut reader = BitReader::new(&data);
    assert_eq!(
        reader.read_u64(0),
        Err(BitSpanError::WiderThanWord { length: 0 })
    );
    assert_eq!(
        reader.read_u64(65),
        Err(BitSpanError::WiderThanWord { length: 65 })
    );
}

#[test]
fn reads_stop_at_the_buffer_end() {
    let data = [0xFF, 0xFF];
    let mut reader = BitReader::new(&data);
    reader.skip(10).unwrap();
    assert_eq!(
        reader.read_u64(7),
        Err(BitSpanError::PastEnd {
            offset: 10,
            length: 7,
            capacity: 16
        })
    );
    // The failed read leaves the cursor untouched.
    assert_eq!(reader.read_u64(6).unwrap(), 0x3F);
}

#[test]
fn byte_access_requires_alignment() {
    let data = [0x11, 0x22, 0x33];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_byte().unwrap(), 0x11);
    assert_eq!(reader.read_bytes(2).unwrap(), &[0x22, 0x33]);

    let mut reader = BitReader::new(&data);
    reader.skip(5).unwrap();
    assert_eq!(
        reader.read_bytes(1),
        Err(BitSpanError::Misaligned { offset: 5 })
    );
}

#[test]
fn writes_patch_only_their_span() {
    let mut buffer = [0xFFu8; 3];
    let mut writer = BitWriter::new(&mut buffer);
    writer.skip(3).unwrap();
    writer.write_u64(0, 6).unwrap();
    // Bits 3..9 cleared, everything else still set.
    assert_eq!(buffer, [0x07, 0xFE, 0xFF]);
}

#[test]
fn write_then_read_round_trip() {
    let mut buffer = [0u8; 12];
    {
        let mut writer = BitWriter::new(&mut buffer);
        writer.write_u64(0x5, 3).unwrap();
        writer.write_u64(0x2AB, 13).unwrap();
        writer.write_u64(0xDEADBEEF, 32).unwrap();
        writer.write_bytes(&[0x10, 0x20]).unwrap();
        assert_eq!(writer.bit_cursor(), 64);
    }
    let mut reader = BitReader::new(&buffer);
    assert_eq!(reader.read_u64(3).unwrap(), 0x5);
    assert_eq!(reader.read_u64(13).unwrap(), 0x2AB);
    assert_eq!(reader.read_u64(32).unwrap(), 0xDEADBEEF);
    assert_eq!(reader.read_bytes(2).unwrap(), &[0x10, 0x20]);
}

#[test]
fn writer_bounds_and_alignment() {
    let mut buffer = [0u8; 2];
    let mut writer = BitWriter::new(&mut buffer);
    writer.write_u64(0x1FF, 9).unwrap();
    assert_eq!(
        writer.write_u64(0xFF, 8),
        Err(BitSpanError::PastEnd {
            offset: 9,
            length: 8,
            capacity: 16
        })
    );
    assert_eq!(
        writer.write_bytes(&[0xAA]),
        Err(BitSpanError::Misaligned { offset: 9 })
    );
}

#[test]
fn only_written_bits_change_the_prefill() {
    let mut buffer = [0xFFu8; 4];
    {
        let mut writer = BitWriter::new(&mut buffer);
        writer.write_u64(0, 8).unwrap();
        writer.skip(8).unwrap();
        writer.write_u64(0, 8).unwrap();
    }
    assert_eq!(buffer, [0x00, 0xFF, 0x00, 0xFF]);
}
