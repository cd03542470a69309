//! Generic field engine driven by the static PGN descriptors.
//! It controls the bit-level readers/writers and turns wire payloads into
//! typed [`Field`] lists (and back), applying the NMEA 2000 number rules:
//! "not available" sentinels, sign extension, resolution scaling, BCD
//! decimals, epoch dates, time of day, and the three string flavors.
use super::bits::{BitReader, BitWriter};
use crate::core::{Field, FieldDescriptor, FieldKind, FieldValue, Message, PgnDescriptor};
use crate::error::CodecError;
use chrono::{Days, NaiveDate, NaiveTime};

/// Upper bound used when sizing encode buffers (Fast Packet limit).
const MAX_PAYLOAD_BYTES: usize = 223;

//==================================================================================NUMBER_RULES

/// Decode an integer field of `bit_length` bits according to the reserved
/// sentinel rules:
/// - widths of 2 or 3 bits use the all-ones value as "not available";
/// - wider unsigned fields use the all-ones value;
/// - wider signed fields use the maximum positive value.
///
/// Live values are scaled by `resolution`; a resolution of exactly 1 keeps
/// the integer representation.
pub fn decode_number(raw: u64, bit_length: u32, signed: bool, resolution: f64) -> FieldValue {
    let signed_value = if signed {
        sign_extend(raw, bit_length)
    } else {
        raw as i64
    };

    if bit_length <= 3 {
        if raw == max_unsigned(bit_length) {
            return FieldValue::Null;
        }
    } else if signed {
        if signed_value == max_signed(bit_length) {
            return FieldValue::Null;
        }
    } else if raw == max_unsigned(bit_length) {
        return FieldValue::Null;
    }

    if resolution == 1.0 {
        if signed {
            FieldValue::Int(signed_value)
        } else {
            FieldValue::Uint(raw)
        }
    } else if signed {
        FieldValue::Float(signed_value as f64 * resolution)
    } else {
        FieldValue::Float(raw as f64 * resolution)
    }
}

/// Encode a number into its `bit_length`-bit wire representation.
///
/// `None` maps to the "not available" sentinel. Live values are divided by
/// `resolution` with round-half-away-from-zero, then bounds-checked: the top
/// code is reserved on unsigned fields, the top positive code on signed
/// fields. Negative values are two's-complement encoded into the field width.
pub fn encode_number(
    value: Option<f64>,
    field: &'static str,
    bit_length: u32,
    signed: bool,
    resolution: f64,
) -> Result<u64, CodecError> {
    let value = match value {
        None => {
            return Ok(if signed && bit_length > 3 {
                max_signed(bit_length) as u64 & width_mask(bit_length)
            } else {
                max_unsigned(bit_length)
            });
        }
        Some(v) => v,
    };

    let scaled = (value / resolution).round();
    if !scaled.is_finite() || scaled.abs() >= 9.2e18 {
        return Err(CodecError::ValueOutOfRange { field });
    }
    let number = scaled as i64;

    // Signed fields reserve the top two positive codes (not-available and
    // error indicator), unsigned fields the top one.
    let min = if !signed {
        0
    } else if bit_length >= 64 {
        i64::MIN
    } else {
        -(1i64 << (bit_length - 1))
    };
    let max = if signed {
        max_signed(bit_length).saturating_sub(2)
    } else {
        i64::try_from(max_unsigned(bit_length).saturating_sub(1)).unwrap_or(i64::MAX)
    };
    if number < min || number > max {
        return Err(CodecError::ValueOutOfRange { field });
    }

    Ok((number as u64) & width_mask(bit_length))
}

/// Two's complement helper: extend the sign of a value read on a limited
/// number of bits into a full `i64`.
fn sign_extend(value: u64, bits: u32) -> i64 {
    if bits >= 64 {
        return value as i64;
    }
    let sign_bit = 1u64 << (bits - 1);
    if value & sign_bit != 0 {
        (value | (u64::MAX << bits)) as i64
    } else {
        value as i64
    }
}

fn width_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

fn max_unsigned(bits: u32) -> u64 {
    width_mask(bits)
}

fn max_signed(bits: u32) -> i64 {
    if bits >= 64 {
        i64::MAX
    } else {
        (1i64 << (bits - 1)) - 1
    }
}

//==================================================================================BCD

/// Decode a BCD value: each byte holds two decimal digits, low nibble units,
/// bytes read least-significant first.
pub fn decode_decimal(mut raw: u64) -> u64 {
    let mut value: u64 = 0;
    let mut multiplier: u64 = 1;
    while raw > 0 {
        let byte = raw & 0xFF;
        value += ((byte >> 4) * 10 + (byte & 0x0F)) * multiplier;
        raw >>= 8;
        multiplier *= 100;
    }
    value
}

/// Encode a decimal value into BCD form, two digits per byte.
pub fn encode_decimal(mut value: u64) -> u64 {
    let mut raw: u64 = 0;
    let mut shift = 0;
    while value > 0 {
        let two_digits = value % 100;
        let bcd = ((two_digits / 10) << 4) | (two_digits % 10);
        raw |= bcd << shift;
        value /= 100;
        shift += 8;
    }
    raw
}

//==================================================================================STRINGS

/// UTF-8 decode ignoring invalid sequences (the wire regularly carries
/// padding noise inside string fields).
fn utf8_ignoring_errors(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != '\u{FFFD}')
        .collect()
}

fn utf16le_ignoring_errors(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
        .chars()
        .filter(|c| *c != '\u{FFFD}')
        .collect()
}

/// Fixed-length string: trim at the first NUL, 0xFF, or '@', then strip
/// surrounding whitespace.
pub fn decode_string_fix(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|b| *b == 0x00 || *b == 0xFF || *b == b'@')
        .unwrap_or(bytes.len());
    utf8_ignoring_errors(&bytes[..end]).trim().to_string()
}

//==================================================================================DECODE

/// Raw slot collected during the first decode pass. Lookup resolution may
/// depend on fields that appear later in the layout (indirect lookups), so
/// bits are gathered before values are materialized.
enum RawSlot {
    Bits(u64),
    Bytes(Vec<u8>),
    Text { raw: Vec<u8>, text: String },
}

/// Decode a wire payload into the descriptor's ordered field list.
pub fn decode_fields(
    payload: &[u8],
    descriptor: &'static PgnDescriptor,
) -> Result<Vec<Field>, CodecError> {
    let mut reader = BitReader::new(payload);
    let mut slots: Vec<RawSlot> = Vec::with_capacity(descriptor.fields.len());

    // Pass 1: pull raw bits/bytes for every field in layout order.
    for fd in descriptor.fields {
        slots.push(read_slot(&mut reader, fd)?);
    }

    // Pass 2: materialize typed values, resolving lookups.
    let mut fields = Vec::with_capacity(descriptor.fields.len());
    for (index, fd) in descriptor.fields.iter().enumerate() {
        fields.push(materialize(fd, &slots, index, descriptor)?);
    }
    Ok(fields)
}

fn read_slot(reader: &mut BitReader, fd: &'static FieldDescriptor) -> Result<RawSlot, CodecError> {
    match fd.kind {
        FieldKind::StringFix => {
            let bytes = reader.read_bytes((fd.bit_length / 8) as usize)?.to_vec();
            let text = decode_string_fix(&bytes);
            Ok(RawSlot::Text { raw: bytes, text })
        }
        FieldKind::StringLz => {
            // Length byte excludes both itself and the trailing NUL.
            let len = reader.read_byte()? as usize;
            let bytes = reader.read_bytes(len)?.to_vec();
            reader.skip(8)?; // terminating NUL
            let text = utf8_ignoring_errors(&bytes);
            Ok(RawSlot::Text { raw: bytes, text })
        }
        FieldKind::StringLau => {
            // Total length includes the two header bytes.
            let total = reader.read_byte()? as usize;
            let encoding = reader.read_byte()?;
            let payload_len = total.saturating_sub(2);
            let bytes = reader.read_bytes(payload_len)?.to_vec();
            let text = if encoding == 0 {
                utf16le_ignoring_errors(&bytes)
            } else {
                utf8_ignoring_errors(&bytes)
            };
            Ok(RawSlot::Text { raw: bytes, text })
        }
        FieldKind::Binary => {
            let bytes = reader.read_bytes((fd.bit_length / 8) as usize)?.to_vec();
            Ok(RawSlot::Bytes(bytes))
        }
        FieldKind::Variable
        | FieldKind::DynamicFieldKey
        | FieldKind::DynamicFieldLength
        | FieldKind::DynamicFieldValue
        | FieldKind::FieldIndex => Err(CodecError::UnsupportedFieldKind {
            kind: fd.kind,
            field: fd.id,
        }),
        _ => {
            let raw = reader.read_u64(fd.bit_length)?;
            Ok(RawSlot::Bits(raw))
        }
    }
}

fn materialize(
    fd: &'static FieldDescriptor,
    slots: &[RawSlot],
    index: usize,
    descriptor: &'static PgnDescriptor,
) -> Result<Field, CodecError> {
    let mut description = String::new();
    let mut raw_value = FieldValue::Null;
    let value = match (&slots[index], fd.kind) {
        (RawSlot::Text { raw, text }, _) => {
            raw_value = FieldValue::Bytes(raw.clone());
            FieldValue::Str(text.clone())
        }
        (RawSlot::Bytes(bytes), _) => {
            raw_value = FieldValue::Bytes(bytes.clone());
            FieldValue::Bytes(bytes.clone())
        }
        (RawSlot::Bits(raw), kind) => {
            let raw = *raw;
            raw_value = FieldValue::Uint(raw);
            match kind {
                FieldKind::Number | FieldKind::Pgn | FieldKind::Duration => {
                    decode_number(raw, fd.bit_length, fd.signed, fd.resolution)
                }
                FieldKind::Float => {
                    FieldValue::Float(f32::from_le_bytes((raw as u32).to_le_bytes()) as f64)
                }
                FieldKind::Decimal => FieldValue::Uint(decode_decimal(raw)),
                FieldKind::Lookup => {
                    if let Some(table) = fd.lookup {
                        if let Some(label) = table.label(raw as u32) {
                            description = table.description(raw as u32).unwrap_or(label).to_string();
                            FieldValue::Str(label.to_string())
                        } else {
                            FieldValue::Uint(raw)
                        }
                    } else {
                        FieldValue::Uint(raw)
                    }
                }
                FieldKind::IndirectLookup => {
                    let control = fd
                        .indirect_control
                        .and_then(|id| {
                            descriptor
                                .fields
                                .iter()
                                .position(|other| other.id == id)
                        })
                        .and_then(|pos| match &slots[pos] {
                            RawSlot::Bits(v) => Some(*v as u32),
                            _ => None,
                        });
                    match (fd.indirect_lookup, control) {
                        (Some(table), Some(control)) => {
                            if let Some(label) = table.label(control, raw as u32) {
                                description = label.to_string();
                                FieldValue::Str(label.to_string())
                            } else {
                                FieldValue::Uint(raw)
                            }
                        }
                        _ => FieldValue::Uint(raw),
                    }
                }
                FieldKind::BitLookup => {
                    if let Some(table) = fd.bit_lookup {
                        FieldValue::Str(table.flags(raw))
                    } else {
                        FieldValue::Uint(raw)
                    }
                }
                FieldKind::Date => match decode_number(raw, fd.bit_length, false, fd.resolution) {
                    FieldValue::Null => FieldValue::Null,
                    _ => epoch_date(raw)?,
                },
                FieldKind::Time => match decode_number(raw, fd.bit_length, false, fd.resolution) {
                    FieldValue::Null => FieldValue::Null,
                    scaled => {
                        let seconds = scaled.as_f64().unwrap_or(0.0);
                        FieldValue::Time(time_of_day(seconds))
                    }
                },
                FieldKind::Mmsi => match decode_number(raw, fd.bit_length, false, 1.0) {
                    FieldValue::Null => FieldValue::Null,
                    // Always rendered as a 9-digit string.
                    _ => FieldValue::Str(format!("{raw:09}")),
                },
                FieldKind::IsoName => FieldValue::Uint(raw),
                FieldKind::Reserved | FieldKind::Spare => FieldValue::Null,
                _ => {
                    return Err(CodecError::UnsupportedFieldKind {
                        kind: fd.kind,
                        field: fd.id,
                    })
                }
            }
        }
    };

    Ok(Field {
        id: fd.id,
        name: fd.name,
        description,
        unit_of_measurement: fd.unit.unwrap_or_default().to_string(),
        value,
        raw_value,
        physical_quantities: fd.physical_quantity,
        kind: fd.kind,
        part_of_primary_key: fd.part_of_primary_key,
    })
}

fn epoch_date(days: u64) -> Result<FieldValue, CodecError> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_days(Days::new(days)))
        .map(FieldValue::Date)
        .ok_or(CodecError::ValueOutOfRange { field: "date" })
}

/// Seconds-since-midnight to wall time; out-of-range values clamp to
/// midnight (the wire occasionally carries 86400+).
fn time_of_day(seconds: f64) -> NaiveTime {
    let whole = seconds as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(whole, 0)
        .unwrap_or(NaiveTime::MIN)
}

//==================================================================================ENCODE

/// Encode a message's fields into a wire payload according to the
/// descriptor. Fields with a recorded raw value are emitted verbatim, which
/// makes decode → encode round trips exact; fields populated by the caller
/// are scaled and bounds-checked.
pub fn encode_fields(
    message: &Message,
    descriptor: &'static PgnDescriptor,
) -> Result<Vec<u8>, CodecError> {
    // Pre-fill with ones so skipped reserved regions read back as such.
    let mut buffer = vec![0xFFu8; MAX_PAYLOAD_BYTES];
    let bits_written = {
        let mut writer = BitWriter::new(&mut buffer);
        for fd in descriptor.fields {
            let field = message.field(fd.id);
            write_field(&mut writer, fd, field)?;
        }
        writer.bit_cursor()
    };
    buffer.truncate(bits_written.div_ceil(8));
    Ok(buffer)
}

fn write_field(
    writer: &mut BitWriter,
    fd: &'static FieldDescriptor,
    field: Option<&Field>,
) -> Result<(), CodecError> {
    let (value, raw_value) = match field {
        Some(f) => (&f.value, &f.raw_value),
        None => (&FieldValue::Null, &FieldValue::Null),
    };

    match fd.kind {
        FieldKind::StringFix => {
            let expected = (fd.bit_length / 8) as usize;
            let mut bytes = string_bytes(fd, value, raw_value)?;
            bytes.resize(expected, 0xFF);
            writer.write_bytes(&bytes)?;
        }
        FieldKind::StringLz => {
            let bytes = string_bytes(fd, value, raw_value)?;
            writer.write_u64(bytes.len() as u64, 8)?;
            writer.write_bytes(&bytes)?;
            writer.write_u64(0, 8)?; // terminating NUL
        }
        FieldKind::StringLau => {
            let bytes = string_bytes(fd, value, raw_value)?;
            writer.write_u64(bytes.len() as u64 + 2, 8)?;
            writer.write_u64(1, 8)?; // UTF-8 payload
            writer.write_bytes(&bytes)?;
        }
        FieldKind::Binary => match (raw_value, value) {
            (FieldValue::Bytes(bytes), _) | (_, FieldValue::Bytes(bytes)) => {
                writer.write_bytes(bytes)?;
            }
            _ => {
                return Err(CodecError::DataTypeMismatch {
                    field: fd.id,
                    value: value.clone(),
                })
            }
        },
        FieldKind::Spare => {
            if let FieldValue::Uint(raw) = raw_value {
                writer.write_u64(*raw, fd.bit_length)?;
            } else {
                writer.write_u64(0, fd.bit_length)?;
            }
        }
        FieldKind::Reserved => {
            if let FieldValue::Uint(raw) = raw_value {
                writer.write_u64(*raw, fd.bit_length)?;
            } else {
                // Buffer is pre-filled with ones.
                writer.skip(fd.bit_length)?;
            }
        }
        FieldKind::Variable
        | FieldKind::DynamicFieldKey
        | FieldKind::DynamicFieldLength
        | FieldKind::DynamicFieldValue
        | FieldKind::FieldIndex => {
            return Err(CodecError::UnsupportedFieldKind {
                kind: fd.kind,
                field: fd.id,
            })
        }
        _ => {
            let raw = numeric_raw(fd, value, raw_value)?;
            writer.write_u64(raw, fd.bit_length)?;
        }
    }
    Ok(())
}

/// Wire bits for a numeric-family field, preferring the recorded raw value.
fn numeric_raw(
    fd: &'static FieldDescriptor,
    value: &FieldValue,
    raw_value: &FieldValue,
) -> Result<u64, CodecError> {
    if let FieldValue::Uint(raw) = raw_value {
        return Ok(*raw & width_mask(fd.bit_length));
    }

    match (fd.kind, value) {
        (_, FieldValue::Null) => {
            encode_number(None, fd.id, fd.bit_length, fd.signed, fd.resolution)
        }
        (FieldKind::Float, v) => {
            let float = v.as_f64().ok_or_else(|| CodecError::DataTypeMismatch {
                field: fd.id,
                value: v.clone(),
            })?;
            Ok(u32::from_le_bytes((float as f32).to_le_bytes()) as u64)
        }
        (FieldKind::Decimal, FieldValue::Uint(v)) => Ok(encode_decimal(*v)),
        (FieldKind::Decimal, FieldValue::Int(v)) if *v >= 0 => Ok(encode_decimal(*v as u64)),
        (FieldKind::Lookup, FieldValue::Str(label)) => fd
            .lookup
            .and_then(|table| table.value(label))
            .map(u64::from)
            .ok_or_else(|| CodecError::DataTypeMismatch {
                field: fd.id,
                value: value.clone(),
            }),
        (FieldKind::Date, FieldValue::Date(date)) => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
                .ok_or(CodecError::ValueOutOfRange { field: fd.id })?;
            let days = date.signed_duration_since(epoch).num_days();
            if days < 0 {
                return Err(CodecError::ValueOutOfRange { field: fd.id });
            }
            Ok(days as u64)
        }
        (FieldKind::Time, FieldValue::Time(time)) => {
            let seconds = time.signed_duration_since(NaiveTime::MIN).num_seconds() as f64;
            encode_number(Some(seconds), fd.id, fd.bit_length, false, fd.resolution)
        }
        (FieldKind::Mmsi, FieldValue::Str(text)) => text
            .parse::<u64>()
            .map_err(|_| CodecError::DataTypeMismatch {
                field: fd.id,
                value: value.clone(),
            }),
        (_, v) => {
            let number = v.as_f64().ok_or_else(|| CodecError::DataTypeMismatch {
                field: fd.id,
                value: v.clone(),
            })?;
            encode_number(Some(number), fd.id, fd.bit_length, fd.signed, fd.resolution)
        }
    }
}

fn string_bytes(
    fd: &'static FieldDescriptor,
    value: &FieldValue,
    raw_value: &FieldValue,
) -> Result<Vec<u8>, CodecError> {
    match (raw_value, value) {
        (FieldValue::Bytes(bytes), _) => Ok(bytes.clone()),
        (_, FieldValue::Str(text)) => Ok(text.as_bytes().to_vec()),
        (_, FieldValue::Null) => Ok(Vec::new()),
        _ => Err(CodecError::DataTypeMismatch {
            field: fd.id,
            value: value.clone(),
        }),
    }
}
