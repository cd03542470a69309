//! Defines the "data contract" between the generated PGN catalog (the scribe)
//! and the codec engine (the interpreter).
//!
//! The catalog exposes static descriptors that implement this contract.
//! The `infra::codec::engine` module consumes those descriptors to parse or
//! build binary payloads, producing the [`Message`]/[`Field`] structures the
//! rest of the library works with.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Semantic type of a field within a PGN.
/// Mirrors the `FieldType` entries found in `canboat.json`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    /// Signed or unsigned integer; the descriptor carries the distinction.
    Number,
    /// 32-bit IEEE-754 floating-point value, little endian.
    Float,
    /// Unsigned numeric value stored as two decimal digits per byte (BCD).
    Decimal,
    /// Value is an index into a dedicated enumeration.
    Lookup,
    /// Lookup resolved through another field's value.
    IndirectLookup,
    /// Bitfield where each individual bit is a flag.
    #[serde(rename = "BITLOOKUP")]
    BitLookup,
    /// Time since midnight UTC, at the descriptor's resolution.
    Time,
    /// Duration in seconds at the descriptor's resolution.
    Duration,
    /// Date stored as a day count since the Unix epoch (1970-01-01).
    Date,
    /// A 24-bit number referring to a Parameter Group Number.
    Pgn,
    /// 64-bit field describing a device identity (see PGN 60928).
    IsoName,
    /// Fixed-length string; trailing `@`, NUL, 0xFF, and blanks are trimmed.
    StringFix,
    /// Variable-length string prefixed by a length byte and NUL-terminated.
    StringLz,
    /// Variable-length string prefixed by length and encoding bytes
    /// (0 = UTF-16LE, 1 = UTF-8/ASCII).
    StringLau,
    /// Raw binary block.
    Binary,
    /// Reserved bits, read back verbatim and written as all ones.
    Reserved,
    /// Spare bits, written as zeros.
    Spare,
    /// Maritime Mobile Service Identity: 32-bit number printed as 9 digits.
    Mmsi,
    /// Field whose definition comes from a referenced PGN and field.
    Variable,
    /// Key of a dynamic key/length/value field group.
    DynamicFieldKey,
    /// Length of the following dynamic value field.
    DynamicFieldLength,
    /// Dynamic value field whose type is selected by the preceding key.
    DynamicFieldValue,
    /// Index of a field in the referenced PGN.
    FieldIndex,
}

/// Physical quantity attached to a numeric field. Unit preferences are keyed
/// by this tag; Kelvin, Pascal, radian, and m/s are the wire units.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhysicalQuantity {
    ElectricalCurrent,
    ElectricalCharge,
    ElectricalEnergy,
    ElectricalPower,
    ElectricalApparentPower,
    ElectricalReactivePower,
    PotentialDifference,
    PowerFactor,
    Length,
    Distance,
    Speed,
    Angle,
    AngularVelocity,
    Volume,
    VolumetricFlow,
    MagneticField,
    Frequency,
    Date,
    Time,
    Duration,
    GeographicalLatitude,
    GeographicalLongitude,
    Temperature,
    Pressure,
    PressureRate,
    Concentration,
    SignalStrength,
    SignalToNoiseRatio,
}

//==================================================================================FIELD_VALUE

/// Decoded value of a single field.
///
/// Reserved "not available" sentinels decode to [`FieldValue::Null`]; they
/// are not errors. `Uint` carries raw pre-scaling bit patterns (which may use
/// the full 64-bit range), `Int`/`Float` carry post-scaling values.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl FieldValue {
    /// Numeric view used by the encoder and the unit-conversion pass.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Uint(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// True when the field decoded to the "not available" sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Int(v) => serializer.serialize_i64(*v),
            FieldValue::Uint(v) => serializer.serialize_u64(*v),
            FieldValue::Float(v) => serializer.serialize_f64(*v),
            FieldValue::Str(v) => serializer.serialize_str(v),
            // Binary content travels as a lowercase hex string in JSON.
            FieldValue::Bytes(v) => serializer.serialize_str(&hex::encode(v)),
            FieldValue::Date(v) => serializer.serialize_str(&v.format("%Y-%m-%d").to_string()),
            FieldValue::Time(v) => serializer.serialize_str(&v.format("%H:%M:%S").to_string()),
        }
    }
}

//==================================================================================FIELD

/// One slot of a decoded message.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    /// Stable field identifier (snake_case).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Static description, or the resolved label for lookup fields.
    pub description: String,
    /// Unit string; updated when a unit preference converts the value.
    pub unit_of_measurement: String,
    /// Post-scaling, possibly unit-converted value.
    pub value: FieldValue,
    /// Pre-scaling integer bits or raw bytes as read from the wire.
    pub raw_value: FieldValue,
    /// Physical quantity tag, when the field carries one.
    pub physical_quantities: Option<PhysicalQuantity>,
    /// Semantic field type.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether the field is identity-defining for its data stream.
    pub part_of_primary_key: bool,
}

//==================================================================================MESSAGE

/// A decoded or to-be-encoded NMEA 2000 application message.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Parameter Group Number.
    #[serde(rename = "PGN")]
    pub pgn: u32,
    /// Stable ASCII identifier, e.g. `isoAddressClaim`.
    pub id: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Ordered field sequence, as laid out by the catalog.
    pub fields: Vec<Field>,
    /// Source address (0-255).
    pub source: u8,
    /// Destination address; 255 = broadcast.
    pub destination: u8,
    /// Priority (0-7, lower is more urgent).
    pub priority: u8,
    /// Reception or construction instant.
    pub timestamp: DateTime<Utc>,
    /// Optional time-to-live in seconds, from the catalog entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Raw 64-bit ISO NAME of the source device, when known.
    pub source_iso_name: Option<u64>,
    /// Stable 128-bit stream fingerprint, hex-encoded, when computed.
    pub hash: Option<String>,
}

impl Message {
    /// Build an empty message shell from a catalog descriptor. Fields start
    /// as `Null` and can be populated before encoding.
    pub fn from_descriptor(descriptor: &'static PgnDescriptor) -> Self {
        let fields = descriptor
            .fields
            .iter()
            .map(|fd| Field {
                id: fd.id,
                name: fd.name,
                description: String::new(),
                unit_of_measurement: fd.unit.unwrap_or_default().to_string(),
                value: FieldValue::Null,
                raw_value: FieldValue::Null,
                physical_quantities: fd.physical_quantity,
                kind: fd.kind,
                part_of_primary_key: fd.part_of_primary_key,
            })
            .collect();
        Self {
            pgn: descriptor.pgn,
            id: descriptor.id,
            description: descriptor.description,
            fields,
            source: 0,
            destination: 255,
            priority: descriptor.priority.unwrap_or(6),
            timestamp: Utc::now(),
            ttl: descriptor.ttl,
            source_iso_name: None,
            hash: None,
        }
    }

    /// Immutable access to a field by id.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Mutable access to a field by id.
    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Shorthand for a field's decoded value.
    pub fn field_value(&self, id: &str) -> Option<&FieldValue> {
        self.field(id).map(|f| &f.value)
    }

    /// Serialize the message to its single-line JSON form (JSONL dump shape).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

//==================================================================================LOOKUP_TABLES

/// Direct lookup enumeration: `(value, label, description)` triples.
/// The description carries the long form when the catalog has one
/// (e.g. industry code 4 -> label "Marine", description "Marine Industry").
#[derive(Debug)]
pub struct LookupTable {
    pub name: &'static str,
    pub entries: &'static [(u32, &'static str, &'static str)],
}

impl LookupTable {
    pub fn label(&self, value: u32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(v, _, _)| *v == value)
            .map(|(_, label, _)| *label)
    }

    pub fn description(&self, value: u32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(v, _, _)| *v == value)
            .map(|(_, _, desc)| *desc)
    }

    /// Reverse lookup, used when encoding from a resolved label.
    pub fn value(&self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(v, _, _)| *v)
    }
}

/// Bit lookup enumeration: `(bit index, label)` pairs.
#[derive(Debug)]
pub struct BitLookupTable {
    pub name: &'static str,
    pub entries: &'static [(u8, &'static str)],
}

impl BitLookupTable {
    /// Comma-separated labels of the set bits, ascending bit order,
    /// unmapped bits omitted.
    pub fn flags(&self, mut mask: u64) -> String {
        let mut labels = Vec::new();
        let mut bit = 0u8;
        while mask != 0 {
            if mask & 1 == 1 {
                if let Some((_, label)) = self.entries.iter().find(|(b, _)| *b == bit) {
                    labels.push(*label);
                }
            }
            bit += 1;
            mask >>= 1;
        }
        labels.join(", ")
    }
}

/// Indirect lookup enumeration: `(control value, value, label)` triples.
/// The control value comes from another field of the same message.
#[derive(Debug)]
pub struct IndirectLookupTable {
    pub name: &'static str,
    pub entries: &'static [(u32, u32, &'static str)],
}

impl IndirectLookupTable {
    pub fn label(&self, control: u32, value: u32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, v, _)| *c == control && *v == value)
            .map(|(_, _, label)| *label)
    }
}

//==================================================================================DESCRIPTORS

/// Descriptor for a single PGN field.
#[derive(Debug)]
pub struct FieldDescriptor {
    /// Field identifier (snake_case).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Semantic type for the field.
    pub kind: FieldKind,
    /// Field bit length. `0` marks variable-length fields (STRING_LAU).
    pub bit_length: u32,
    /// Absolute bit offset of the first bit within the payload.
    pub bit_offset: u32,
    /// Whether numbers are signed.
    pub signed: bool,
    /// Resolution factor applied after bounds handling.
    pub resolution: f64,
    /// Physical unit of the post-scaling value (e.g. "m/s", "rad", "K").
    pub unit: Option<&'static str>,
    /// Physical quantity tag.
    pub physical_quantity: Option<PhysicalQuantity>,
    /// Direct lookup enumeration.
    pub lookup: Option<&'static LookupTable>,
    /// Bit lookup enumeration.
    pub bit_lookup: Option<&'static BitLookupTable>,
    /// Indirect lookup enumeration plus the id of its controlling field.
    pub indirect_lookup: Option<&'static IndirectLookupTable>,
    pub indirect_control: Option<&'static str>,
    /// Constant the field must equal for proprietary-PGN discrimination.
    pub match_value: Option<u32>,
    /// Whether the field is identity-defining for its data stream.
    pub part_of_primary_key: bool,
}

impl FieldDescriptor {
    /// Base descriptor for generated entries; fields override what they need.
    pub const DEFAULT: FieldDescriptor = FieldDescriptor {
        id: "",
        name: "",
        kind: FieldKind::Number,
        bit_length: 0,
        bit_offset: 0,
        signed: false,
        resolution: 1.0,
        unit: None,
        physical_quantity: None,
        lookup: None,
        bit_lookup: None,
        indirect_lookup: None,
        indirect_control: None,
        match_value: None,
        part_of_primary_key: false,
    };
}

/// Descriptor for an entire PGN layout. Immutable at runtime; produced by the
/// external catalog generator.
#[derive(Debug)]
pub struct PgnDescriptor {
    /// Parameter Group Number.
    pub pgn: u32,
    /// Stable ASCII identifier (camelCase).
    pub id: &'static str,
    /// User-facing description.
    pub description: &'static str,
    /// Default transmission priority.
    pub priority: Option<u8>,
    /// Whether the message is Fast Packet or single frame.
    pub fast_packet: bool,
    /// Nominal payload length in bytes (minimum for variable PGNs).
    pub length: u16,
    /// Optional downstream time-to-live, in seconds.
    pub ttl: Option<u64>,
    /// Ordered field descriptors.
    pub fields: &'static [FieldDescriptor],
}

//==================================================================================SERDE_HELPERS

/// Compact JSON view of a lookup table reference (name only); used when
/// descriptors themselves need to be rendered for diagnostics.
impl Serialize for LookupTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("LookupTable", 1)?;
        s.serialize_field("name", self.name)?;
        s.end()
    }
}
