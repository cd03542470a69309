//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (CAN ID construction,
//! framing, field codec, transport, etc.).
use crate::core::{FieldKind, FieldValue};
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can occur while building a 29-bit CAN identifier or while
/// validating message header ranges before encoding.
pub enum HeaderError {
    /// Priority does not fit in 3 bits.
    #[error("Invalid priority: {priority}")]
    InvalidPriority { priority: u16 },
    /// Source address does not fit in 8 bits.
    #[error("Invalid source address: {source_addr}")]
    InvalidSource { source_addr: u16 },
    /// PGN does not fit in the 18-bit identifier field.
    #[error("PGN out of range: {pgn}")]
    InvalidPgn { pgn: u32 },
    /// Destination address does not fit in 8 bits.
    #[error("Invalid destination address: {destination}")]
    InvalidDestination { destination: u16 },
}

//================================================================================CODEC_ERROR

#[derive(Debug, Error)]
/// Issues encountered while decoding or encoding a field according to its
/// catalog descriptor.
pub enum CodecError {
    /// Value type is incompatible with the field kind.
    #[error("Data type mismatch for field {field}: {value:?}")]
    DataTypeMismatch {
        field: &'static str,
        value: FieldValue,
    },
    /// Value does not fit the field's bit width once scaled (the topmost
    /// codes are reserved as "not available" sentinels).
    #[error("Value out of range for field {field}")]
    ValueOutOfRange { field: &'static str },
    /// Field kind not supported by the codec engine.
    #[error("Unsupported field kind {kind:?} for field {field}")]
    UnsupportedFieldKind { kind: FieldKind, field: &'static str },
    /// Expected field was missing from the message.
    #[error("Field {field} not found in message")]
    FieldNotFound { field: &'static str },
    /// Bit-level access on the payload failed (span past the end of the
    /// buffer, or a byte access off a byte boundary).
    #[error(transparent)]
    Bits(#[from] BitSpanError),
}

#[derive(Error, Debug)]
/// Errors raised while turning wire bytes into a decoded message.
pub enum DecodeError {
    /// Wire bytes failed structural checks (sentinels, length, header text).
    #[error("Framing error: {reason}")]
    Framing { reason: &'static str },
    /// No catalog entry for the received PGN.
    #[error("No catalog entry for PGN {pgn}")]
    UnknownPgn { pgn: u32 },
    /// The per-PGN decode failed; typically a bit-layout mismatch.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Error, Debug)]
/// Errors raised while turning a typed message back into wire bytes.
pub enum EncodeError {
    /// Caller supplied a header value outside its legal bounds.
    #[error(transparent)]
    InvalidRange(#[from] HeaderError),
    /// No catalog entry for the message's PGN (and id, for proprietary PGNs).
    #[error("No catalog entry for PGN {pgn} (id {id})")]
    UnknownPgn { pgn: u32, id: String },
    /// The per-PGN encode failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Error, Debug)]
/// Invalid decoder or client configuration, detected at construction.
pub enum ConfigError {
    /// Exclude and include sets are mutually exclusive.
    #[error("Only one of the exclude or include {what} sets can be used")]
    ExclusiveFilters { what: &'static str },
    /// The dump sink could not be opened.
    #[error("Cannot open dump sink: {0}")]
    DumpSink(#[from] std::io::Error),
}

//==================================================================================TRANSPORT_ERROR

#[derive(Error, Debug)]
/// Errors surfaced by the gateway transport layer.
pub enum TransportError {
    /// Underlying network or serial operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serial port could not be opened or configured.
    #[error("Serial error: {0}")]
    Serial(#[from] tokio_serial::Error),
    /// The gateway refused the connection ("Sorry,Limited" banner).
    #[error("Gateway refused the connection")]
    Refused,
    /// The client was closed; no further operation is possible.
    #[error("Client is closed")]
    Closed,
}

#[derive(Error, Debug)]
/// Errors returned by the gateway send path.
pub enum SendError {
    /// Encoding failed; the connection is left untouched.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The write failed; the client transitions to DISCONNECTED.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

//==================================================================================BIT_SPAN_ERRORS
#[derive(Debug, Error, PartialEq, Eq)]
/// Errors raised by the bit cursors while reading or writing a field span.
/// The same conditions apply in both directions, so reader and writer share
/// this type.
pub enum BitSpanError {
    /// The span starting at `offset` would cross the end of the buffer.
    #[error("span of {length} bits at bit {offset} crosses the end of the {capacity}-bit buffer")]
    PastEnd {
        offset: usize,
        length: usize,
        capacity: usize,
    },
    /// Field spans wider than a 64-bit word are carried as byte ranges, not
    /// as integers.
    #[error("a {length}-bit span does not fit a 64-bit word")]
    WiderThanWord { length: usize },
    /// Whole-byte access was requested while the cursor sat mid-byte.
    #[error("byte access at bit {offset} is off the byte grid")]
    Misaligned { offset: usize },
}

//==================================================================================ISO_NAME_ERRORS
#[derive(Debug, Error, PartialEq, Eq)]
/// A NAME component does not fit the width the wire layout gives it.
pub enum IsoNameError {
    #[error("{component} value {value} exceeds its {bits}-bit wire slot")]
    ComponentTooWide {
        component: &'static str,
        bits: u32,
        value: u64,
    },
}
