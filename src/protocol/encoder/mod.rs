//! Message encoder: catalog encode, header validation, Fast Packet
//! fragmentation, and the dialect-specific wire framings.
//!
//! Each dialect framer turns one user-level message into the list of
//! wire-level byte strings to send; a single atomic "send" may enqueue
//! several wire frames. The encoder carries the 3-bit Fast Packet sequence
//! counter as instance state; each transport client owns its own encoder, so
//! sequences never interleave across clients.
use crate::core::Message;
use crate::error::{CodecError, EncodeError};
use crate::infra::codec::engine;
use crate::protocol::messages;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::{CanHeader, CanId};
use crate::protocol::transport::fast_packet::builder::FastPacketBuilder;

#[derive(Debug, Default)]
pub struct Encoder {
    /// Fast Packet sequence counter, incremented modulo 8 per message.
    sequence: u8,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog-encode the message into its application payload.
    pub fn encode_payload(&self, message: &Message) -> Result<Vec<u8>, EncodeError> {
        let descriptor = self.descriptor(message)?;
        Ok(engine::encode_fields(message, descriptor)?)
    }

    /// Encode and frame the message into CAN frames: one for single-frame
    /// PGNs, the Fast Packet sequence otherwise.
    pub fn encode_frames(&mut self, message: &Message) -> Result<Vec<CanFrame>, EncodeError> {
        let descriptor = self.descriptor(message)?;
        let payload = engine::encode_fields(message, descriptor)?;
        let id = CanId::from_header(&CanHeader {
            pgn: message.pgn,
            source: message.source,
            destination: message.destination,
            priority: message.priority,
        })?;

        if descriptor.fast_packet {
            let sequence = self.next_sequence();
            Ok(FastPacketBuilder::new(id, &payload, sequence)
                .frames()
                .collect())
        } else {
            if payload.len() > 8 {
                return Err(EncodeError::Codec(CodecError::ValueOutOfRange {
                    field: "payload",
                }));
            }
            Ok(vec![CanFrame::new(id, &payload)])
        }
    }

    //==================================================================================DIALECTS

    /// Fixed 13-byte binary framing (EByte-style TCP gateways).
    pub fn encode_binary(&mut self, message: &Message) -> Result<Vec<Vec<u8>>, EncodeError> {
        let frames = self.encode_frames(message)?;
        Ok(frames
            .iter()
            .map(|frame| {
                let mut wire = Vec::with_capacity(13);
                // Extended frame flag plus payload length nibble.
                wire.push(0x80 | (frame.dlc() as u8 & 0x0F));
                wire.extend_from_slice(&frame.id().0.to_be_bytes());
                wire.extend_from_slice(frame.payload());
                wire.resize(13, 0xFF);
                wire
            })
            .collect())
    }

    /// Serial framing: `0xAA | type | id[4 little-endian] | payload | 0x55`.
    pub fn encode_serial(&mut self, message: &Message) -> Result<Vec<Vec<u8>>, EncodeError> {
        let frames = self.encode_frames(message)?;
        Ok(frames
            .iter()
            .map(|frame| {
                let mut wire = Vec::with_capacity(7 + frame.dlc());
                wire.push(0xAA);
                wire.push(0xE0 | (frame.dlc() as u8 & 0x0F));
                wire.extend_from_slice(&frame.id().0.to_le_bytes());
                wire.extend_from_slice(frame.payload());
                wire.push(0x55);
                wire
            })
            .collect())
    }

    /// Actisense ASCII line: `<prio|dst|src> <pgn> <payload hex>`. Fast
    /// Packet payloads travel combined in this dialect, so one message is
    /// always one line.
    pub fn encode_actisense(&self, message: &Message) -> Result<String, EncodeError> {
        let payload = self.encode_payload(message)?;

        let n = ((message.source as u32) << 12)
            | ((message.destination as u32) << 4)
            | (message.priority as u32 & 0xF);

        Ok(format!(
            "{:05X} {:05X} {}",
            n,
            message.pgn & 0xFFFFFF,
            hex::encode_upper(&payload)
        ))
    }

    /// Yacht Devices ASCII lines: `<8-hex CAN id> <space-separated payload
    /// bytes>\r\n`, one line per wire frame.
    pub fn encode_yacht_devices(&mut self, message: &Message) -> Result<Vec<String>, EncodeError> {
        let frames = self.encode_frames(message)?;
        Ok(frames
            .iter()
            .map(|frame| {
                let bytes = frame
                    .payload()
                    .iter()
                    .map(|byte| format!("{byte:02X}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{:08X} {}\r\n", frame.id().0, bytes)
            })
            .collect())
    }

    //==================================================================================INTERNALS

    /// Resolve the catalog entry: by `(PGN, id)` for proprietary PGNs, by
    /// PGN alone otherwise.
    fn descriptor(
        &self,
        message: &Message,
    ) -> Result<&'static crate::core::PgnDescriptor, EncodeError> {
        messages::descriptor_by_id(message.pgn, message.id).ok_or_else(|| EncodeError::UnknownPgn {
            pgn: message.pgn,
            id: message.id.to_string(),
        })
    }

    fn next_sequence(&mut self) -> u8 {
        let current = self.sequence;
        self.sequence = (self.sequence + 1) & 0x07;
        current
    }
}
