//! CAN frame generator for outbound Fast Packet messages: segments an
//! application payload into the required frame sequence.
//!
//! The 3-bit sequence counter is owned by the encoder instance and handed to
//! the builder; it is not process-wide state, so two encoders never share a
//! sequence.
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::fast_packet::MAX_FAST_PACKET_PAYLOAD;

#[derive(Debug)]
/// Shared parameters for all frames composing a Fast Packet message.
pub struct FastPacketBuilder<'a> {
    id: CanId,
    payload: &'a [u8],
    sequence: u8,
}

impl<'a> FastPacketBuilder<'a> {
    /// Prepare the segmentation of `payload` under sequence counter
    /// `sequence` (only the low 3 bits are used).
    pub fn new(id: CanId, payload: &'a [u8], sequence: u8) -> Self {
        Self {
            id,
            payload: &payload[..payload.len().min(MAX_FAST_PACKET_PAYLOAD)],
            sequence: sequence & 0x07,
        }
    }

    /// Start the iteration; each call to `next` yields the next frame.
    pub fn frames(self) -> FrameIterator<'a> {
        FrameIterator {
            builder: self,
            frame_index: 0,
            bytes_sent: 0,
        }
    }
}

/// Lazy iterator returning frames one by one as they are encoded.
pub struct FrameIterator<'a> {
    builder: FastPacketBuilder<'a>,
    frame_index: u8,
    bytes_sent: usize,
}

impl Iterator for FrameIterator<'_> {
    type Item = CanFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.builder.payload.len();
        if self.bytes_sent >= total && self.frame_index > 0 {
            return None;
        }

        let counter = ((self.builder.sequence & 0x07) << 5) | (self.frame_index & 0x1F);
        let mut scratch = [0u8; 8];
        scratch[0] = counter;

        let used = if self.frame_index == 0 {
            // First frame: counter byte, declared total length, six data
            // bytes.
            scratch[1] = total as u8;
            let copy = total.min(6);
            scratch[2..2 + copy].copy_from_slice(&self.builder.payload[..copy]);
            self.bytes_sent += copy;
            2 + copy
        } else {
            // Continuation frames: counter byte plus up to seven data bytes.
            let copy = (total - self.bytes_sent).min(7);
            scratch[1..1 + copy]
                .copy_from_slice(&self.builder.payload[self.bytes_sent..self.bytes_sent + copy]);
            self.bytes_sent += copy;
            1 + copy
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        Some(CanFrame::new(self.builder.id, &scratch[..used]))
    }
}
