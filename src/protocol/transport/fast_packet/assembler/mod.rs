//! NMEA 2000 Fast Packet assembler: rebuilds application messages by
//! aggregating the CAN frames of a multi-packet session.
//!
//! Sessions are keyed by (PGN, source, destination): distinct sources, or
//! the same source talking to distinct destinations, reassemble
//! independently. The table is an accelerator, not durable state; dropping
//! it mid-session only loses in-flight partial messages.
use super::MAX_FAST_PACKET_PAYLOAD;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

//==================================================================================Enums and Structs
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Frame discarded: orphan continuation, stale sequence, duplicate, or
    /// nonsensical declared length.
    Ignored,
    /// Frame successfully integrated but additional fragments are missing.
    FragmentConsumed,
    /// All expected bytes were received; the reassembled payload is
    /// truncated to the declared length.
    MessageComplete(Vec<u8>),
}

/// Session key: one reassembly stream per (PGN, source, destination).
type SessionKey = (u32, u8, u8);

/// Internal state of one reassembly stream.
#[derive(Debug)]
struct Session {
    /// Declared payload length, from the first frame's second byte.
    payload_length: usize,
    /// Bytes accumulated so far.
    bytes_stored: usize,
    /// Sequence counter (3 bits) shared by all frames of one message.
    sequence: u8,
    /// Frame-index → data bytes (6 for frame 0, up to 7 afterwards).
    frames: BTreeMap<u8, Vec<u8>>,
}

/// Main assembler: owns the per-stream session table.
#[derive(Debug, Default)]
pub struct FastPacketAssembler {
    sessions: HashMap<SessionKey, Session>,
}

impl FastPacketAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of in-flight partial messages (diagnostics).
    pub fn pending(&self) -> usize {
        self.sessions.len()
    }

    //==================================================================================Process Functions
    /// Process one Fast Packet CAN frame, in wire byte order: byte 0 carries
    /// the sequence counter (high 3 bits) and frame counter (low 5 bits),
    /// frame 0 additionally carries the total payload length in byte 1.
    ///
    /// Returns whether the frame was ignored, consumed, or completed the
    /// message.
    pub fn process_frame(
        &mut self,
        pgn: u32,
        source: u8,
        destination: u8,
        data: &[u8],
    ) -> ProcessResult {
        if data.len() < 2 {
            return ProcessResult::Ignored;
        }
        let sequence = (data[0] >> 5) & 0x07;
        let frame_index = data[0] & 0x1F;
        let key = (pgn, source, destination);

        if frame_index == 0 {
            let payload_length = data[1] as usize;
            if payload_length == 0 || payload_length > MAX_FAST_PACKET_PAYLOAD {
                return ProcessResult::Ignored;
            }

            match self.sessions.get(&key) {
                // Same sequence, frame 0 again: duplicate.
                Some(session) if session.sequence == sequence => {
                    debug!(pgn, source, sequence, "duplicate first frame ignored");
                    return ProcessResult::Ignored;
                }
                // A new sequence supersedes any partial prior assembly.
                _ => {
                    let payload = data[2..].to_vec();
                    let stored = payload.len();
                    let mut frames = BTreeMap::new();
                    frames.insert(0u8, payload);
                    self.sessions.insert(
                        key,
                        Session {
                            payload_length,
                            bytes_stored: stored,
                            sequence,
                            frames,
                        },
                    );
                }
            }
        } else {
            let Some(session) = self.sessions.get_mut(&key) else {
                // First frame never arrived; drop silently.
                debug!(pgn, source, frame_index, "orphan continuation frame");
                return ProcessResult::Ignored;
            };
            if session.sequence != sequence {
                debug!(pgn, source, sequence, "frame does not match current sequence");
                return ProcessResult::Ignored;
            }
            if session.frames.contains_key(&frame_index) {
                debug!(pgn, source, frame_index, "duplicate frame ignored");
                return ProcessResult::Ignored;
            }
            let payload = data[1..].to_vec();
            session.bytes_stored += payload.len();
            session.frames.insert(frame_index, payload);
        }

        self.try_complete(key)
    }

    /// Emit the message once the byte count reaches the declared length.
    fn try_complete(&mut self, key: SessionKey) -> ProcessResult {
        let done = self
            .sessions
            .get(&key)
            .is_some_and(|s| s.bytes_stored >= s.payload_length);
        let Some(session) = (if done { self.sessions.remove(&key) } else { None }) else {
            return ProcessResult::FragmentConsumed;
        };

        // BTreeMap iteration gives ascending frame order.
        let mut payload: Vec<u8> = session.frames.into_values().flatten().collect();
        payload.truncate(session.payload_length);
        ProcessResult::MessageComplete(payload)
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
