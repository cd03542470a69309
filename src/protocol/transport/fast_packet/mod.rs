//! NMEA 2000 Fast Packet support: encapsulates payloads larger than eight
//! bytes across successive CAN frames linked by a 3-bit sequence counter and
//! a 5-bit frame counter.
/// Maximum payload a Fast Packet can transport once reassembled.
pub const MAX_FAST_PACKET_PAYLOAD: usize = 223;

pub mod assembler;
pub mod builder;
