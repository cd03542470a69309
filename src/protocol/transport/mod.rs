//! CAN transport primitives: 29-bit identifier codec, frame container, and
//! Fast Packet assembly/segmentation.
pub mod can_frame;
pub mod can_id;
pub mod fast_packet;
