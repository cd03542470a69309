//! High-level components of the NMEA 2000 protocol: lookup tables, the PGN
//! catalog, network management, CAN/Fast Packet transport, and the
//! decode/encode pipelines.
pub mod decoder;
pub mod encoder;
pub mod lookups;
pub mod managment;
pub mod messages;
pub mod transport;
