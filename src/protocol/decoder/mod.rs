//! Message decoder: dialect-specific entry points that normalize gateway
//! frames to (header, wire-order payload), Fast Packet reassembly, catalog
//! decode, and the post-decode enrichment pipeline (filters, network map,
//! unit preferences, fingerprint, JSONL dump).
//!
//! Every entry point yields one complete [`Message`] or `None` (incomplete
//! Fast Packet, filtered out, or dropped by the grace window). `None` is not
//! an error.
use crate::core::{FieldValue, Message, PhysicalQuantity};
use crate::error::{ConfigError, DecodeError};
use crate::infra::codec::engine;
use crate::protocol::managment::iso_name::IsoName;
use crate::protocol::managment::network_map::{self, NetworkMap, DEFAULT_GRACE_WINDOW};
use crate::protocol::messages;
use crate::protocol::transport::can_id::{CanHeader, CanId};
use crate::protocol::transport::fast_packet::assembler::{FastPacketAssembler, ProcessResult};
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

const ISO_ADDRESS_CLAIM: u32 = 60928;

//==================================================================================OPTIONS

/// Decoder configuration. Exclude and include sets of one family are
/// mutually exclusive; PGNs can be selected by number or by id.
#[derive(Debug, Default, Clone)]
pub struct DecoderOptions {
    pub exclude_pgns: Vec<u32>,
    pub include_pgns: Vec<u32>,
    pub exclude_ids: Vec<String>,
    pub include_ids: Vec<String>,
    /// Manufacturer filters apply only once the source NAME is known.
    pub exclude_manufacturers: Vec<u16>,
    pub include_manufacturers: Vec<u16>,
    /// Preferred display units per physical quantity, e.g. `Temperature ->
    /// "C"`, `Pressure -> "Bar"`. Matching is case-insensitive.
    pub preferred_units: HashMap<PhysicalQuantity, String>,
    /// Require a known source NAME before emitting messages; enables the
    /// grace window and the stream fingerprint.
    pub build_network_map: bool,
    /// Startup window during which unattributed messages are dropped
    /// silently. Defaults to ten minutes.
    pub grace_window: Option<Duration>,
    /// PGNs whose decoded form is appended to the JSONL dump sink.
    pub dump_pgns: Vec<u32>,
    /// Append-only JSONL dump file; opened at construction.
    pub dump_path: Option<PathBuf>,
}

//==================================================================================DUMP_SINK

/// Append-only JSONL sink; one handle, flushed on drop.
struct DumpSink {
    writer: BufWriter<std::fs::File>,
}

impl DumpSink {
    fn open(path: &PathBuf) -> Result<Self, std::io::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn append(&mut self, message: &Message) {
        match message.to_json() {
            Ok(line) => {
                if let Err(error) = writeln!(self.writer, "{line}") {
                    warn!(%error, "dump sink write failed");
                }
            }
            Err(error) => warn!(%error, "dump sink serialization failed"),
        }
    }

    fn flush(&mut self) {
        if let Err(error) = self.writer.flush() {
            warn!(%error, "dump sink flush failed");
        }
    }
}

//==================================================================================DECODER

/// Single-threaded decoder instance. Owns its reassembly table, its address
/// → NAME map, and the optional dump sink. Not safe for concurrent use;
/// each transport client owns its own.
pub struct Decoder {
    assembler: FastPacketAssembler,
    exclude_pgns: HashSet<u32>,
    include_pgns: HashSet<u32>,
    exclude_ids: HashSet<String>,
    include_ids: HashSet<String>,
    exclude_manufacturers: HashSet<u16>,
    include_manufacturers: HashSet<u16>,
    preferred_units: HashMap<PhysicalQuantity, String>,
    network_map: NetworkMap,
    build_network_map: bool,
    /// The caller asked to filter the address claim; it is still processed
    /// for address tracking and only its emission is suppressed.
    claim_suppressed: bool,
    dump_pgns: HashSet<u32>,
    dump: Option<DumpSink>,
}

impl Decoder {
    pub fn new(options: DecoderOptions) -> Result<Self, ConfigError> {
        if !options.exclude_pgns.is_empty() && !options.include_pgns.is_empty() {
            return Err(ConfigError::ExclusiveFilters { what: "PGN" });
        }
        if !options.exclude_ids.is_empty() && !options.include_ids.is_empty() {
            return Err(ConfigError::ExclusiveFilters { what: "id" });
        }
        if !options.exclude_manufacturers.is_empty() && !options.include_manufacturers.is_empty() {
            return Err(ConfigError::ExclusiveFilters { what: "manufacturer" });
        }

        let exclude_pgns: HashSet<u32> = options.exclude_pgns.into_iter().collect();
        let include_pgns: HashSet<u32> = options.include_pgns.into_iter().collect();
        let exclude_ids: HashSet<String> = options.exclude_ids.into_iter().collect();
        let include_ids: HashSet<String> = options.include_ids.into_iter().collect();

        let claim_suppressed = exclude_pgns.contains(&ISO_ADDRESS_CLAIM)
            || (!include_pgns.is_empty() && !include_pgns.contains(&ISO_ADDRESS_CLAIM))
            || exclude_ids.contains("isoAddressClaim")
            || (!include_ids.is_empty() && !include_ids.contains("isoAddressClaim"));

        let dump = match &options.dump_path {
            Some(path) => Some(DumpSink::open(path)?),
            None => None,
        };

        Ok(Self {
            assembler: FastPacketAssembler::new(),
            exclude_pgns,
            include_pgns,
            exclude_ids,
            include_ids,
            exclude_manufacturers: options.exclude_manufacturers.into_iter().collect(),
            include_manufacturers: options.include_manufacturers.into_iter().collect(),
            preferred_units: options
                .preferred_units
                .into_iter()
                .map(|(quantity, unit)| (quantity, unit.to_lowercase()))
                .collect(),
            network_map: NetworkMap::new(options.grace_window.unwrap_or(DEFAULT_GRACE_WINDOW)),
            build_network_map: options.build_network_map,
            claim_suppressed,
            dump_pgns: options.dump_pgns.into_iter().collect(),
            dump,
        })
    }

    /// Observed address → NAME map.
    pub fn network_map(&self) -> &NetworkMap {
        &self.network_map
    }

    /// Flush the dump sink, if any.
    pub fn flush(&mut self) {
        if let Some(dump) = &mut self.dump {
            dump.flush();
        }
    }

    //==================================================================================ENTRY_POINTS

    /// Fixed 13-byte binary frame (EByte-style TCP gateways): one type byte
    /// (low nibble = payload length, high bit = extended frame), a 4-byte
    /// big-endian CAN id, then up to 8 payload bytes.
    pub fn decode_frame_binary(&mut self, packet: &[u8]) -> Result<Option<Message>, DecodeError> {
        if packet.len() < 5 {
            return Err(DecodeError::Framing {
                reason: "binary frame shorter than 5 bytes",
            });
        }
        let data_length = (packet[0] & 0x0F) as usize;
        if packet.len() < 5 + data_length {
            return Err(DecodeError::Framing {
                reason: "binary frame shorter than its declared length",
            });
        }
        let frame_id = u32::from_be_bytes([packet[1], packet[2], packet[3], packet[4]]);
        // Payload bytes already travel in CAN wire order (LSB first).
        let payload = &packet[5..5 + data_length];

        let header = CanId(frame_id).header();
        self.decode(header, Utc::now(), payload, false)
    }

    /// Serial adapter dialect (WaveShare-style):
    /// `0xAA | type | id[4 little-endian] | payload | 0x55`.
    pub fn decode_frame_serial(&mut self, packet: &[u8]) -> Result<Option<Message>, DecodeError> {
        if packet.len() < 7 {
            return Err(DecodeError::Framing {
                reason: "serial frame shorter than 7 bytes",
            });
        }
        if packet[0] != 0xAA || packet[packet.len() - 1] != 0x55 {
            return Err(DecodeError::Framing {
                reason: "serial frame sentinels missing",
            });
        }
        let data_length = (packet[1] & 0x0F) as usize;
        if packet.len() < 6 + data_length {
            return Err(DecodeError::Framing {
                reason: "serial frame shorter than its declared length",
            });
        }
        let frame_id = u32::from_le_bytes([packet[2], packet[3], packet[4], packet[5]]);
        let payload = &packet[6..6 + data_length];

        let header = CanId(frame_id).header();
        self.decode(header, Utc::now(), payload, false)
    }

    /// Actisense W2K-1 ASCII dialect:
    /// `A<sec>.<ms> <prio|dst|src> <pgn> <payload hex>` with the payload in
    /// wire byte order. Fast Packet frames arrive already reassembled.
    pub fn decode_actisense(&mut self, line: &str) -> Result<Option<Message>, DecodeError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        // The leading timestamp group is optional in captures; a header
        // group can also start with 'A', but never contains a dot.
        let (timestamp, rest) = if parts
            .first()
            .is_some_and(|p| p.starts_with('A') && p.contains('.'))
        {
            if parts.len() < 4 {
                return Err(DecodeError::Framing {
                    reason: "Actisense line needs timestamp, header, PGN, and payload",
                });
            }
            (actisense_timestamp(parts[0])?, &parts[1..])
        } else {
            if parts.len() < 3 {
                return Err(DecodeError::Framing {
                    reason: "Actisense line needs header, PGN, and payload",
                });
            }
            (Utc::now(), &parts[..])
        };

        let n = u32::from_str_radix(rest[0], 16).map_err(|_| DecodeError::Framing {
            reason: "Actisense header group is not hex",
        })?;
        let priority = (n & 0xF) as u8;
        let destination = ((n >> 4) & 0xFF) as u8;
        let source = ((n >> 12) & 0xFF) as u8;

        let pgn = u32::from_str_radix(rest[1], 16).map_err(|_| DecodeError::Framing {
            reason: "Actisense PGN group is not hex",
        })?;
        let payload = hex::decode(rest[2]).map_err(|_| DecodeError::Framing {
            reason: "Actisense payload is not hex",
        })?;

        let header = CanHeader {
            pgn,
            source,
            destination,
            priority: priority & 0x07,
        };
        // Fast Packet frames are pre-combined in this dialect.
        self.decode(header, timestamp, &payload, true)
    }

    /// Yacht Devices ASCII dialect:
    /// `HH:MM:SS.mmm {R|T} <8-hex CAN id> <space-separated payload bytes>`.
    pub fn decode_yacht_devices(&mut self, line: &str) -> Result<Option<Message>, DecodeError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(DecodeError::Framing {
                reason: "Yacht Devices line needs time, direction, id, and payload",
            });
        }
        if parts[1] != "R" && parts[1] != "T" {
            return Err(DecodeError::Framing {
                reason: "Yacht Devices direction must be R or T",
            });
        }

        let time = NaiveTime::parse_from_str(parts[0], "%H:%M:%S%.f").map_err(|_| {
            DecodeError::Framing {
                reason: "Yacht Devices timestamp is malformed",
            }
        })?;
        // Lines carry a time of day only; assume today.
        let timestamp = Utc::now().date_naive().and_time(time).and_utc();

        let frame_id = u32::from_str_radix(parts[2], 16).map_err(|_| DecodeError::Framing {
            reason: "Yacht Devices CAN id is not hex",
        })?;
        let payload = parts[3..]
            .iter()
            .map(|byte| u8::from_str_radix(byte, 16))
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| DecodeError::Framing {
                reason: "Yacht Devices payload is not hex",
            })?;

        let header = CanId(frame_id).header();
        self.decode(header, timestamp, &payload, false)
    }

    /// CSV dialect:
    /// `<timestamp>,<priority>,<pgn>,<src>,<dst>,<len>,<byte>,...` with the
    /// payload in wire byte order. `already_combined` declares whether Fast
    /// Packet frames were pre-combined by the producer.
    pub fn decode_basic(
        &mut self,
        line: &str,
        already_combined: bool,
    ) -> Result<Option<Message>, DecodeError> {
        let parts: Vec<&str> = line.trim().split(',').collect();
        if parts.len() < 7 {
            return Err(DecodeError::Framing {
                reason: "CSV line needs at least seven fields",
            });
        }

        let timestamp = basic_timestamp(parts[0])?;
        let priority: u8 = parts[1].parse().map_err(|_| DecodeError::Framing {
            reason: "CSV priority is not a number",
        })?;
        let pgn: u32 = parts[2].parse().map_err(|_| DecodeError::Framing {
            reason: "CSV PGN is not a number",
        })?;
        let source: u8 = parts[3].parse().map_err(|_| DecodeError::Framing {
            reason: "CSV source is not a number",
        })?;
        let destination: u8 = parts[4].parse().map_err(|_| DecodeError::Framing {
            reason: "CSV destination is not a number",
        })?;
        let length: usize = parts[5].parse().map_err(|_| DecodeError::Framing {
            reason: "CSV length is not a number",
        })?;
        if parts.len() < 6 + length {
            return Err(DecodeError::Framing {
                reason: "CSV line shorter than its declared length",
            });
        }
        let payload = parts[6..6 + length]
            .iter()
            .map(|byte| u8::from_str_radix(byte.trim(), 16))
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| DecodeError::Framing {
                reason: "CSV payload is not hex",
            })?;

        let header = CanHeader {
            pgn,
            source,
            destination,
            priority: priority & 0x07,
        };
        self.decode(header, timestamp, &payload, already_combined)
    }

    //==================================================================================PIPELINE

    /// Common path: numeric filtering, Fast Packet reassembly, catalog
    /// decode, and enrichment.
    fn decode(
        &mut self,
        header: CanHeader,
        timestamp: DateTime<Utc>,
        payload: &[u8],
        already_combined: bool,
    ) -> Result<Option<Message>, DecodeError> {
        // The address claim always passes this stage so address tracking
        // keeps working; its emission is suppressed later instead.
        if header.pgn != ISO_ADDRESS_CLAIM && self.filtered_by_pgn(header.pgn) {
            debug!(pgn = header.pgn, "filtered by PGN");
            return Ok(None);
        }

        let is_fast = !already_combined
            && messages::is_fast_packet(header.pgn)
                .ok_or(DecodeError::UnknownPgn { pgn: header.pgn })?;

        if is_fast {
            match self.assembler.process_frame(
                header.pgn,
                header.source,
                header.destination,
                payload,
            ) {
                ProcessResult::MessageComplete(combined) => {
                    self.process_payload(header, timestamp, &combined)
                }
                _ => Ok(None),
            }
        } else {
            self.process_payload(header, timestamp, payload)
        }
    }

    fn process_payload(
        &mut self,
        header: CanHeader,
        timestamp: DateTime<Utc>,
        payload: &[u8],
    ) -> Result<Option<Message>, DecodeError> {
        let is_claim = header.pgn == ISO_ADDRESS_CLAIM;
        let source_name = self.network_map.name_for(header.source);

        // Network-map gating: require attribution, with a startup grace
        // window during which unknown sources are dropped silently.
        if self.build_network_map && !is_claim && source_name.is_none() {
            if self.network_map.in_grace_window() {
                debug!(
                    pgn = header.pgn,
                    source = header.source,
                    "unknown source dropped during grace window"
                );
                return Ok(None);
            }
            debug!(
                pgn = header.pgn,
                source = header.source,
                "processing message from unknown source after grace window"
            );
        }

        // Manufacturer filters apply only once the NAME is known.
        if let Some(name) = source_name {
            let code = name.manufacturer_code();
            if self.exclude_manufacturers.contains(&code) {
                return Ok(None);
            }
            if !self.include_manufacturers.is_empty() && !self.include_manufacturers.contains(&code)
            {
                return Ok(None);
            }
        }

        let descriptor = messages::descriptor_for_payload(header.pgn, payload)
            .ok_or(DecodeError::UnknownPgn { pgn: header.pgn })?;
        let fields = engine::decode_fields(payload, descriptor)?;

        let mut message = Message {
            pgn: descriptor.pgn,
            id: descriptor.id,
            description: descriptor.description,
            fields,
            source: header.source,
            destination: header.destination,
            priority: header.priority,
            timestamp,
            ttl: descriptor.ttl,
            source_iso_name: None,
            hash: None,
        };

        // Store the claimed NAME against the source address (update, not
        // insert-only: addresses move, NAMEs do not).
        if is_claim {
            if payload.len() >= 8 {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&payload[..8]);
                self.network_map
                    .record_claim(header.source, IsoName::from_raw(u64::from_le_bytes(raw)));
            }
            if self.claim_suppressed {
                return Ok(None);
            }
        }

        // Id-level filtering, now that the id is known.
        if self.filtered_by_id(descriptor.id) {
            debug!(id = descriptor.id, "filtered by id");
            return Ok(None);
        }

        self.apply_preferred_units(&mut message);

        if let Some(name) = self.network_map.name_for(header.source) {
            message.source_iso_name = Some(name.raw());
            if self.build_network_map {
                message.hash = Some(network_map::fingerprint(&message, name));
            }
        }

        if self.dump_pgns.contains(&message.pgn) {
            if let Some(dump) = &mut self.dump {
                dump.append(&message);
            }
        }

        Ok(Some(message))
    }

    fn filtered_by_pgn(&self, pgn: u32) -> bool {
        if self.exclude_pgns.contains(&pgn) {
            return true;
        }
        !self.include_pgns.is_empty() && !self.include_pgns.contains(&pgn)
    }

    fn filtered_by_id(&self, id: &str) -> bool {
        if self.exclude_ids.contains(id) {
            return true;
        }
        !self.include_ids.is_empty() && !self.include_ids.contains(id)
    }

    //==================================================================================UNIT_PREFERENCES

    /// Convert fields whose physical quantity has a preference. Conversion
    /// keys on the current unit string, so re-applying a preference is a
    /// fixed point.
    fn apply_preferred_units(&self, message: &mut Message) {
        if self.preferred_units.is_empty() {
            return;
        }
        for field in &mut message.fields {
            let Some(quantity) = field.physical_quantities else {
                continue;
            };
            let Some(target) = self.preferred_units.get(&quantity) else {
                continue;
            };
            let Some(value) = field.value.as_f64() else {
                continue;
            };

            let converted = match (quantity, field.unit_of_measurement.as_str(), target.as_str()) {
                (PhysicalQuantity::Temperature, "K", "c" | "celsius") => {
                    Some((round_to(value - 273.15, 2), "C"))
                }
                (PhysicalQuantity::Temperature, "K", "f" | "fahrenheit") => {
                    Some((round_to((value - 273.15) * 9.0 / 5.0 + 32.0, 0), "F"))
                }
                (PhysicalQuantity::Pressure, "Pa", "bar") => Some((value / 100_000.0, "Bar")),
                (PhysicalQuantity::Pressure, "Pa", "psi") => Some((value / 6894.76, "PSI")),
                (PhysicalQuantity::Angle, "rad", "deg" | "degrees") => {
                    Some((round_to(value.to_degrees(), 0), "deg"))
                }
                (PhysicalQuantity::Speed, "m/s", "kn" | "kt" | "knots") => {
                    Some((round_to(value * 3600.0 / 1852.0, 1), "kn"))
                }
                _ => None,
            };

            if let Some((new_value, new_unit)) = converted {
                field.value = FieldValue::Float(new_value);
                field.unit_of_measurement = new_unit.to_string();
            }
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

//==================================================================================TIMESTAMPS

fn actisense_timestamp(group: &str) -> Result<DateTime<Utc>, DecodeError> {
    let body = &group[1..];
    let (seconds, millis) = body.split_once('.').ok_or(DecodeError::Framing {
        reason: "Actisense timestamp is malformed",
    })?;
    let seconds: i64 = seconds.parse().map_err(|_| DecodeError::Framing {
        reason: "Actisense timestamp seconds are not a number",
    })?;
    let millis: i64 = millis.parse().map_err(|_| DecodeError::Framing {
        reason: "Actisense timestamp milliseconds are not a number",
    })?;
    // The group is an offset relative to the capture start.
    Ok(Utc::now() + chrono::Duration::milliseconds(seconds * 1000 + millis))
}

fn basic_timestamp(text: &str) -> Result<DateTime<Utc>, DecodeError> {
    let parsed = if text.ends_with('Z') {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ")
    } else {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d-%H:%M:%S%.f")
    };
    parsed.map(|naive| naive.and_utc()).map_err(|_| {
        DecodeError::Framing {
            reason: "CSV timestamp is malformed",
        }
    })
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
