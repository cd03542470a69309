//! Observed network map: the source-address → NAME table built from ISO
//! address claims, the startup grace window, and the stream fingerprint.
//!
//! The client only observes claims; it never claims an address of its own.
//! Addresses are transient on an NMEA 2000 segment, NAMEs are not, so the
//! table always keys attribution on the NAME and simply tracks which address
//! currently fronts it.
use crate::core::{FieldValue, Message};
use crate::protocol::managment::iso_name::IsoName;
use md5::{Digest, Md5};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default grace window: during the first minutes after startup the segment
/// is still being enumerated, so messages from sources without a known NAME
/// are dropped silently instead of being emitted unattributed.
pub const DEFAULT_GRACE_WINDOW: Duration = Duration::from_secs(600);

#[derive(Debug)]
pub struct NetworkMap {
    addresses: HashMap<u8, IsoName>,
    started_at: Instant,
    grace_window: Duration,
}

impl NetworkMap {
    pub fn new(grace_window: Duration) -> Self {
        Self {
            addresses: HashMap::new(),
            started_at: Instant::now(),
            grace_window,
        }
    }

    /// Record (or update) the NAME claimed at `source`. Two successive
    /// claims from the same NAME at different addresses simply move the
    /// attribution to the new address.
    pub fn record_claim(&mut self, source: u8, name: IsoName) {
        if let Some(previous) = self.addresses.insert(source, name) {
            if previous != name {
                debug!(source, %name, "address re-claimed by a different NAME");
            }
        }
    }

    /// NAME currently fronted by `source`, when known.
    pub fn name_for(&self, source: u8) -> Option<IsoName> {
        self.addresses.get(&source).copied()
    }

    /// Whether the startup grace window is still open.
    pub fn in_grace_window(&self) -> bool {
        self.started_at.elapsed() < self.grace_window
    }

    /// Number of known devices (diagnostics).
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl Default for NetworkMap {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_WINDOW)
    }
}

//==================================================================================FINGERPRINT

/// Stable 128-bit identity of a logical data stream within a fleet:
/// `md5(id ++ "_" ++ raw NAME ++ ("_" ++ primary-key raw value)*)`,
/// hex-encoded. Not security-sensitive.
pub fn fingerprint(message: &Message, name: IsoName) -> String {
    let mut hasher = Md5::new();
    hasher.update(message.id.as_bytes());
    hasher.update(b"_");
    hasher.update(name.raw().to_string().as_bytes());
    for field in message.fields.iter().filter(|f| f.part_of_primary_key) {
        hasher.update(b"_");
        hasher.update(raw_value_text(&field.raw_value).as_bytes());
    }
    hex::encode(hasher.finalize())
}

fn raw_value_text(raw: &FieldValue) -> String {
    match raw {
        FieldValue::Uint(v) => v.to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Bytes(bytes) => hex::encode(bytes),
        FieldValue::Str(text) => text.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::PGN_130312_TEMPERATURE;

    fn sample_message(instance: u64, source_value: u64) -> Message {
        let mut message = Message::from_descriptor(&PGN_130312_TEMPERATURE);
        if let Some(field) = message.field_mut("instance") {
            field.raw_value = FieldValue::Uint(instance);
        }
        if let Some(field) = message.field_mut("source") {
            field.raw_value = FieldValue::Uint(source_value);
        }
        message
    }

    #[test]
    fn claims_update_not_insert_only() {
        let mut map = NetworkMap::default();
        let name = IsoName::from_raw(0xC050_9B00_2270_9BFB);
        map.record_claim(5, name);
        assert_eq!(map.name_for(5), Some(name));

        // Same NAME moves to a new address.
        map.record_claim(9, name);
        assert_eq!(map.name_for(9), Some(name));

        // A different NAME takes over the old address.
        let other = IsoName::from_raw(0x8000_0000_0000_0001);
        map.record_claim(5, other);
        assert_eq!(map.name_for(5), Some(other));
    }

    #[test]
    fn grace_window_expires() {
        let map = NetworkMap::new(Duration::from_secs(0));
        assert!(!map.in_grace_window());
        let map = NetworkMap::new(Duration::from_secs(3600));
        assert!(map.in_grace_window());
    }

    #[test]
    fn fingerprint_stability() {
        let name = IsoName::from_raw(42);
        let a = fingerprint(&sample_message(1, 3), name);
        let b = fingerprint(&sample_message(1, 3), name);
        let c = fingerprint(&sample_message(2, 3), name);
        let d = fingerprint(&sample_message(1, 3), IsoName::from_raw(43));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a.len(), 32);
    }
}
