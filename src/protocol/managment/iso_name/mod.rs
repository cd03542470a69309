//! Device identity on an NMEA 2000 segment.
//!
//! Every node broadcasts a 64-bit NAME through PGN 60928 (ISO Address
//! Claim). The NAME is the canonical identity used for attribution: source
//! addresses are transient and may be re-negotiated, the NAME never changes.
//! [`IsoName`] wraps the raw integer; [`NameFields`] is its decomposed form,
//! assembled fallibly because most components are narrower than their Rust
//! type.
use crate::error::IsoNameError;
use crate::protocol::lookups::{DEVICE_CLASS, INDUSTRY_CODE, MANUFACTURER_CODE};
use serde::Serialize;
use std::fmt;

/// One component slot inside the 64-bit NAME.
struct Slot {
    component: &'static str,
    shift: u32,
    width: u32,
}

impl Slot {
    const fn mask(&self) -> u64 {
        (1u64 << self.width) - 1
    }

    fn get(&self, raw: u64) -> u64 {
        (raw >> self.shift) & self.mask()
    }

    fn put(&self, raw: u64, value: u64) -> Result<u64, IsoNameError> {
        if value > self.mask() {
            return Err(IsoNameError::ComponentTooWide {
                component: self.component,
                bits: self.width,
                value,
            });
        }
        Ok((raw & !(self.mask() << self.shift)) | (value << self.shift))
    }
}

// Wire layout of the NAME, least significant bits first. The device
// instance occupies one contiguous byte even though the claim layout labels
// it as a 3-bit lower part and a 5-bit upper part. Bit 48 is reserved.
const UNIQUE_NUMBER: Slot = Slot {
    component: "unique number",
    shift: 0,
    width: 21,
};
const MANUFACTURER: Slot = Slot {
    component: "manufacturer code",
    shift: 21,
    width: 11,
};
const DEVICE_INSTANCE: Slot = Slot {
    component: "device instance",
    shift: 32,
    width: 8,
};
const DEVICE_FUNCTION: Slot = Slot {
    component: "device function",
    shift: 40,
    width: 8,
};
const CLASS: Slot = Slot {
    component: "device class",
    shift: 49,
    width: 7,
};
const SYSTEM_INSTANCE: Slot = Slot {
    component: "system instance",
    shift: 56,
    width: 4,
};
const INDUSTRY_GROUP: Slot = Slot {
    component: "industry group",
    shift: 60,
    width: 3,
};
const ADDRESS_CAPABLE: Slot = Slot {
    component: "arbitrary address capable",
    shift: 63,
    width: 1,
};

//==================================================================================ISO_NAME

/// A 64-bit ISO NAME.
///
/// # Example
///
/// ```
/// use marebus::protocol::managment::iso_name::{IsoName, NameFields};
///
/// let name = IsoName::try_from(NameFields {
///     unique_number: 123_456,
///     manufacturer_code: 273, // Actisense
///     device_function: 130,
///     device_class: 25,
///     arbitrary_address_capable: true,
///     ..NameFields::default()
/// })
/// .unwrap();
///
/// assert_eq!(name.unique_number(), 123_456);
/// assert_eq!(name.manufacturer(), Some("Actisense"));
/// assert!(name.is_arbitrary_address_capable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct IsoName(u64);

impl IsoName {
    /// Wrap a raw NAME, e.g. the first eight payload bytes of an address
    /// claim read little-endian.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The canonical 64-bit identity.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Product serial within the manufacturer's range (21 bits).
    pub fn unique_number(&self) -> u32 {
        UNIQUE_NUMBER.get(self.0) as u32
    }

    /// Registered manufacturer code (11 bits).
    pub fn manufacturer_code(&self) -> u16 {
        MANUFACTURER.get(self.0) as u16
    }

    /// Instance of this device in an installation with several of them.
    /// One byte on the wire; the claim layout splits it 3 + 5.
    pub fn device_instance(&self) -> u8 {
        DEVICE_INSTANCE.get(self.0) as u8
    }

    /// Low 3 bits of the device instance, as laid out in the claim.
    pub fn device_instance_lower(&self) -> u8 {
        self.device_instance() & 0x07
    }

    /// High 5 bits of the device instance, as laid out in the claim.
    pub fn device_instance_upper(&self) -> u8 {
        self.device_instance() >> 3
    }

    /// What the device does, within its class (8 bits).
    pub fn device_function(&self) -> u8 {
        DEVICE_FUNCTION.get(self.0) as u8
    }

    /// Broad equipment category (7 bits).
    pub fn device_class(&self) -> u8 {
        CLASS.get(self.0) as u8
    }

    /// Instance of the whole system this device belongs to (4 bits).
    pub fn system_instance(&self) -> u8 {
        SYSTEM_INSTANCE.get(self.0) as u8
    }

    /// Industry the device is certified for (3 bits; marine is group 4).
    pub fn industry_group(&self) -> u8 {
        INDUSTRY_GROUP.get(self.0) as u8
    }

    /// Whether the device may pick another address when its claim loses.
    pub fn is_arbitrary_address_capable(&self) -> bool {
        ADDRESS_CAPABLE.get(self.0) != 0
    }

    // Lookup-resolved views, used by the enrichment pipeline and logging.

    /// Manufacturer label, when the code is in the shipped catalog subset.
    pub fn manufacturer(&self) -> Option<&'static str> {
        MANUFACTURER_CODE.label(self.manufacturer_code() as u32)
    }

    /// Industry label ("Marine" for group 4).
    pub fn industry(&self) -> Option<&'static str> {
        INDUSTRY_CODE.label(self.industry_group() as u32)
    }

    /// Device class label.
    pub fn class(&self) -> Option<&'static str> {
        DEVICE_CLASS.label(self.device_class() as u32)
    }

    /// Decompose into the component view.
    pub fn fields(&self) -> NameFields {
        NameFields {
            unique_number: self.unique_number(),
            manufacturer_code: self.manufacturer_code(),
            device_instance: self.device_instance(),
            device_function: self.device_function(),
            device_class: self.device_class(),
            system_instance: self.system_instance(),
            industry_group: self.industry_group(),
            arbitrary_address_capable: self.is_arbitrary_address_capable(),
        }
    }
}

impl From<u64> for IsoName {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<IsoName> for u64 {
    fn from(name: IsoName) -> Self {
        name.0
    }
}

impl fmt::Display for IsoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.manufacturer() {
            Some(maker) => write!(f, "{:016X} ({maker} unit {})", self.0, self.unique_number()),
            None => write!(
                f,
                "{:016X} (manufacturer {} unit {})",
                self.0,
                self.manufacturer_code(),
                self.unique_number()
            ),
        }
    }
}

//==================================================================================NAME_FIELDS

/// Component view of a NAME. Assembling one validates each component
/// against its wire width; the reserved bit 48 stays clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameFields {
    pub unique_number: u32,
    pub manufacturer_code: u16,
    /// Full byte; split 3 + 5 on the wire.
    pub device_instance: u8,
    pub device_function: u8,
    pub device_class: u8,
    pub system_instance: u8,
    pub industry_group: u8,
    pub arbitrary_address_capable: bool,
}

impl TryFrom<NameFields> for IsoName {
    type Error = IsoNameError;

    fn try_from(fields: NameFields) -> Result<Self, IsoNameError> {
        let mut raw = 0u64;
        raw = UNIQUE_NUMBER.put(raw, fields.unique_number as u64)?;
        raw = MANUFACTURER.put(raw, fields.manufacturer_code as u64)?;
        raw = DEVICE_INSTANCE.put(raw, fields.device_instance as u64)?;
        raw = DEVICE_FUNCTION.put(raw, fields.device_function as u64)?;
        raw = CLASS.put(raw, fields.device_class as u64)?;
        raw = SYSTEM_INSTANCE.put(raw, fields.system_instance as u64)?;
        raw = INDUSTRY_GROUP.put(raw, fields.industry_group as u64)?;
        raw = ADDRESS_CAPABLE.put(raw, fields.arbitrary_address_capable as u64)?;
        Ok(IsoName(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marine_sensor() -> NameFields {
        NameFields {
            unique_number: 0x1ABCD,
            manufacturer_code: 137, // Maretron
            device_instance: 0xAB,
            device_function: 130,
            device_class: 75,
            system_instance: 9,
            industry_group: 4,
            arbitrary_address_capable: true,
        }
    }

    #[test]
    fn components_round_trip_through_the_raw_name() {
        let fields = marine_sensor();
        let name = IsoName::try_from(fields).unwrap();
        assert_eq!(name.fields(), fields);

        let reread = IsoName::from_raw(name.raw());
        assert_eq!(reread, name);
        assert_eq!(reread.unique_number(), 0x1ABCD);
        assert_eq!(reread.manufacturer_code(), 137);
        assert_eq!(reread.system_instance(), 9);
        assert!(reread.is_arbitrary_address_capable());
    }

    #[test]
    fn instance_byte_matches_the_claim_split() {
        let name = IsoName::try_from(NameFields {
            device_instance: 0xAB,
            ..NameFields::default()
        })
        .unwrap();
        assert_eq!(name.device_instance(), 0xAB);
        assert_eq!(name.device_instance_lower(), 0xAB & 0x07);
        assert_eq!(name.device_instance_upper(), 0xAB >> 3);
    }

    #[test]
    fn oversized_components_are_refused() {
        let result = IsoName::try_from(NameFields {
            unique_number: 1 << 21,
            ..NameFields::default()
        });
        assert_eq!(
            result,
            Err(IsoNameError::ComponentTooWide {
                component: "unique number",
                bits: 21,
                value: 1 << 21,
            })
        );

        let result = IsoName::try_from(NameFields {
            device_class: 0x80,
            ..NameFields::default()
        });
        assert!(matches!(
            result,
            Err(IsoNameError::ComponentTooWide {
                component: "device class",
                ..
            })
        ));

        let result = IsoName::try_from(NameFields {
            industry_group: 8,
            ..NameFields::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn address_capable_is_the_top_bit() {
        let capable = IsoName::try_from(NameFields {
            arbitrary_address_capable: true,
            ..NameFields::default()
        })
        .unwrap();
        assert_eq!(capable.raw() >> 63, 1);

        let fixed = IsoName::try_from(NameFields::default()).unwrap();
        assert_eq!(fixed.raw() >> 63, 0);
    }

    #[test]
    fn navico_capture_resolves_labels() {
        // NAME carried by the capture fb 9b 70 22 00 9b 50 c0 (wire order).
        let raw = u64::from_le_bytes([0xFB, 0x9B, 0x70, 0x22, 0x00, 0x9B, 0x50, 0xC0]);
        let name = IsoName::from_raw(raw);
        assert_eq!(name.manufacturer_code(), 275);
        assert_eq!(name.manufacturer(), Some("Navico"));
        assert_eq!(name.industry(), Some("Marine"));
        assert!(name.is_arbitrary_address_capable());
    }
}
