//! Static PGN catalog: descriptors and the registry keyed by PGN number.
//!
//! This module is mechanically derived from the canonical JSON catalog; the
//! generator is an external collaborator and the runtime never introspects
//! names. Proprietary PGNs (several message ids sharing one PGN) carry
//! `match_value` constants on their manufacturer/industry fields: decode
//! picks the first candidate whose match fields agree with the payload,
//! encode looks up by `(PGN, id)`.
use crate::core::{FieldDescriptor, FieldKind, FieldValue, Message, PgnDescriptor, PhysicalQuantity};
use crate::protocol::lookups::*;

//==================================================================================PGN_59904

pub static PGN_59904_ISO_REQUEST: PgnDescriptor = PgnDescriptor {
    pgn: 59904,
    id: "isoRequest",
    description: "ISO Request",
    priority: Some(6),
    fast_packet: false,
    length: 3,
    ttl: None,
    fields: &[FieldDescriptor {
        id: "pgn",
        name: "PGN",
        kind: FieldKind::Pgn,
        bit_length: 24,
        bit_offset: 0,
        ..FieldDescriptor::DEFAULT
    }],
};

//==================================================================================PGN_60928

pub static PGN_60928_ISO_ADDRESS_CLAIM: PgnDescriptor = PgnDescriptor {
    pgn: 60928,
    id: "isoAddressClaim",
    description: "ISO Address Claim",
    priority: Some(6),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "unique_number",
            name: "Unique Number",
            kind: FieldKind::Number,
            bit_length: 21,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "manufacturer_code",
            name: "Manufacturer Code",
            kind: FieldKind::Lookup,
            bit_length: 11,
            bit_offset: 21,
            lookup: Some(&MANUFACTURER_CODE),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "device_instance_lower",
            name: "Device Instance Lower",
            kind: FieldKind::Number,
            bit_length: 3,
            bit_offset: 32,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "device_instance_upper",
            name: "Device Instance Upper",
            kind: FieldKind::Number,
            bit_length: 5,
            bit_offset: 35,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "device_function",
            name: "Device Function",
            kind: FieldKind::IndirectLookup,
            bit_length: 8,
            bit_offset: 40,
            indirect_lookup: Some(&DEVICE_FUNCTION),
            indirect_control: Some("device_class"),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "spare",
            name: "Spare",
            kind: FieldKind::Spare,
            bit_length: 1,
            bit_offset: 48,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "device_class",
            name: "Device Class",
            kind: FieldKind::Lookup,
            bit_length: 7,
            bit_offset: 49,
            lookup: Some(&DEVICE_CLASS),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "system_instance",
            name: "System Instance",
            kind: FieldKind::Number,
            bit_length: 4,
            bit_offset: 56,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "industry_group",
            name: "Industry Group",
            kind: FieldKind::Lookup,
            bit_length: 3,
            bit_offset: 60,
            lookup: Some(&INDUSTRY_CODE),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "arbitrary_address_capable",
            name: "Arbitrary Address Capable",
            kind: FieldKind::Lookup,
            bit_length: 1,
            bit_offset: 63,
            lookup: Some(&YES_NO),
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_65280

pub static PGN_65280_FURUNO_HEAVE: PgnDescriptor = PgnDescriptor {
    pgn: 65280,
    id: "furunoHeave",
    description: "Furuno: Heave",
    priority: Some(7),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "manufacturer_code",
            name: "Manufacturer Code",
            kind: FieldKind::Lookup,
            bit_length: 11,
            bit_offset: 0,
            lookup: Some(&MANUFACTURER_CODE),
            match_value: Some(1855),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 2,
            bit_offset: 11,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "industry_code",
            name: "Industry Code",
            kind: FieldKind::Lookup,
            bit_length: 3,
            bit_offset: 13,
            lookup: Some(&INDUSTRY_CODE),
            match_value: Some(4),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "heave",
            name: "Heave",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 16,
            signed: true,
            resolution: 0.001,
            unit: Some("m"),
            physical_quantity: Some(PhysicalQuantity::Distance),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved_48",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 16,
            bit_offset: 48,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_126992

pub static PGN_126992_SYSTEM_TIME: PgnDescriptor = PgnDescriptor {
    pgn: 126992,
    id: "systemTime",
    description: "System Time",
    priority: Some(3),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "sid",
            name: "SID",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "source",
            name: "Source",
            kind: FieldKind::Lookup,
            bit_length: 4,
            bit_offset: 8,
            lookup: Some(&SYSTEM_TIME_SOURCE),
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 4,
            bit_offset: 12,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "date",
            name: "Date",
            kind: FieldKind::Date,
            bit_length: 16,
            bit_offset: 16,
            unit: Some("d"),
            physical_quantity: Some(PhysicalQuantity::Date),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "time",
            name: "Time",
            kind: FieldKind::Time,
            bit_length: 32,
            bit_offset: 32,
            resolution: 0.0001,
            unit: Some("s"),
            physical_quantity: Some(PhysicalQuantity::Time),
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_126996

pub static PGN_126996_PRODUCT_INFORMATION: PgnDescriptor = PgnDescriptor {
    pgn: 126996,
    id: "productInformation",
    description: "Product Information",
    priority: Some(6),
    fast_packet: true,
    length: 134,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "nmea_2000_version",
            name: "NMEA 2000 Version",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 0,
            resolution: 0.001,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "product_code",
            name: "Product Code",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 16,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "model_id",
            name: "Model ID",
            kind: FieldKind::StringFix,
            bit_length: 256,
            bit_offset: 32,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "software_version_code",
            name: "Software Version Code",
            kind: FieldKind::StringFix,
            bit_length: 256,
            bit_offset: 288,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "model_version",
            name: "Model Version",
            kind: FieldKind::StringFix,
            bit_length: 256,
            bit_offset: 544,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "model_serial_code",
            name: "Model Serial Code",
            kind: FieldKind::StringFix,
            bit_length: 256,
            bit_offset: 800,
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "certification_level",
            name: "Certification Level",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 1056,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "load_equivalency",
            name: "Load Equivalency",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 1064,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_126998

pub static PGN_126998_CONFIGURATION_INFORMATION: PgnDescriptor = PgnDescriptor {
    pgn: 126998,
    id: "configurationInformation",
    description: "Configuration Information",
    priority: Some(6),
    fast_packet: true,
    length: 6,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "installation_description_1",
            name: "Installation Description #1",
            kind: FieldKind::StringLau,
            bit_length: 0,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "installation_description_2",
            name: "Installation Description #2",
            kind: FieldKind::StringLau,
            bit_length: 0,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "manufacturer_information",
            name: "Manufacturer Information",
            kind: FieldKind::StringLau,
            bit_length: 0,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_127250

pub static PGN_127250_VESSEL_HEADING: PgnDescriptor = PgnDescriptor {
    pgn: 127250,
    id: "vesselHeading",
    description: "Vessel Heading",
    priority: Some(2),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "sid",
            name: "SID",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "heading",
            name: "Heading",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 8,
            resolution: 0.0001,
            unit: Some("rad"),
            physical_quantity: Some(PhysicalQuantity::Angle),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "deviation",
            name: "Deviation",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 24,
            signed: true,
            resolution: 0.0001,
            unit: Some("rad"),
            physical_quantity: Some(PhysicalQuantity::Angle),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "variation",
            name: "Variation",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 40,
            signed: true,
            resolution: 0.0001,
            unit: Some("rad"),
            physical_quantity: Some(PhysicalQuantity::Angle),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reference",
            name: "Reference",
            kind: FieldKind::Lookup,
            bit_length: 2,
            bit_offset: 56,
            lookup: Some(&DIRECTION_REFERENCE),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 6,
            bit_offset: 58,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_127488

pub static PGN_127488_ENGINE_PARAMETERS_RAPID: PgnDescriptor = PgnDescriptor {
    pgn: 127488,
    id: "engineParametersRapidUpdate",
    description: "Engine Parameters, Rapid Update",
    priority: Some(2),
    fast_packet: false,
    length: 8,
    ttl: Some(60),
    fields: &[
        FieldDescriptor {
            id: "instance",
            name: "Instance",
            kind: FieldKind::Lookup,
            bit_length: 8,
            bit_offset: 0,
            lookup: Some(&ENGINE_INSTANCE),
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "speed",
            name: "Speed",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 8,
            resolution: 0.25,
            unit: Some("rpm"),
            physical_quantity: Some(PhysicalQuantity::Frequency),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "boost_pressure",
            name: "Boost Pressure",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 24,
            resolution: 100.0,
            unit: Some("Pa"),
            physical_quantity: Some(PhysicalQuantity::Pressure),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "tilt_trim",
            name: "Tilt/Trim",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 40,
            signed: true,
            unit: Some("%"),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 16,
            bit_offset: 48,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_127489

pub static PGN_127489_ENGINE_PARAMETERS_DYNAMIC: PgnDescriptor = PgnDescriptor {
    pgn: 127489,
    id: "engineParametersDynamic",
    description: "Engine Parameters, Dynamic",
    priority: Some(2),
    fast_packet: true,
    length: 26,
    ttl: Some(60),
    fields: &[
        FieldDescriptor {
            id: "instance",
            name: "Instance",
            kind: FieldKind::Lookup,
            bit_length: 8,
            bit_offset: 0,
            lookup: Some(&ENGINE_INSTANCE),
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "oil_pressure",
            name: "Oil pressure",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 8,
            resolution: 100.0,
            unit: Some("Pa"),
            physical_quantity: Some(PhysicalQuantity::Pressure),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "oil_temperature",
            name: "Oil temperature",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 24,
            resolution: 0.1,
            unit: Some("K"),
            physical_quantity: Some(PhysicalQuantity::Temperature),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "temperature",
            name: "Temperature",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 40,
            resolution: 0.01,
            unit: Some("K"),
            physical_quantity: Some(PhysicalQuantity::Temperature),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "alternator_potential",
            name: "Alternator Potential",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 56,
            signed: true,
            resolution: 0.01,
            unit: Some("V"),
            physical_quantity: Some(PhysicalQuantity::PotentialDifference),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "fuel_rate",
            name: "Fuel Rate",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 72,
            signed: true,
            resolution: 0.1,
            unit: Some("L/h"),
            physical_quantity: Some(PhysicalQuantity::VolumetricFlow),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "total_engine_hours",
            name: "Total Engine hours",
            kind: FieldKind::Duration,
            bit_length: 32,
            bit_offset: 88,
            unit: Some("s"),
            physical_quantity: Some(PhysicalQuantity::Duration),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "coolant_pressure",
            name: "Coolant Pressure",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 120,
            resolution: 100.0,
            unit: Some("Pa"),
            physical_quantity: Some(PhysicalQuantity::Pressure),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "fuel_pressure",
            name: "Fuel Pressure",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 136,
            resolution: 1000.0,
            unit: Some("Pa"),
            physical_quantity: Some(PhysicalQuantity::Pressure),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 8,
            bit_offset: 152,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "discrete_status_1",
            name: "Discrete Status 1",
            kind: FieldKind::BitLookup,
            bit_length: 16,
            bit_offset: 160,
            bit_lookup: Some(&ENGINE_STATUS_1),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "discrete_status_2",
            name: "Discrete Status 2",
            kind: FieldKind::BitLookup,
            bit_length: 16,
            bit_offset: 176,
            bit_lookup: Some(&ENGINE_STATUS_2),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "engine_load",
            name: "Engine Load",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 192,
            signed: true,
            unit: Some("%"),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "engine_torque",
            name: "Engine Torque",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 200,
            signed: true,
            unit: Some("%"),
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_128267

pub static PGN_128267_WATER_DEPTH: PgnDescriptor = PgnDescriptor {
    pgn: 128267,
    id: "waterDepth",
    description: "Water Depth",
    priority: Some(3),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "sid",
            name: "SID",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "depth",
            name: "Depth",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 8,
            resolution: 0.01,
            unit: Some("m"),
            physical_quantity: Some(PhysicalQuantity::Distance),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "offset",
            name: "Offset",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 40,
            signed: true,
            resolution: 0.001,
            unit: Some("m"),
            physical_quantity: Some(PhysicalQuantity::Distance),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "range",
            name: "Range",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 56,
            resolution: 10.0,
            unit: Some("m"),
            physical_quantity: Some(PhysicalQuantity::Distance),
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_129025

pub static PGN_129025_POSITION_RAPID_UPDATE: PgnDescriptor = PgnDescriptor {
    pgn: 129025,
    id: "positionRapidUpdate",
    description: "Position, Rapid Update",
    priority: Some(2),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "latitude",
            name: "Latitude",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 0,
            signed: true,
            resolution: 1e-7,
            unit: Some("deg"),
            physical_quantity: Some(PhysicalQuantity::GeographicalLatitude),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "longitude",
            name: "Longitude",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 32,
            signed: true,
            resolution: 1e-7,
            unit: Some("deg"),
            physical_quantity: Some(PhysicalQuantity::GeographicalLongitude),
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_129026

pub static PGN_129026_COG_SOG_RAPID_UPDATE: PgnDescriptor = PgnDescriptor {
    pgn: 129026,
    id: "cogSogRapidUpdate",
    description: "COG & SOG, Rapid Update",
    priority: Some(2),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "sid",
            name: "SID",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "cog_reference",
            name: "COG Reference",
            kind: FieldKind::Lookup,
            bit_length: 2,
            bit_offset: 8,
            lookup: Some(&DIRECTION_REFERENCE),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 6,
            bit_offset: 10,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "cog",
            name: "COG",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 16,
            resolution: 0.0001,
            unit: Some("rad"),
            physical_quantity: Some(PhysicalQuantity::Angle),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "sog",
            name: "SOG",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 32,
            resolution: 0.01,
            unit: Some("m/s"),
            physical_quantity: Some(PhysicalQuantity::Speed),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved_48",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 16,
            bit_offset: 48,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_130306

pub static PGN_130306_WIND_DATA: PgnDescriptor = PgnDescriptor {
    pgn: 130306,
    id: "windData",
    description: "Wind Data",
    priority: Some(2),
    fast_packet: false,
    length: 8,
    ttl: Some(30),
    fields: &[
        FieldDescriptor {
            id: "sid",
            name: "SID",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "wind_speed",
            name: "Wind Speed",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 8,
            resolution: 0.01,
            unit: Some("m/s"),
            physical_quantity: Some(PhysicalQuantity::Speed),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "wind_angle",
            name: "Wind Angle",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 24,
            resolution: 0.0001,
            unit: Some("rad"),
            physical_quantity: Some(PhysicalQuantity::Angle),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reference",
            name: "Reference",
            kind: FieldKind::Lookup,
            bit_length: 3,
            bit_offset: 40,
            lookup: Some(&WIND_REFERENCE),
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 21,
            bit_offset: 43,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_130312

pub static PGN_130312_TEMPERATURE: PgnDescriptor = PgnDescriptor {
    pgn: 130312,
    id: "temperature",
    description: "Temperature",
    priority: Some(5),
    fast_packet: false,
    length: 8,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "sid",
            name: "SID",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 0,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "instance",
            name: "Instance",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 8,
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "source",
            name: "Source",
            kind: FieldKind::Lookup,
            bit_length: 8,
            bit_offset: 16,
            lookup: Some(&TEMPERATURE_SOURCE),
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "actual_temperature",
            name: "Actual Temperature",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 24,
            resolution: 0.01,
            unit: Some("K"),
            physical_quantity: Some(PhysicalQuantity::Temperature),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "set_temperature",
            name: "Set Temperature",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 40,
            resolution: 0.01,
            unit: Some("K"),
            physical_quantity: Some(PhysicalQuantity::Temperature),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 8,
            bit_offset: 56,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================PGN_130842

pub static PGN_130842_FURUNO_SIX_DOF: PgnDescriptor = PgnDescriptor {
    pgn: 130842,
    id: "furunoSixDegreesOfFreedomMovement",
    description: "Furuno: Six Degrees Of Freedom Movement",
    priority: Some(7),
    fast_packet: true,
    length: 29,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "manufacturer_code",
            name: "Manufacturer Code",
            kind: FieldKind::Lookup,
            bit_length: 11,
            bit_offset: 0,
            lookup: Some(&MANUFACTURER_CODE),
            match_value: Some(1855),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 2,
            bit_offset: 11,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "industry_code",
            name: "Industry Code",
            kind: FieldKind::Lookup,
            bit_length: 3,
            bit_offset: 13,
            lookup: Some(&INDUSTRY_CODE),
            match_value: Some(4),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "a",
            name: "A",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 16,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "b",
            name: "B",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 48,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "c",
            name: "C",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 80,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "d",
            name: "D",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 112,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "e",
            name: "E",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 120,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "f",
            name: "F",
            kind: FieldKind::Number,
            bit_length: 32,
            bit_offset: 152,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "g",
            name: "G",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 184,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "h",
            name: "H",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 200,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "i",
            name: "I",
            kind: FieldKind::Number,
            bit_length: 16,
            bit_offset: 216,
            signed: true,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

pub static PGN_130842_SIMNET_AIS_CLASS_B_STATIC_A: PgnDescriptor = PgnDescriptor {
    pgn: 130842,
    id: "simnetAisClassBStaticDataMsg24PartA",
    description: "Simnet: AIS Class B static data (msg 24 Part A)",
    priority: Some(6),
    fast_packet: true,
    length: 29,
    ttl: None,
    fields: &[
        FieldDescriptor {
            id: "manufacturer_code",
            name: "Manufacturer Code",
            kind: FieldKind::Lookup,
            bit_length: 11,
            bit_offset: 0,
            lookup: Some(&MANUFACTURER_CODE),
            match_value: Some(1857),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "reserved",
            name: "Reserved",
            kind: FieldKind::Reserved,
            bit_length: 2,
            bit_offset: 11,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "industry_code",
            name: "Industry Code",
            kind: FieldKind::Lookup,
            bit_length: 3,
            bit_offset: 13,
            lookup: Some(&INDUSTRY_CODE),
            match_value: Some(4),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "message_id",
            name: "Message ID",
            kind: FieldKind::Number,
            bit_length: 6,
            bit_offset: 16,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "repeat_indicator",
            name: "Repeat Indicator",
            kind: FieldKind::Lookup,
            bit_length: 2,
            bit_offset: 22,
            lookup: Some(&REPEAT_INDICATOR),
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "d",
            name: "D",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 24,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "e",
            name: "E",
            kind: FieldKind::Number,
            bit_length: 8,
            bit_offset: 32,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "user_id",
            name: "User ID",
            kind: FieldKind::Mmsi,
            bit_length: 32,
            bit_offset: 40,
            part_of_primary_key: true,
            ..FieldDescriptor::DEFAULT
        },
        FieldDescriptor {
            id: "name",
            name: "Name",
            kind: FieldKind::StringFix,
            bit_length: 160,
            bit_offset: 72,
            ..FieldDescriptor::DEFAULT
        },
    ],
};

//==================================================================================REGISTRY

/// Registry keyed by PGN, ascending; proprietary PGNs list every candidate.
static PGN_REGISTRY: &[(u32, &[&PgnDescriptor])] = &[
    (59904, &[&PGN_59904_ISO_REQUEST]),
    (60928, &[&PGN_60928_ISO_ADDRESS_CLAIM]),
    (65280, &[&PGN_65280_FURUNO_HEAVE]),
    (126992, &[&PGN_126992_SYSTEM_TIME]),
    (126996, &[&PGN_126996_PRODUCT_INFORMATION]),
    (126998, &[&PGN_126998_CONFIGURATION_INFORMATION]),
    (127250, &[&PGN_127250_VESSEL_HEADING]),
    (127488, &[&PGN_127488_ENGINE_PARAMETERS_RAPID]),
    (127489, &[&PGN_127489_ENGINE_PARAMETERS_DYNAMIC]),
    (128267, &[&PGN_128267_WATER_DEPTH]),
    (129025, &[&PGN_129025_POSITION_RAPID_UPDATE]),
    (129026, &[&PGN_129026_COG_SOG_RAPID_UPDATE]),
    (130306, &[&PGN_130306_WIND_DATA]),
    (130312, &[&PGN_130312_TEMPERATURE]),
    (
        130842,
        &[
            &PGN_130842_FURUNO_SIX_DOF,
            &PGN_130842_SIMNET_AIS_CLASS_B_STATIC_A,
        ],
    ),
];

/// All catalog candidates for a PGN (several for proprietary PGNs).
pub fn candidates(pgn: u32) -> Option<&'static [&'static PgnDescriptor]> {
    PGN_REGISTRY
        .binary_search_by_key(&pgn, |(p, _)| *p)
        .ok()
        .map(|idx| PGN_REGISTRY[idx].1)
}

/// Whether the PGN uses Fast Packet framing. `None` when the PGN is unknown.
pub fn is_fast_packet(pgn: u32) -> Option<bool> {
    candidates(pgn).map(|list| list[0].fast_packet)
}

/// Resolve the descriptor for a received payload: the first candidate whose
/// discriminator fields all match wins; a PGN with a single candidate wins
/// by default.
pub fn descriptor_for_payload(pgn: u32, payload: &[u8]) -> Option<&'static PgnDescriptor> {
    let list = candidates(pgn)?;
    if list.len() == 1 {
        return Some(list[0]);
    }
    list.iter()
        .find(|descriptor| {
            descriptor.fields.iter().all(|fd| match fd.match_value {
                Some(expected) => {
                    extract_bits(payload, fd.bit_offset, fd.bit_length) == Some(expected as u64)
                }
                None => true,
            })
        })
        .copied()
        .or(Some(list[0]))
}

/// Resolve the descriptor for an outgoing message by `(PGN, id)`.
pub fn descriptor_by_id(pgn: u32, id: &str) -> Option<&'static PgnDescriptor> {
    let list = candidates(pgn)?;
    if list.len() == 1 {
        return Some(list[0]);
    }
    list.iter().find(|descriptor| descriptor.id == id).copied()
}

/// Little-endian bit extraction used by the discriminator check.
fn extract_bits(payload: &[u8], bit_offset: u32, bit_length: u32) -> Option<u64> {
    if bit_length == 0 || bit_length > 64 {
        return None;
    }
    let end = (bit_offset + bit_length) as usize;
    if end > payload.len() * 8 {
        return None;
    }
    let mut value: u64 = 0;
    for i in 0..bit_length {
        let bit = (bit_offset + i) as usize;
        if payload[bit / 8] >> (bit % 8) & 1 == 1 {
            value |= 1 << i;
        }
    }
    Some(value)
}

//==================================================================================HELPERS

/// Build an ISO Request (PGN 59904) asking every node for `requested_pgn`.
/// Used by the network-map seeding sequence.
pub fn iso_request(requested_pgn: u32) -> Message {
    let mut message = Message::from_descriptor(&PGN_59904_ISO_REQUEST);
    message.source = 0;
    message.destination = 255;
    if let Some(field) = message.field_mut("pgn") {
        field.value = FieldValue::Uint(requested_pgn as u64);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_sorted() {
        for pair in PGN_REGISTRY.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn lookup_by_pgn() {
        assert_eq!(candidates(60928).unwrap()[0].id, "isoAddressClaim");
        assert!(candidates(12345).is_none());
        assert_eq!(is_fast_packet(130842), Some(true));
        assert_eq!(is_fast_packet(65280), Some(false));
    }

    #[test]
    fn proprietary_discrimination() {
        // Furuno: manufacturer 1855, industry 4 in the first two bytes.
        let furuno = [0x3F, 0x9F, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            descriptor_for_payload(130842, &furuno).unwrap().id,
            "furunoSixDegreesOfFreedomMovement"
        );
        // Simrad: manufacturer 1857 = 0x741 -> low bytes 0x41, 0x9F.
        let simnet = [0x41, 0x9F, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            descriptor_for_payload(130842, &simnet).unwrap().id,
            "simnetAisClassBStaticDataMsg24PartA"
        );
    }

    #[test]
    fn encode_side_lookup() {
        assert_eq!(
            descriptor_by_id(130842, "simnetAisClassBStaticDataMsg24PartA")
                .unwrap()
                .description,
            "Simnet: AIS Class B static data (msg 24 Part A)"
        );
        assert!(descriptor_by_id(130842, "unknownId").is_none());
    }

    #[test]
    fn iso_request_shape() {
        let message = iso_request(60928);
        assert_eq!(message.pgn, 59904);
        assert_eq!(message.destination, 255);
        assert_eq!(
            message.field_value("pgn"),
            Some(&FieldValue::Uint(60928))
        );
    }
}
