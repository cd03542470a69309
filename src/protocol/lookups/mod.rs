//! Lookup enumerations referenced by the PGN catalog.
//!
//! This module mirrors the `LookupEnumeration` blocks of the canonical JSON
//! catalog. Entries are `(value, label, description)` triples; the
//! description carries the long form when the catalog distinguishes one.
//! The external catalog generator owns the complete set; the tables below
//! cover the enumerations referenced by the shipped descriptors (the
//! manufacturer list is the commonly seen subset).
use crate::core::{BitLookupTable, IndirectLookupTable, LookupTable};

//==================================================================================MANUFACTURER_CODE

pub static MANUFACTURER_CODE: LookupTable = LookupTable {
    name: "MANUFACTURER_CODE",
    entries: &[
        (69, "ARKS Enterprises, Inc.", "ARKS Enterprises, Inc."),
        (78, "FW Murphy/Enovation Controls", "FW Murphy/Enovation Controls"),
        (80, "Twin Disc", "Twin Disc"),
        (85, "Kohler Power Systems", "Kohler Power Systems"),
        (88, "Hemisphere GPS Inc", "Hemisphere GPS Inc"),
        (116, "BEP Marine", "BEP Marine"),
        (135, "Airmar", "Airmar"),
        (137, "Maretron", "Maretron"),
        (140, "Lowrance", "Lowrance"),
        (144, "Mercury Marine", "Mercury Marine"),
        (147, "Nautibus Electronic GmbH", "Nautibus Electronic GmbH"),
        (148, "Blue Water Data", "Blue Water Data"),
        (154, "Westerbeke", "Westerbeke"),
        (161, "Offshore Systems (UK) Ltd.", "Offshore Systems (UK) Ltd."),
        (163, "Evinrude/BRP", "Evinrude/BRP"),
        (165, "CPAC Systems AB", "CPAC Systems AB"),
        (168, "Xantrex Technology Inc.", "Xantrex Technology Inc."),
        (172, "Yanmar Marine", "Yanmar Marine"),
        (174, "Volvo Penta", "Volvo Penta"),
        (175, "Honda Marine", "Honda Marine"),
        (176, "Carling Technologies Inc. (Moritz Aerospace)", "Carling Technologies Inc. (Moritz Aerospace)"),
        (229, "Garmin", "Garmin"),
        (257, "Honda Motor Company LTD", "Honda Motor Company LTD"),
        (272, "Groco", "Groco"),
        (273, "Actisense", "Actisense"),
        (274, "Amphenol LTW Technology", "Amphenol LTW Technology"),
        (275, "Navico", "Navico"),
        (304, "Empir Bus", "Empir Bus"),
        (311, "Fischer Panda", "Fischer Panda"),
        (355, "IMTRA", "IMTRA"),
        (358, "Victron Energy", "Victron Energy"),
        (378, "12 Volt Technology", "12 Volt Technology"),
        (381, "B & G", "B & G"),
        (419, "Fusion Electronics", "Fusion Electronics"),
        (421, "Standard Horizon", "Standard Horizon"),
        (422, "True Heading AB", "True Heading AB"),
        (437, "Digital Yacht", "Digital Yacht"),
        (440, "Cummins", "Cummins"),
        (451, "Thrane and Thrane", "Thrane and Thrane"),
        (459, "Humminbird Marine Electronics", "Humminbird Marine Electronics"),
        (502, "NoLand Engineering", "NoLand Engineering"),
        (717, "Yacht Devices", "Yacht Devices"),
        (1851, "Raymarine", "Raymarine"),
        (1855, "Furuno", "Furuno"),
        (1857, "Simrad", "Simrad"),
        (1862, "Teleflex Marine (SeaStar Solutions)", "Teleflex Marine (SeaStar Solutions)"),
        (1863, "San Jose Technology", "San Jose Technology"),
    ],
};

//==================================================================================INDUSTRY_CODE

pub static INDUSTRY_CODE: LookupTable = LookupTable {
    name: "INDUSTRY_CODE",
    entries: &[
        (0, "Global", "Global Industry"),
        (1, "Highway", "Highway Industry"),
        (2, "Agriculture", "Agriculture Industry"),
        (3, "Construction", "Construction Industry"),
        (4, "Marine", "Marine Industry"),
        (5, "Industrial", "Industrial Industry"),
    ],
};

//==================================================================================YES_NO

pub static YES_NO: LookupTable = LookupTable {
    name: "YES_NO",
    entries: &[(0, "No", "No"), (1, "Yes", "Yes")],
};

//==================================================================================DEVICE_CLASS

pub static DEVICE_CLASS: LookupTable = LookupTable {
    name: "DEVICE_CLASS",
    entries: &[
        (0, "Reserved for 2000 Use", "Reserved for 2000 Use"),
        (10, "System tools", "System tools"),
        (20, "Safety systems", "Safety systems"),
        (25, "Internetwork device", "Internetwork device"),
        (30, "Electrical Distribution", "Electrical Distribution"),
        (35, "Electrical Generation", "Electrical Generation"),
        (40, "Steering and Control surfaces", "Steering and Control surfaces"),
        (50, "Propulsion", "Propulsion"),
        (60, "Navigation", "Navigation"),
        (70, "Communication", "Communication"),
        (75, "Sensor Communication Interface", "Sensor Communication Interface"),
        (80, "Instrumentation/general systems", "Instrumentation/general systems"),
        (85, "External Environment", "External Environment"),
        (90, "Internal Environment", "Internal Environment"),
        (100, "Deck + cargo + fishing equipment systems", "Deck + cargo + fishing equipment systems"),
        (110, "Human Interface", "Human Interface"),
        (120, "Display", "Display"),
        (125, "Entertainment", "Entertainment"),
    ],
};

//==================================================================================DEVICE_FUNCTION

/// Device function meanings depend on the device class (indirect lookup).
pub static DEVICE_FUNCTION: IndirectLookupTable = IndirectLookupTable {
    name: "DEVICE_FUNCTION",
    entries: &[
        (10, 130, "Diagnostic"),
        (10, 140, "Bus Traffic Logger"),
        (20, 110, "Alarm Enunciator"),
        (20, 130, "Emergency Position Indicating Radio Beacon (EPIRB)"),
        (20, 135, "Man Overboard"),
        (25, 130, "PC Gateway"),
        (25, 131, "NMEA 2000 to Analog Gateway"),
        (25, 132, "Analog to NMEA 2000 Gateway"),
        (25, 135, "NMEA 0183 Gateway"),
        (25, 140, "Router"),
        (25, 150, "Bridge"),
        (25, 160, "Repeater"),
        (30, 130, "Binary Event Monitor"),
        (30, 140, "Load Controller"),
        (35, 140, "Engine"),
        (35, 141, "DC Generator/Alternator"),
        (35, 145, "Solar Panel (Solar Array)"),
        (40, 130, "Follow-up Controller"),
        (40, 140, "Mode Controller"),
        (40, 150, "Autopilot"),
        (40, 155, "Rudder"),
        (50, 130, "Engineroom monitoring"),
        (50, 140, "Engine"),
        (50, 141, "DC Generator/Alternator"),
        (50, 150, "Engine Gateway"),
        (50, 160, "Propulsion Control"),
        (60, 130, "Bottom Depth"),
        (60, 135, "Bottom Depth/Speed"),
        (60, 140, "Ownship Attitude"),
        (60, 145, "Ownship Position (GNSS)"),
        (60, 150, "Ownship Position (Loran C)"),
        (60, 155, "Speed"),
        (60, 160, "Turn Rate Indicator"),
        (60, 170, "Integrated Navigation"),
        (60, 200, "Radar"),
        (60, 205, "Infrared Imaging"),
        (70, 130, "EPIRB"),
        (70, 140, "AIS"),
        (70, 150, "DSC"),
        (70, 160, "Data Receiver/Transceiver"),
        (70, 170, "Satellite"),
        (70, 180, "Radio-telephone (MF/HF)"),
        (70, 190, "Radiotelephone"),
        (75, 130, "Temperature"),
        (75, 140, "Pressure"),
        (75, 150, "Fluid Level"),
        (75, 160, "Flow"),
        (75, 170, "Humidity"),
        (80, 130, "Time/Date systems"),
        (80, 140, "VDR"),
        (80, 150, "Integrated Instrumentation"),
        (80, 160, "General Purpose Displays"),
        (80, 170, "General Sensor Box"),
        (80, 180, "Weather Instruments"),
        (80, 190, "Transducer/general"),
        (80, 200, "NMEA 0183 Converter"),
        (85, 130, "Atmospheric"),
        (85, 160, "Aquatic"),
        (90, 130, "HVAC"),
        (100, 130, "Scale (Catch)"),
        (110, 130, "Button Interface"),
        (110, 135, "Switch Interface"),
        (110, 140, "Analog Interface"),
        (120, 130, "Display"),
        (120, 140, "Alarm Enunciator"),
        (125, 130, "Multimedia Player"),
        (125, 140, "Multimedia Controller"),
    ],
};

//==================================================================================SYSTEM_TIME_SOURCE

pub static SYSTEM_TIME_SOURCE: LookupTable = LookupTable {
    name: "SYSTEM_TIME_SOURCE",
    entries: &[
        (0, "GPS", "GPS"),
        (1, "GLONASS", "GLONASS"),
        (2, "Radio Station", "Radio Station"),
        (3, "Local Cesium clock", "Local Cesium clock"),
        (4, "Local Rubidium clock", "Local Rubidium clock"),
        (5, "Local Crystal clock", "Local Crystal clock"),
    ],
};

//==================================================================================DIRECTION_REFERENCE

pub static DIRECTION_REFERENCE: LookupTable = LookupTable {
    name: "DIRECTION_REFERENCE",
    entries: &[
        (0, "True", "True"),
        (1, "Magnetic", "Magnetic"),
        (2, "Error", "Error"),
    ],
};

//==================================================================================WIND_REFERENCE

pub static WIND_REFERENCE: LookupTable = LookupTable {
    name: "WIND_REFERENCE",
    entries: &[
        (0, "True (ground referenced to North)", "True (ground referenced to North)"),
        (1, "Magnetic (ground referenced to Magnetic North)", "Magnetic (ground referenced to Magnetic North)"),
        (2, "Apparent", "Apparent"),
        (3, "True (boat referenced)", "True (boat referenced)"),
        (4, "True (water referenced)", "True (water referenced)"),
    ],
};

//==================================================================================TEMPERATURE_SOURCE

pub static TEMPERATURE_SOURCE: LookupTable = LookupTable {
    name: "TEMPERATURE_SOURCE",
    entries: &[
        (0, "Sea Temperature", "Sea Temperature"),
        (1, "Outside Temperature", "Outside Temperature"),
        (2, "Inside Temperature", "Inside Temperature"),
        (3, "Engine Room Temperature", "Engine Room Temperature"),
        (4, "Main Cabin Temperature", "Main Cabin Temperature"),
        (5, "Live Well Temperature", "Live Well Temperature"),
        (6, "Bait Well Temperature", "Bait Well Temperature"),
        (7, "Refrigeration Temperature", "Refrigeration Temperature"),
        (8, "Heating System Temperature", "Heating System Temperature"),
        (9, "Dew Point Temperature", "Dew Point Temperature"),
        (10, "Apparent Wind Chill Temperature", "Apparent Wind Chill Temperature"),
        (11, "Theoretical Wind Chill Temperature", "Theoretical Wind Chill Temperature"),
        (12, "Heat Index Temperature", "Heat Index Temperature"),
        (13, "Freezer Temperature", "Freezer Temperature"),
        (14, "Exhaust Gas Temperature", "Exhaust Gas Temperature"),
    ],
};

//==================================================================================ENGINE_INSTANCE

pub static ENGINE_INSTANCE: LookupTable = LookupTable {
    name: "ENGINE_INSTANCE",
    entries: &[
        (0, "Single Engine or Dual Engine Port", "Single Engine or Dual Engine Port"),
        (1, "Dual Engine Starboard", "Dual Engine Starboard"),
    ],
};

//==================================================================================REPEAT_INDICATOR

pub static REPEAT_INDICATOR: LookupTable = LookupTable {
    name: "REPEAT_INDICATOR",
    entries: &[
        (0, "Initial", "Initial"),
        (1, "First retransmission", "First retransmission"),
        (2, "Second retransmission", "Second retransmission"),
        (3, "Final retransmission", "Final retransmission"),
    ],
};

//==================================================================================ENGINE_STATUS_BITS

pub static ENGINE_STATUS_1: BitLookupTable = BitLookupTable {
    name: "ENGINE_STATUS_1",
    entries: &[
        (0, "Check Engine"),
        (1, "Over Temperature"),
        (2, "Low Oil Pressure"),
        (3, "Low Oil Level"),
        (4, "Low Fuel Pressure"),
        (5, "Low System Voltage"),
        (6, "Low Coolant Level"),
        (7, "Water Flow"),
        (8, "Water In Fuel"),
        (9, "Charge Indicator"),
        (10, "Preheat Indicator"),
        (11, "High Boost Pressure"),
        (12, "Rev Limit Exceeded"),
        (13, "EGR System"),
        (14, "Throttle Position Sensor"),
        (15, "Emergency Stop"),
    ],
};

pub static ENGINE_STATUS_2: BitLookupTable = BitLookupTable {
    name: "ENGINE_STATUS_2",
    entries: &[
        (0, "Warning Level 1"),
        (1, "Warning Level 2"),
        (2, "Power Reduction"),
        (3, "Maintenance Needed"),
        (4, "Engine Comm Error"),
        (5, "Sub or Secondary Throttle"),
        (6, "Neutral Start Protect"),
        (7, "Engine Shutting Down"),
    ],
};
