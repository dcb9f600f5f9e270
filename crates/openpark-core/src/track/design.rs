//! Track design files.
//!
//! Both `.td4` and `.td6` designs are a single RLE stream with an additive
//! checksum trailer. A `.td6` design names its vehicle object directly; a
//! `.td4` design only stores legacy ride and vehicle type codes, which are
//! resolved through the legacy object tables.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io::sawyer::{decode_legacy_stream, encode_legacy_stream};
use crate::legacy::tables;
use crate::object::{OBJECT_ENTRY_SIZE, ObjectEntry};

const TD6_OBJECT_ENTRY: usize = 0x70;
const TD6_HEADER_SIZE: usize = 0xA3;
const TD4_HEADER_SIZE: usize = 0xC4;

/// What the track repository needs to know about a design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDesignInfo {
    pub ride_type: u8,
    pub object_entry: String,
}

pub fn read_track_design(path: &Path) -> Result<TrackDesignInfo> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let data = decode_legacy_stream(&fs::read(path)?)?;
    match ext.as_str() {
        "td6" => parse_td6(&data),
        "td4" => parse_td4(&data),
        _ => Err(Error::UnsupportedExtension(ext)),
    }
}

fn parse_td6(data: &[u8]) -> Result<TrackDesignInfo> {
    let raw = data
        .get(TD6_OBJECT_ENTRY..TD6_OBJECT_ENTRY + OBJECT_ENTRY_SIZE)
        .ok_or_else(|| Error::InvalidFormat("Track design too short".to_string()))?;
    Ok(TrackDesignInfo {
        ride_type: data[0],
        object_entry: ObjectEntry::from_bytes(raw)?.name(),
    })
}

fn parse_td4(data: &[u8]) -> Result<TrackDesignInfo> {
    if data.len() < 2 {
        return Err(Error::InvalidFormat("Track design too short".to_string()));
    }
    let legacy_ride = data[0];
    let legacy_vehicle = data[1];
    let ride_type = tables::ride_type(legacy_ride)
        .ok_or_else(|| Error::InvalidFormat(format!("Unknown legacy ride type {}", legacy_ride)))?;
    let object = if tables::ride_type_uses_vehicles(legacy_ride) {
        tables::vehicle_object(legacy_vehicle)
    } else {
        tables::ride_type_object(legacy_ride)
    }
    .ok_or_else(|| Error::InvalidFormat(format!("No object for legacy ride type {}", legacy_ride)))?;
    Ok(TrackDesignInfo {
        ride_type,
        object_entry: object.to_string(),
    })
}

/// Builds a minimal `.td6` design for the given ride type and object.
pub fn encode_td6(ride_type: u8, object: &ObjectEntry) -> Vec<u8> {
    let mut data = vec![0u8; TD6_HEADER_SIZE];
    data[0] = ride_type;
    data[TD6_OBJECT_ENTRY..TD6_OBJECT_ENTRY + OBJECT_ENTRY_SIZE].copy_from_slice(&object.to_bytes());
    data.push(0xFF);
    encode_legacy_stream(&data)
}

/// Builds a minimal `.td4` design from legacy type codes.
pub fn encode_td4(legacy_ride_type: u8, legacy_vehicle_type: u8) -> Vec<u8> {
    let mut data = vec![0u8; TD4_HEADER_SIZE];
    data[0] = legacy_ride_type;
    data[1] = legacy_vehicle_type;
    data.push(0xFF);
    encode_legacy_stream(&data)
}
