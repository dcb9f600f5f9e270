//! Typed reads over a decoded legacy park image.

use tracing::debug;

use super::layout::{self, banner, header, peep_spawn, research, ride, strings, tile};
use crate::config::import::{DEFAULT_MAP_SIZE, VERSION_ADDED_ATTRACTIONS, VERSION_LOOPY_LANDSCAPES};
use crate::error::{Error, Result};
use crate::io::sawyer::decode_legacy_stream;
use crate::io::{ByteBuffer, decode_legacy};

/// Release of the first game that wrote a park.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameVersion {
    Classic,
    AddedAttractions,
    LoopyLandscapes,
}

impl GameVersion {
    pub fn from_raw(raw: u32) -> Self {
        if raw < VERSION_ADDED_ATTRACTIONS {
            GameVersion::Classic
        } else if raw < VERSION_LOOPY_LANDSCAPES {
            GameVersion::AddedAttractions
        } else {
            GameVersion::LoopyLandscapes
        }
    }
}

/// True for string ids that point into the park's user string table.
pub fn is_user_string_id(id: u16) -> bool {
    (strings::USER_START..strings::USER_END).contains(&id)
}

pub struct ParkImage {
    data: Vec<u8>,
}

impl ParkImage {
    /// Decodes a legacy container (RLE stream plus checksum).
    pub fn decode(file: &[u8]) -> Result<Self> {
        let data = decode_legacy_stream(file).map_err(|e| {
            debug!("Legacy stream decode failed: {}", e);
            Error::InvalidFormat("Unable to decode park".to_string())
        })?;
        Self::from_image(data)
    }

    pub fn from_image(data: Vec<u8>) -> Result<Self> {
        if data.len() != layout::IMAGE_SIZE {
            debug!(
                "Decoded park is {} bytes, expected {}",
                data.len(),
                layout::IMAGE_SIZE
            );
            return Err(Error::InvalidFormat("Unable to decode park".to_string()));
        }
        Ok(Self { data })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn buf(&self) -> ByteBuffer<'_> {
        ByteBuffer::new(&self.data)
    }

    pub fn u8(&self, offset: usize) -> Result<u8> {
        self.buf().read_u8_at(offset)
    }

    pub fn i8(&self, offset: usize) -> Result<i8> {
        self.buf().read_i8_at(offset)
    }

    pub fn u16(&self, offset: usize) -> Result<u16> {
        self.buf().read_u16_at(offset)
    }

    pub fn i16(&self, offset: usize) -> Result<i16> {
        self.buf().read_i16_at(offset)
    }

    pub fn u32(&self, offset: usize) -> Result<u32> {
        self.buf().read_u32_at(offset)
    }

    pub fn i32(&self, offset: usize) -> Result<i32> {
        self.buf().read_i32_at(offset)
    }

    pub fn bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.buf().slice_at(offset, len)
    }

    /// Reads `count` consecutive values starting at `offset`.
    pub fn array<T>(
        &self,
        offset: usize,
        count: usize,
        stride: usize,
        read: impl Fn(&Self, usize) -> Result<T>,
    ) -> Result<Vec<T>> {
        (0..count).map(|i| read(self, offset + i * stride)).collect()
    }

    pub fn game_version(&self) -> Result<GameVersion> {
        Ok(GameVersion::from_raw(self.u32(header::GAME_VERSION)?))
    }

    /// Playable map size; zero in the file means full size.
    pub fn map_size(&self) -> Result<u16> {
        Ok(match self.u16(header::MAP_SIZE)? {
            0 => DEFAULT_MAP_SIZE,
            size => size,
        })
    }

    pub fn scenario_name(&self) -> Result<String> {
        Ok(decode_legacy(
            self.bytes(header::SCENARIO_NAME, header::SCENARIO_NAME_LEN)?,
        ))
    }

    /// Text of a user string. `None` for other string ids and for empty
    /// entries.
    pub fn user_string(&self, id: u16) -> Result<Option<String>> {
        if !is_user_string_id(id) {
            return Ok(None);
        }
        let slot = (id - strings::USER_START) as usize % strings::COUNT;
        let text = decode_legacy(self.bytes(strings::TABLE + slot * strings::LEN, strings::LEN)?);
        Ok(Some(text).filter(|t| !t.is_empty()))
    }

    /// The research list of the release that wrote the park.
    pub fn research_items(&self) -> Result<Vec<ResearchRecord>> {
        let (offset, count) = match self.game_version()? {
            GameVersion::LoopyLandscapes => (research::ITEMS_LL, research::ITEMS_LL_COUNT),
            _ => (research::ITEMS, research::ITEMS_COUNT),
        };
        self.array(offset, count, research::ITEM_SIZE, |image, at| {
            let raw = image.bytes(at, research::ITEM_SIZE)?;
            Ok(ResearchRecord {
                item: raw[research::ITEM],
                related_ride: raw[research::RELATED_RIDE],
                kind: raw[research::TYPE],
                flags: raw[research::FLAGS],
                category: raw[research::CATEGORY],
            })
        })
    }

    pub fn ride(&self, index: usize) -> Result<RideRecord<'_>> {
        if index >= ride::COUNT {
            return Err(Error::OutOfRange {
                what: "ride",
                index,
                len: ride::COUNT,
            });
        }
        let data = self.bytes(ride::OFFSET + index * ride::SIZE, ride::SIZE)?;
        Ok(RideRecord { index, data })
    }

    /// Every ride slot holding a ride.
    pub fn rides(&self) -> Result<Vec<RideRecord<'_>>> {
        let mut rides = Vec::new();
        for index in 0..ride::COUNT {
            let record = self.ride(index)?;
            if record.ride_type()? != ride::TYPE_NULL {
                rides.push(record);
            }
        }
        Ok(rides)
    }

    pub fn banner(&self, index: usize) -> Result<BannerRecord> {
        if index >= banner::COUNT {
            return Err(Error::OutOfRange {
                what: "banner",
                index,
                len: banner::COUNT,
            });
        }
        let raw = self.bytes(banner::OFFSET + index * banner::SIZE, banner::SIZE)?;
        Ok(BannerRecord {
            banner_type: raw[banner::TYPE],
            flags: raw[banner::FLAGS],
            string_idx: u16::from_le_bytes([raw[banner::STRING_IDX], raw[banner::STRING_IDX + 1]]),
            colour: raw[banner::COLOUR],
            text_colour: raw[banner::TEXT_COLOUR],
            x: raw[banner::X],
            y: raw[banner::Y],
        })
    }

    pub fn peep_spawn(&self, index: usize) -> Result<[u16; 4]> {
        let at = peep_spawn::OFFSET + index * peep_spawn::SIZE;
        Ok([
            self.u16(at + peep_spawn::X)?,
            self.u16(at + peep_spawn::Y)?,
            u16::from(self.u8(at + peep_spawn::Z)?),
            u16::from(self.u8(at + peep_spawn::DIRECTION)?),
        ])
    }

    /// Splits the element pool into the tiles of a full-size map, `x`
    /// varying fastest.
    pub fn tiles(&self) -> Result<Vec<RawTile>> {
        let pool = self.bytes(tile::OFFSET, tile::MAX_ELEMENTS * tile::ELEMENT_SIZE)?;
        let mut elements = pool.chunks_exact(tile::ELEMENT_SIZE).map(|chunk| {
            let mut bytes = [0u8; tile::ELEMENT_SIZE];
            bytes.copy_from_slice(chunk);
            RawElement(bytes)
        });

        let mut tiles = Vec::with_capacity(tile::MAP_SIZE * tile::MAP_SIZE);
        for index in 0..tile::MAP_SIZE * tile::MAP_SIZE {
            let mut tile_elements = Vec::new();
            loop {
                let element = elements.next().ok_or_else(|| {
                    Error::InvalidFormat(format!("Tile data ends early at tile {}", index))
                })?;
                let last = element.is_last();
                tile_elements.push(element);
                if last {
                    break;
                }
            }
            tiles.push(RawTile {
                x: (index % tile::MAP_SIZE) as u16,
                y: (index / tile::MAP_SIZE) as u16,
                elements: tile_elements,
            });
        }
        Ok(tiles)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchRecord {
    pub item: u8,
    pub related_ride: u8,
    pub kind: u8,
    pub flags: u8,
    pub category: u8,
}

impl ResearchRecord {
    /// The separator this record stands for, if it is one.
    pub fn separator(&self) -> Option<u8> {
        (self.flags == research::FLAGS_SEPARATOR).then_some(self.item)
    }

    pub fn is_end(&self) -> bool {
        self.separator() == Some(research::END)
    }

    /// True for the separators between the available and researchable parts.
    pub fn is_section_marker(&self) -> bool {
        matches!(
            self.separator(),
            Some(research::END_AVAILABLE | research::END_RESEARCHABLE)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerRecord {
    pub banner_type: u8,
    pub flags: u8,
    pub string_idx: u16,
    pub colour: u8,
    pub text_colour: u8,
    pub x: u8,
    pub y: u8,
}

/// One 0x260-byte ride record.
pub struct RideRecord<'a> {
    pub index: usize,
    data: &'a [u8],
}

impl RideRecord<'_> {
    fn buf(&self) -> ByteBuffer<'_> {
        ByteBuffer::new(self.data)
    }

    pub fn u8(&self, offset: usize) -> Result<u8> {
        self.buf().read_u8_at(offset)
    }

    pub fn u16(&self, offset: usize) -> Result<u16> {
        self.buf().read_u16_at(offset)
    }

    pub fn i16(&self, offset: usize) -> Result<i16> {
        self.buf().read_i16_at(offset)
    }

    pub fn i32(&self, offset: usize) -> Result<i32> {
        self.buf().read_i32_at(offset)
    }

    pub fn u32(&self, offset: usize) -> Result<u32> {
        self.buf().read_u32_at(offset)
    }

    pub fn ride_type(&self) -> Result<u8> {
        self.u8(ride::TYPE)
    }

    pub fn vehicle_type(&self) -> Result<u8> {
        self.u8(ride::VEHICLE_TYPE)
    }

    /// Reads a per-station or per-scheme byte array.
    pub fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.buf().slice_at(offset, N)?);
        Ok(out)
    }

    /// Reads a tile coordinate pair; `None` when undefined.
    pub fn xy(&self, offset: usize) -> Result<Option<(u8, u8)>> {
        let raw = self.u16(offset)?;
        if raw == ride::XY_UNDEFINED {
            return Ok(None);
        }
        let [x, y] = raw.to_le_bytes();
        Ok(Some((x, y)))
    }
}

/// The elements stacked on one map tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTile {
    pub x: u16,
    pub y: u16,
    pub elements: Vec<RawElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawElement(pub [u8; 8]);

impl RawElement {
    pub fn type_byte(&self) -> u8 {
        self.0[0]
    }

    pub fn kind(&self) -> u8 {
        self.0[0] & tile::TYPE_MASK
    }

    pub fn direction(&self) -> u8 {
        self.0[0] & tile::DIRECTION_MASK
    }

    pub fn flags(&self) -> u8 {
        self.0[1]
    }

    pub fn is_last(&self) -> bool {
        self.flags() & tile::FLAG_LAST != 0
    }

    pub fn base_height(&self) -> u8 {
        self.0[2]
    }

    pub fn clearance_height(&self) -> u8 {
        self.0[3]
    }

    pub fn prop(&self, index: usize) -> u8 {
        self.0[4 + index]
    }

    /// Legacy path surface code, combining direction bits and the high
    /// nibble of the first property.
    pub fn path_type(&self) -> u8 {
        (self.type_byte() & 0x03) | ((self.prop(0) & 0xF0) >> 2)
    }

    pub fn path_addition(&self) -> u8 {
        self.prop(1) & 0x0F
    }

    pub fn small_scenery_type(&self) -> u8 {
        self.prop(0)
    }

    pub fn large_scenery_type(&self) -> u16 {
        u16::from_le_bytes([self.prop(0), self.prop(1)]) & 0x3FF
    }

    /// Legacy wall type standing on `edge`, `None` when the edge is empty.
    pub fn wall_type(&self, edge: u8) -> Option<u8> {
        let (colour_3, colour_1, animation) = (self.prop(1), self.prop(2), self.prop(3));
        let low = (colour_3 >> (edge * 2)) & 0x03;
        let nibbles = u16::from(colour_1) | (u16::from(animation) << 8);
        let high = ((nibbles >> (edge * 4)) & 0x0F) as u8;
        if high == tile::WALL_NONE {
            return None;
        }
        Some(low | (high << 2))
    }

    /// Legacy colour shared by every wall of the element.
    pub fn wall_colour(&self) -> u8 {
        ((self.type_byte() & 0xC0) >> 3) | ((self.prop(0) & 0xE0) >> 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_version_bands() {
        assert_eq!(GameVersion::from_raw(0), GameVersion::Classic);
        assert_eq!(GameVersion::from_raw(109_999), GameVersion::Classic);
        assert_eq!(GameVersion::from_raw(110_018), GameVersion::AddedAttractions);
        assert_eq!(GameVersion::from_raw(120_001), GameVersion::LoopyLandscapes);
        assert!(GameVersion::AddedAttractions < GameVersion::LoopyLandscapes);
    }

    #[test]
    fn test_wrong_size_is_invalid() {
        assert!(matches!(
            ParkImage::from_image(vec![0u8; 16]),
            Err(Error::InvalidFormat(m)) if m == "Unable to decode park"
        ));
        assert!(matches!(
            ParkImage::decode(&[0x05, 0x01]),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_user_string_ids() {
        assert!(is_user_string_id(0x8000));
        assert!(is_user_string_id(0x8FFF));
        assert!(!is_user_string_id(0x9000));
        assert!(!is_user_string_id(0x0C3A));
    }

    #[test]
    fn test_path_type_and_walls() {
        // direction bits 2, surface nibble 0x10 -> code 6
        let path = RawElement([0x04 | 0x02, 0x80, 2, 4, 0x10, 0x03, 0, 0]);
        assert_eq!(path.kind(), tile::PATH);
        assert_eq!(path.path_type(), 6);
        assert_eq!(path.path_addition(), 3);

        // edge 0: low bits 1, nibble 2 -> type 9; edges 1..3 empty
        let wall = RawElement([0x14 | 0x40, 0x80, 2, 4, 0xE0, 0x01, 0xF2, 0xFF]);
        assert_eq!(wall.wall_type(0), Some(9));
        assert_eq!(wall.wall_type(1), None);
        assert_eq!(wall.wall_type(3), None);
        assert_eq!(wall.wall_colour(), 0x08 | 0x07);
    }
}
