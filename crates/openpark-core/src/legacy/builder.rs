//! Writes legacy park containers.

use super::image::{BannerRecord, RawElement, ResearchRecord};
use super::layout::{self, banner, header, peep_spawn, research, ride, strings, tile};
use crate::error::{Error, Result};
use crate::io::encode_legacy;
use crate::io::sawyer::encode_legacy_stream;

/// Builds a legacy park image field by field.
///
/// A new builder describes an empty Classic park: flat grass on every tile,
/// no rides, no banners, unused peep spawns and an empty research list.
///
/// ```
/// use openpark_core::legacy::{LegacyParkBuilder, layout::{header, ride}};
///
/// let mut builder = LegacyParkBuilder::new();
/// builder
///     .write_u32(header::GAME_VERSION, 120_001)
///     .ride(0, |r| {
///         r.write_u8(ride::TYPE, 33);
///     });
/// let file = builder.encode().unwrap();
/// assert!(!file.is_empty());
/// ```
pub struct LegacyParkBuilder {
    data: Vec<u8>,
    tiles: Vec<Vec<RawElement>>,
    research: Vec<ResearchRecord>,
    next_user_string: u16,
}

impl Default for LegacyParkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyParkBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            data: vec![0u8; layout::IMAGE_SIZE],
            tiles: vec![vec![Self::flat_surface(14)]; tile::MAP_SIZE * tile::MAP_SIZE],
            research: Vec::new(),
            next_user_string: 0,
        };
        for index in 0..ride::COUNT {
            builder.data[ride::OFFSET + index * ride::SIZE + ride::TYPE] = ride::TYPE_NULL;
        }
        for index in 0..banner::COUNT {
            builder.data[banner::OFFSET + index * banner::SIZE + banner::TYPE] = banner::NULL;
        }
        for index in 0..peep_spawn::COUNT {
            builder.write_u16(
                peep_spawn::OFFSET + index * peep_spawn::SIZE + peep_spawn::X,
                peep_spawn::UNDEFINED,
            );
        }
        builder
    }

    /// A grass surface element at `base_height`.
    pub fn flat_surface(base_height: u8) -> RawElement {
        RawElement([tile::SURFACE, tile::FLAG_LAST, base_height, base_height, 0, 0, 0, 0])
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        self.write_bytes(offset, &[value])
    }

    pub fn write_u16(&mut self, offset: usize, value: u16) -> &mut Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) -> &mut Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_i32(&mut self, offset: usize, value: i32) -> &mut Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    /// Copies `bytes` into the image at `offset`. Writes past the image end
    /// are truncated.
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        let end = (offset + bytes.len()).min(self.data.len());
        if offset < end {
            self.data[offset..end].copy_from_slice(&bytes[..end - offset]);
        }
        self
    }

    pub fn scenario_name(&mut self, name: &str) -> &mut Self {
        let bytes = encode_legacy(name, header::SCENARIO_NAME_LEN);
        self.write_bytes(header::SCENARIO_NAME, &bytes)
    }

    /// Edits ride slot `index` in place.
    pub fn ride(&mut self, index: usize, edit: impl FnOnce(&mut RideWriter<'_>)) -> &mut Self {
        if index < ride::COUNT {
            let start = ride::OFFSET + index * ride::SIZE;
            let mut writer = RideWriter {
                data: &mut self.data[start..start + ride::SIZE],
            };
            edit(&mut writer);
        }
        self
    }

    /// Replaces the elements of tile (`x`, `y`). The last element gets the
    /// "last for tile" flag; the others lose it.
    pub fn tile(&mut self, x: usize, y: usize, elements: &[RawElement]) -> &mut Self {
        if x < tile::MAP_SIZE && y < tile::MAP_SIZE && !elements.is_empty() {
            let mut elements = elements.to_vec();
            let last = elements.len() - 1;
            for (i, element) in elements.iter_mut().enumerate() {
                if i == last {
                    element.0[1] |= tile::FLAG_LAST;
                } else {
                    element.0[1] &= !tile::FLAG_LAST;
                }
            }
            self.tiles[y * tile::MAP_SIZE + x] = elements;
        }
        self
    }

    /// Appends a research list entry.
    pub fn research_item(&mut self, item: ResearchRecord) -> &mut Self {
        self.research.push(item);
        self
    }

    /// Appends a research list separator.
    pub fn research_separator(&mut self, separator: u8) -> &mut Self {
        self.research_item(ResearchRecord {
            item: separator,
            related_ride: 0,
            kind: 0,
            flags: research::FLAGS_SEPARATOR,
            category: 0,
        })
    }

    /// Stores `text` in the next free user string slot and returns its id.
    pub fn user_string(&mut self, text: &str) -> u16 {
        let slot = usize::from(self.next_user_string) % strings::COUNT;
        self.next_user_string = self.next_user_string.wrapping_add(1);
        let bytes = encode_legacy(text, strings::LEN);
        self.write_bytes(strings::TABLE + slot * strings::LEN, &bytes);
        strings::USER_START + slot as u16
    }

    pub fn banner(&mut self, index: usize, record: &BannerRecord) -> &mut Self {
        if index >= banner::COUNT {
            return self;
        }
        let at = banner::OFFSET + index * banner::SIZE;
        let [lo, hi] = record.string_idx.to_le_bytes();
        let raw = [
            record.banner_type,
            record.flags,
            lo,
            hi,
            record.colour,
            record.text_colour,
            record.x,
            record.y,
        ];
        self.write_bytes(at, &raw)
    }

    pub fn peep_spawn(&mut self, index: usize, x: u16, y: u16, z: u8, direction: u8) -> &mut Self {
        if index >= peep_spawn::COUNT {
            return self;
        }
        let at = peep_spawn::OFFSET + index * peep_spawn::SIZE;
        self.write_u16(at + peep_spawn::X, x)
            .write_u16(at + peep_spawn::Y, y)
            .write_u8(at + peep_spawn::Z, z)
            .write_u8(at + peep_spawn::DIRECTION, direction)
    }

    /// The decoded image: header, research list for the configured release
    /// and the element pool.
    pub fn image(&self) -> Result<Vec<u8>> {
        let mut data = self.data.clone();

        let version = u32::from_le_bytes([
            data[header::GAME_VERSION],
            data[header::GAME_VERSION + 1],
            data[header::GAME_VERSION + 2],
            data[header::GAME_VERSION + 3],
        ]);
        let (offset, count) = if super::GameVersion::from_raw(version) == super::GameVersion::LoopyLandscapes {
            (research::ITEMS_LL, research::ITEMS_LL_COUNT)
        } else {
            (research::ITEMS, research::ITEMS_COUNT)
        };
        if self.research.len() >= count {
            return Err(Error::InvalidFormat(format!(
                "Research list holds at most {} items",
                count - 1
            )));
        }
        for index in 0..count {
            let record = self.research.get(index).copied().unwrap_or(ResearchRecord {
                item: research::END,
                related_ride: 0,
                kind: 0,
                flags: research::FLAGS_SEPARATOR,
                category: 0,
            });
            let at = offset + index * research::ITEM_SIZE;
            data[at + research::ITEM] = record.item;
            data[at + research::RELATED_RIDE] = record.related_ride;
            data[at + research::TYPE] = record.kind;
            data[at + research::FLAGS] = record.flags;
            data[at + research::CATEGORY] = record.category;
        }

        let used: usize = self.tiles.iter().map(Vec::len).sum();
        if used > tile::MAX_ELEMENTS {
            return Err(Error::InvalidFormat(format!(
                "{} tile elements exceed the pool of {}",
                used,
                tile::MAX_ELEMENTS
            )));
        }
        let mut at = tile::OFFSET;
        for element in self.tiles.iter().flatten() {
            data[at..at + tile::ELEMENT_SIZE].copy_from_slice(&element.0);
            at += tile::ELEMENT_SIZE;
        }
        Ok(data)
    }

    /// The complete container, ready to be written as `.sv4` or `.sc4`.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(encode_legacy_stream(&self.image()?))
    }
}

/// Field writer over one ride record.
pub struct RideWriter<'a> {
    data: &'a mut [u8],
}

impl RideWriter<'_> {
    pub fn write_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        self.write_bytes(offset, &[value])
    }

    pub fn write_u16(&mut self, offset: usize, value: u16) -> &mut Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_i16(&mut self, offset: usize, value: i16) -> &mut Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_i32(&mut self, offset: usize, value: i32) -> &mut Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        let end = (offset + bytes.len()).min(self.data.len());
        if offset < end {
            self.data[offset..end].copy_from_slice(&bytes[..end - offset]);
        }
        self
    }
}
