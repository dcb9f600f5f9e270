//! Object identifiers and the object/string capabilities the importer and
//! managers consume.

mod catalog;
mod strings;

pub use catalog::ObjectCatalog;
pub use strings::{ids as string_ids, BuiltinStrings, StringId, StringTable};

use std::fmt;

use strum::{EnumIter, FromRepr, IntoStaticStr};

use crate::error::{Error, Result};
use crate::io::ByteBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr, EnumIter)]
#[repr(u8)]
pub enum ObjectType {
    Ride = 0,
    SmallScenery = 1,
    LargeScenery = 2,
    Walls = 3,
    Banners = 4,
    Paths = 5,
    PathBits = 6,
    SceneryGroup = 7,
    ParkEntrance = 8,
    Water = 9,
    ScenarioText = 10,
}

impl ObjectType {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Number of object slots the runtime offers for this type.
    pub fn max_objects(&self) -> usize {
        match self {
            ObjectType::Ride => 128,
            ObjectType::SmallScenery => 252,
            ObjectType::LargeScenery => 128,
            ObjectType::Walls => 128,
            ObjectType::Banners => 32,
            ObjectType::Paths => 16,
            ObjectType::PathBits => 15,
            ObjectType::SceneryGroup => 19,
            ObjectType::ParkEntrance => 1,
            ObjectType::Water => 1,
            ObjectType::ScenarioText => 1,
        }
    }
}

/// Size of an object entry on disk.
pub const OBJECT_ENTRY_SIZE: usize = 16;

const ENTRY_FLAG_CUSTOM: u32 = 0x8000;

/// The 16-byte identifier of an object: flags (type in the low nibble),
/// an 8-character space-padded name, and a checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectEntry {
    pub flags: u32,
    pub name: [u8; 8],
    pub checksum: u32,
}

impl ObjectEntry {
    pub fn new(object_type: ObjectType, name: &str) -> Self {
        let mut padded = [b' '; 8];
        for (dst, src) in padded.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
        Self {
            flags: ENTRY_FLAG_CUSTOM | object_type as u32,
            name: padded,
            checksum: 0,
        }
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        ObjectType::from_u8((self.flags & 0x0F) as u8)
    }

    /// Name without trailing padding.
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.name)
            .trim_end_matches([' ', '\0'])
            .to_string()
    }

    /// True for the all-zero placeholder some files use for "no object".
    pub fn is_empty(&self) -> bool {
        self.flags == 0 && self.name.iter().all(|&b| b == 0 || b == b' ')
    }

    pub fn read(buf: &mut ByteBuffer<'_>) -> Result<Self> {
        let flags = buf.read_u32()?;
        let raw = buf.read_bytes(8)?;
        let mut name = [0u8; 8];
        name.copy_from_slice(raw);
        let checksum = buf.read_u32()?;
        Ok(Self {
            flags,
            name,
            checksum,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < OBJECT_ENTRY_SIZE {
            return Err(Error::InvalidFormat(format!(
                "Object entry needs {} bytes, got {}",
                OBJECT_ENTRY_SIZE,
                bytes.len()
            )));
        }
        Self::read(&mut ByteBuffer::new(bytes))
    }

    pub fn to_bytes(&self) -> [u8; OBJECT_ENTRY_SIZE] {
        let mut out = [0u8; OBJECT_ENTRY_SIZE];
        out[0..4].copy_from_slice(&self.flags.to_le_bytes());
        out[4..12].copy_from_slice(&self.name);
        out[12..16].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }

    /// Case-insensitive name comparison ignoring padding.
    pub fn name_eq(&self, other: &str) -> bool {
        self.name().eq_ignore_ascii_case(other.trim_end())
    }
}

impl fmt::Display for ObjectEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Handle to an object loaded by an [`ObjectManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);

/// Resolves and loads objects by their identifier.
pub trait ObjectManager {
    /// Looks up an installed object by name.
    fn find_object(&self, name: &str) -> Option<ObjectEntry>;

    /// Loads an object, returning `None` if it is not available.
    fn load_object(&mut self, entry: &ObjectEntry) -> Option<ObjectHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_entry_padding_and_type() {
        let entry = ObjectEntry::new(ObjectType::Paths, "TARMAC");
        assert_eq!(&entry.name, b"TARMAC  ");
        assert_eq!(entry.name(), "TARMAC");
        assert_eq!(entry.object_type(), Some(ObjectType::Paths));
        assert!(entry.name_eq("tarmac"));
    }

    #[test]
    fn test_entry_bytes_layout() {
        let entry = ObjectEntry::new(ObjectType::Water, "WTRCYAN");
        let bytes = entry.to_bytes();
        assert_eq!(&bytes[0..4], &(0x8009u32).to_le_bytes());
        assert_eq!(ObjectEntry::from_bytes(&bytes).unwrap(), entry);
        assert!(ObjectEntry::from_bytes(&bytes[..10]).is_err());
    }

    #[test]
    fn test_empty_entry() {
        assert!(ObjectEntry::from_bytes(&[0u8; 16]).unwrap().is_empty());
        assert!(!ObjectEntry::new(ObjectType::Ride, "ARRT1").is_empty());
    }

    #[test]
    fn test_max_objects_nonzero() {
        for t in ObjectType::iter() {
            assert!(t.max_objects() > 0, "{:?}", t);
        }
        assert_eq!(ObjectType::SmallScenery.max_objects(), 252);
    }
}
