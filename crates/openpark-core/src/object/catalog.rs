//! In-memory object catalog.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::{OBJECT_ENTRY_SIZE, ObjectEntry, ObjectHandle, ObjectManager, ObjectType};
use crate::config::scan;
use crate::fs::{DirectoryScanner, FilePattern};

/// An [`ObjectManager`] over a fixed set of known objects.
///
/// Objects are registered explicitly or discovered from `.dat` files whose
/// first 16 bytes are the object entry. Loading hands out one stable handle
/// per distinct object.
#[derive(Debug, Default, Clone)]
pub struct ObjectCatalog {
    available: HashMap<String, ObjectEntry>,
    loaded: Vec<ObjectEntry>,
}

impl ObjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.trim_end().to_ascii_uppercase()
    }

    pub fn insert(&mut self, entry: ObjectEntry) {
        self.available.insert(Self::key(&entry.name()), entry);
    }

    /// Registers an object of the given type by name.
    pub fn insert_named(&mut self, object_type: ObjectType, name: &str) {
        self.insert(ObjectEntry::new(object_type, name));
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Objects loaded so far, in load order.
    pub fn loaded(&self) -> &[ObjectEntry] {
        &self.loaded
    }

    /// Adds every object file found under `dir` (recursively).
    pub fn scan_dir(&mut self, dir: &Path) -> usize {
        let mut added = 0;
        for file in DirectoryScanner::new(FilePattern::new(dir, scan::OBJECT_PATTERN), true) {
            match read_entry(&file.path) {
                Ok(entry) => {
                    self.insert(entry);
                    added += 1;
                }
                Err(e) => debug!("Skipping object {}: {}", file.path.display(), e),
            }
        }
        info!("Found {} objects in {}", added, dir.display());
        added
    }
}

fn read_entry(path: &Path) -> crate::Result<ObjectEntry> {
    let mut header = [0u8; OBJECT_ENTRY_SIZE];
    File::open(path)?.read_exact(&mut header)?;
    ObjectEntry::from_bytes(&header)
}

impl ObjectManager for ObjectCatalog {
    fn find_object(&self, name: &str) -> Option<ObjectEntry> {
        self.available.get(&Self::key(name)).copied()
    }

    fn load_object(&mut self, entry: &ObjectEntry) -> Option<ObjectHandle> {
        let name = entry.name();
        let known = self.find_object(&name)?;
        if let Some(pos) = self.loaded.iter().position(|e| e.name_eq(&name)) {
            return Some(ObjectHandle(pos as u32));
        }
        self.loaded.push(known);
        Some(ObjectHandle((self.loaded.len() - 1) as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_is_case_insensitive() {
        let mut catalog = ObjectCatalog::new();
        catalog.insert_named(ObjectType::Ride, "ARRT1");
        assert!(catalog.find_object("arrt1").is_some());
        assert!(catalog.find_object("ARRT1   ").is_some());
        assert!(catalog.find_object("ARRT2").is_none());
    }

    #[test]
    fn test_load_returns_stable_handles() {
        let mut catalog = ObjectCatalog::new();
        catalog.insert_named(ObjectType::Paths, "TARMAC");
        catalog.insert_named(ObjectType::Paths, "ROAD");

        let road = ObjectEntry::new(ObjectType::Paths, "ROAD");
        let tarmac = ObjectEntry::new(ObjectType::Paths, "TARMAC");
        assert_eq!(catalog.load_object(&road), Some(ObjectHandle(0)));
        assert_eq!(catalog.load_object(&tarmac), Some(ObjectHandle(1)));
        assert_eq!(catalog.load_object(&road), Some(ObjectHandle(0)));
        assert_eq!(catalog.loaded().len(), 2);

        let missing = ObjectEntry::new(ObjectType::Paths, "PATHASH");
        assert_eq!(catalog.load_object(&missing), None);
    }

    #[test]
    fn test_scan_dir_reads_headers() {
        let tmp = TempDir::new().unwrap();
        let entry = ObjectEntry::new(ObjectType::SmallScenery, "TIC");
        let mut file = entry.to_bytes().to_vec();
        file.extend([0u8; 32]);
        fs::create_dir(tmp.path().join("scenery")).unwrap();
        fs::write(tmp.path().join("scenery/TIC.DAT"), file).unwrap();
        fs::write(tmp.path().join("short.dat"), [1u8, 2]).unwrap();

        let mut catalog = ObjectCatalog::new();
        assert_eq!(catalog.scan_dir(tmp.path()), 1);
        assert_eq!(catalog.find_object("tic"), Some(entry));
    }
}
