//! Track design index over the built-in and user track directories.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::design::read_track_design;
use super::index::{load_index, save_index};
use super::item::TrackRepositoryItem;
use crate::config::{Paths, scan};
use crate::fs::{DirectoryFingerprint, DirectoryScanner, FilePattern, query_directory};

pub struct TrackDesignRepository {
    paths: Paths,
    items: Vec<TrackRepositoryItem>,
}

impl TrackDesignRepository {
    pub fn new(paths: Paths) -> Self {
        Self {
            paths,
            items: Vec::new(),
        }
    }

    fn patterns(&self) -> [(FilePattern, bool); 2] {
        [
            (FilePattern::new(self.paths.builtin_tracks(), scan::TRACK_PATTERN), true),
            (FilePattern::new(self.paths.user_tracks(), scan::TRACK_PATTERN), false),
        ]
    }

    /// Fingerprint of every design file in both directories.
    pub fn fingerprint(&self) -> DirectoryFingerprint {
        let mut fingerprint = DirectoryFingerprint::new();
        for (pattern, _) in self.patterns() {
            query_directory(&mut fingerprint, &pattern);
        }
        fingerprint
    }

    /// Loads the index from the cache when it is current, otherwise rescans
    /// every design file and rewrites the cache.
    pub fn scan(&mut self) {
        let fingerprint = self.fingerprint();
        let index_path = self.paths.track_index();

        if let Some(items) = load_index(&index_path, &fingerprint) {
            debug!("Loaded {} track designs from {}", items.len(), index_path.display());
            self.items = items;
            return;
        }

        self.items.clear();
        for (pattern, read_only) in self.patterns() {
            for file in DirectoryScanner::new(pattern, true) {
                if let Some(item) = read_item(&file.path, read_only) {
                    self.items.push(item);
                }
            }
        }
        self.sort();
        info!("Scanned {} track designs", self.items.len());

        if let Err(e) = save_index(&index_path, &fingerprint, &self.items) {
            warn!("Unable to save track index {}: {}", index_path.display(), e);
        }
    }

    fn sort(&mut self) {
        self.items.sort_by(compare_items);
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[TrackRepositoryItem] {
        &self.items
    }

    pub fn count_for_object_entry(&self, ride_type: u8, entry: Option<&str>) -> usize {
        self.matching(ride_type, entry).count()
    }

    /// Designs for `ride_type`; with `entry` set, only those built for that
    /// object.
    pub fn items_for_object_entry(
        &self,
        ride_type: u8,
        entry: Option<&str>,
    ) -> Vec<TrackRepositoryItem> {
        self.matching(ride_type, entry).cloned().collect()
    }

    fn matching<'a>(
        &'a self,
        ride_type: u8,
        entry: Option<&'a str>,
    ) -> impl Iterator<Item = &'a TrackRepositoryItem> + 'a {
        self.items.iter().filter(move |item| {
            item.ride_type == ride_type
                && entry.is_none_or(|e| item.object_entry.eq_ignore_ascii_case(e))
        })
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.items.iter().position(|item| item.matches_path(path))
    }

    /// Deletes a user design. Returns false for unknown or read-only designs
    /// and when the file cannot be removed.
    pub fn delete(&mut self, path: &Path) -> bool {
        let Some(index) = self.position(path) else {
            return false;
        };
        if self.items[index].is_read_only() {
            return false;
        }
        match fs::remove_file(&self.items[index].path) {
            Ok(()) => {
                self.items.remove(index);
                true
            }
            Err(e) => {
                warn!("Unable to delete {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Renames a user design in place, keeping its directory and extension.
    pub fn rename(&mut self, path: &Path, new_name: &str) -> Option<PathBuf> {
        let index = self.position(path)?;
        let item = &self.items[index];
        if item.is_read_only() {
            return None;
        }

        let mut file_name = new_name.to_string();
        if let Some(ext) = item.path.extension() {
            file_name.push('.');
            file_name.push_str(&ext.to_string_lossy());
        }
        let new_path = item.path.with_file_name(file_name);
        if new_path.exists() {
            warn!("Unable to rename {}: {} exists", path.display(), new_path.display());
            return None;
        }
        if let Err(e) = fs::rename(&item.path, &new_path) {
            warn!("Unable to rename {}: {}", path.display(), e);
            return None;
        }

        let item = &mut self.items[index];
        item.name = new_name.to_string();
        item.path = new_path.clone();
        self.sort();
        Some(new_path)
    }

    /// Copies a design into the user directory under its own file name.
    ///
    /// An existing file of that name is never overwritten, and a file that
    /// does not read as a track design is not copied.
    pub fn install(&mut self, path: &Path) -> Option<PathBuf> {
        let file_name = path.file_name()?;
        let dir = self.paths.user_tracks();
        let dest = dir.join(file_name);
        if dest.exists() {
            warn!("Track design {} is already installed", dest.display());
            return None;
        }

        let mut item = read_item(path, false)?;
        if let Err(e) = fs::create_dir_all(&dir).and_then(|_| fs::copy(path, &dest)) {
            warn!("Unable to install {}: {}", path.display(), e);
            return None;
        }
        item.path = dest.clone();
        self.items.push(item);
        self.sort();
        Some(dest)
    }
}

fn read_item(path: &Path, read_only: bool) -> Option<TrackRepositoryItem> {
    match read_track_design(path) {
        Ok(design) => Some(TrackRepositoryItem {
            name: design_name(path),
            path: path.to_path_buf(),
            ride_type: design.ride_type,
            object_entry: design.object_entry,
            flags: if read_only {
                TrackRepositoryItem::READ_ONLY
            } else {
                0
            },
        }),
        Err(e) => {
            warn!("Unable to read track design {}: {}", path.display(), e);
            None
        }
    }
}

fn design_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ride type ascending, then case-insensitive name.
pub fn compare_items(a: &TrackRepositoryItem, b: &TrackRepositoryItem) -> Ordering {
    a.ride_type
        .cmp(&b.ride_type)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}
