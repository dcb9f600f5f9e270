//! List of installed title sequences.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::sequence::TitleSequence;
use crate::config::{Paths, scan};
use crate::error::{Error, Result};
use crate::fs::{DirectoryScanner, FilePattern};
use crate::object::{StringId, StringTable, string_ids as ids};

struct PredefinedSequence {
    file_name: &'static str,
    config_id: &'static str,
    string_id: StringId,
}

const PREDEFINED: [PredefinedSequence; 5] = [
    PredefinedSequence {
        file_name: "rct1.parkseq",
        config_id: "*RCT1",
        string_id: ids::TITLE_SEQUENCE_RCT1,
    },
    PredefinedSequence {
        file_name: "rct1aa.parkseq",
        config_id: "*RCT1AA",
        string_id: ids::TITLE_SEQUENCE_RCT1_AA,
    },
    PredefinedSequence {
        file_name: "rct1aal.parkseq",
        config_id: "*RCT1AALL",
        string_id: ids::TITLE_SEQUENCE_RCT1_AA_LL,
    },
    PredefinedSequence {
        file_name: "rct2.parkseq",
        config_id: "*RCT2",
        string_id: ids::TITLE_SEQUENCE_RCT2,
    },
    PredefinedSequence {
        file_name: "openrct2.parkseq",
        config_id: "*OPENRCT2",
        string_id: ids::TITLE_SEQUENCE_OPENRCT2,
    },
];

const SCRIPT_FILES: [&str; 2] = ["script.json", "script.txt"];

const ARCHIVE_EXTENSION: &str = "parkseq";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSequenceManagerItem {
    pub name: String,
    pub path: PathBuf,
    /// Position in the predefined set, `None` for custom sequences.
    pub predefined_index: Option<usize>,
    pub is_archive: bool,
}

impl TitleSequenceManagerItem {
    pub fn is_predefined(&self) -> bool {
        self.predefined_index.is_some()
    }
}

fn predefined_index(path: &Path) -> Option<usize> {
    let file_name = path.file_name()?.to_string_lossy();
    PREDEFINED
        .iter()
        .position(|p| p.file_name.eq_ignore_ascii_case(&file_name))
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn has_script(dir: &Path) -> bool {
    SCRIPT_FILES.iter().any(|name| dir.join(name).is_file())
}

/// Predefined sequences first in their fixed order, then custom ones by
/// case-insensitive name.
fn compare_items(a: &TitleSequenceManagerItem, b: &TitleSequenceManagerItem) -> Ordering {
    let rank = |item: &TitleSequenceManagerItem| item.predefined_index.unwrap_or(usize::MAX);
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

pub struct TitleSequenceManager {
    paths: Paths,
    items: Vec<TitleSequenceManagerItem>,
}

impl TitleSequenceManager {
    pub fn new(paths: Paths) -> Self {
        Self {
            paths,
            items: Vec::new(),
        }
    }

    /// Rebuilds the list from the built-in and user title directories.
    pub fn scan(&mut self, strings: &dyn StringTable) {
        self.items.clear();
        for dir in [
            self.paths.builtin_title_sequences(),
            self.paths.user_title_sequences(),
        ] {
            self.scan_dir(&dir, strings);
        }
        self.items.sort_by(compare_items);
        info!("Found {} title sequences", self.items.len());
    }

    fn scan_dir(&mut self, dir: &Path, strings: &dyn StringTable) {
        let pattern = FilePattern::new(dir, scan::TITLE_SEQUENCE_PATTERN);
        for file in DirectoryScanner::new(pattern, true) {
            self.add_item(file.path, true, strings);
        }

        let folders = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in folders {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping title sequence entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_dir() && has_script(entry.path()) {
                self.add_item(entry.into_path(), false, strings);
            }
        }
    }

    fn add_item(&mut self, path: PathBuf, is_archive: bool, strings: &dyn StringTable) {
        let predefined_index = if is_archive {
            predefined_index(&path)
        } else {
            None
        };
        let name = predefined_index
            .and_then(|i| strings.get(PREDEFINED[i].string_id))
            .map(str::to_string)
            .unwrap_or_else(|| stem(&path));
        self.items.push(TitleSequenceManagerItem {
            name,
            path,
            predefined_index,
            is_archive,
        });
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[TitleSequenceManagerItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&TitleSequenceManagerItem> {
        self.items.get(index)
    }

    /// Finds a sequence by the id stored in the config: `*NAME` for the
    /// predefined set, the sequence name otherwise.
    pub fn find_by_config_id(&self, config_id: &str) -> Option<usize> {
        self.items.iter().position(|item| match item.predefined_index {
            Some(i) => PREDEFINED[i].config_id.eq_ignore_ascii_case(config_id),
            None => item.name.eq_ignore_ascii_case(config_id),
        })
    }

    pub fn config_id(&self, index: usize) -> Option<String> {
        let item = self.items.get(index)?;
        Some(match item.predefined_index {
            Some(i) => PREDEFINED[i].config_id.to_string(),
            None => item.name.clone(),
        })
    }

    fn custom_item(&self, index: usize) -> Result<&TitleSequenceManagerItem> {
        let item = self.items.get(index).ok_or(Error::OutOfRange {
            what: "title sequence",
            index,
            len: self.items.len(),
        })?;
        if item.is_predefined() {
            return Err(Error::ReadOnly(item.path.clone()));
        }
        Ok(item)
    }

    pub fn delete(&mut self, index: usize) -> Result<()> {
        let item = self.custom_item(index)?;
        if item.is_archive {
            fs::remove_file(&item.path)?;
        } else {
            fs::remove_dir_all(&item.path)?;
        }
        info!("Deleted title sequence {}", item.path.display());
        self.items.remove(index);
        Ok(())
    }

    /// Renames a custom sequence in place. Returns the new path.
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<PathBuf> {
        let item = self.custom_item(index)?;
        let new_path = if item.is_archive {
            item.path
                .with_file_name(format!("{}.{}", new_name, ARCHIVE_EXTENSION))
        } else {
            item.path.with_file_name(new_name)
        };
        if new_path.exists() {
            return Err(Error::AlreadyExists(new_path));
        }
        fs::rename(&item.path, &new_path)?;

        let item = &mut self.items[index];
        item.name = new_name.to_string();
        item.path = new_path.clone();
        self.items.sort_by(compare_items);
        Ok(new_path)
    }

    /// Packs a copy of any sequence into the user directory under `new_name`.
    /// Returns the index of the copy.
    pub fn duplicate(&mut self, index: usize, new_name: &str) -> Result<usize> {
        let item = self.items.get(index).ok_or(Error::OutOfRange {
            what: "title sequence",
            index,
            len: self.items.len(),
        })?;
        let dest = self
            .paths
            .user_title_sequences()
            .join(format!("{}.{}", new_name, ARCHIVE_EXTENSION));
        if dest.exists() {
            return Err(Error::AlreadyExists(dest));
        }
        TitleSequence::load(&item.path)?.pack(&dest)?;

        self.items.push(TitleSequenceManagerItem {
            name: new_name.to_string(),
            path: dest.clone(),
            predefined_index: None,
            is_archive: true,
        });
        self.items.sort_by(compare_items);
        self.items
            .iter()
            .position(|item| item.path == dest)
            .ok_or_else(|| {
                warn!("Duplicated title sequence {} not listed", dest.display());
                Error::NotFound(dest.display().to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::object::BuiltinStrings;
    use crate::title::{TitleCommand, write_archive};
    use tempfile::TempDir;

    fn setup() -> (TempDir, TitleSequenceManager) {
        let tmp = TempDir::new().unwrap();
        let paths = Config::with_dirs(tmp.path().join("data"), tmp.path().join("user")).paths();
        let commands = [TitleCommand::Wait { seconds: 1 }];
        for name in ["openrct2.parkseq", "RCT1.parkseq"] {
            write_archive(&paths.builtin_title_sequences().join(name), &commands, &[]).unwrap();
        }
        write_archive(&paths.user_title_sequences().join("zeta.parkseq"), &commands, &[]).unwrap();
        let dir = paths.user_title_sequences().join("Alpha");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("script.txt"), "WAIT 1\n").unwrap();
        fs::create_dir_all(paths.user_title_sequences().join("no script")).unwrap();

        let mut manager = TitleSequenceManager::new(paths);
        manager.scan(&BuiltinStrings::new());
        (tmp, manager)
    }

    fn names(manager: &TitleSequenceManager) -> Vec<&str> {
        manager.items().iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_scan_orders_predefined_first() {
        let (_tmp, manager) = setup();
        assert_eq!(
            names(&manager),
            vec!["RollerCoaster Tycoon 1", "OpenRCT2", "Alpha", "zeta"]
        );
        assert!(!manager.get(2).unwrap().is_archive);
    }

    #[test]
    fn test_config_ids() {
        let (_tmp, manager) = setup();
        assert_eq!(manager.find_by_config_id("*openrct2"), Some(1));
        assert_eq!(manager.find_by_config_id("ZETA"), Some(3));
        assert_eq!(manager.find_by_config_id("*RCT2"), None);
        assert_eq!(manager.config_id(0).as_deref(), Some("*RCT1"));
        assert_eq!(manager.config_id(2).as_deref(), Some("Alpha"));
        assert_eq!(manager.config_id(9), None);
    }

    #[test]
    fn test_predefined_is_read_only() {
        let (_tmp, mut manager) = setup();
        assert!(matches!(manager.delete(0), Err(Error::ReadOnly(_))));
        assert!(matches!(manager.rename(1, "x"), Err(Error::ReadOnly(_))));
        assert_eq!(manager.count(), 4);
    }

    #[test]
    fn test_rename_and_delete_custom() {
        let (_tmp, mut manager) = setup();
        let new_path = manager.rename(3, "beta").unwrap();
        assert!(new_path.ends_with("beta.parkseq"));
        assert!(new_path.is_file());
        assert_eq!(names(&manager), vec!["RollerCoaster Tycoon 1", "OpenRCT2", "Alpha", "beta"]);

        manager.delete(2).unwrap();
        assert_eq!(manager.count(), 3);
        assert_eq!(manager.find_by_config_id("Alpha"), None);
    }

    #[test]
    fn test_duplicate_predefined() {
        let (_tmp, mut manager) = setup();
        let index = manager.duplicate(1, "Copy").unwrap();
        let item = manager.get(index).unwrap();
        assert_eq!(item.name, "Copy");
        assert!(!item.is_predefined());
        assert!(item.path.is_file());
        assert!(matches!(manager.duplicate(1, "Copy"), Err(Error::AlreadyExists(_))));
    }
}
