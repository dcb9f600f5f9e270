//! Directory scanning.
//!
//! `DirectoryScanner` walks a directory depth-first and yields every file
//! whose leaf name matches a [`FilePattern`]. Inside one directory the files
//! come first, then the subdirectories, each group in case-insensitive name
//! order. An entry that cannot be read (permission denied, removed
//! mid-scan) is skipped with a warning and the walk carries on with the rest
//! of the tree. A missing root directory is an empty scan.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::pattern::FilePattern;

/// Metadata reported for each scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Seconds since the Unix epoch.
    pub last_modified: u64,
}

impl FileInfo {
    /// Reads metadata for a single path.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: meta.len(),
            last_modified: modified_secs(&meta),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub info: FileInfo,
}

/// Iterator over the files matching a pattern.
pub struct DirectoryScanner {
    pattern: FilePattern,
    recurse: bool,
    walk: walkdir::IntoIter,
}

/// Starts a scan of `pattern` (`<dir>/<wildcard>[;<wildcard>...]`).
pub fn scan_directory(pattern: &str, recurse: bool) -> DirectoryScanner {
    DirectoryScanner::new(FilePattern::parse(pattern), recurse)
}

impl DirectoryScanner {
    pub fn new(pattern: FilePattern, recurse: bool) -> Self {
        let walk = walk(pattern.dir(), recurse);
        Self {
            pattern,
            recurse,
            walk,
        }
    }

    pub fn pattern(&self) -> &FilePattern {
        &self.pattern
    }

    /// Restarts the walk from the pattern's root directory.
    pub fn reset(&mut self) {
        self.walk = walk(self.pattern.dir(), self.recurse);
    }

    fn accept(&self, entry: &DirEntry) -> Option<ScannedFile> {
        if !entry.file_type().is_file() {
            return None;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        // Platform listings may over-match; the leaf name is the authority.
        if !self.pattern.matches(&name) {
            return None;
        }
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                return None;
            }
        };
        Some(ScannedFile {
            path: entry.path().to_path_buf(),
            info: FileInfo {
                name,
                size: meta.len(),
                last_modified: modified_secs(&meta),
            },
        })
    }
}

impl Iterator for DirectoryScanner {
    type Item = ScannedFile;

    fn next(&mut self) -> Option<ScannedFile> {
        loop {
            match self.walk.next()? {
                Ok(entry) => {
                    if let Some(file) = self.accept(&entry) {
                        return Some(file);
                    }
                }
                // A missing root is an empty scan.
                Err(e) if e.depth() == 0 => debug!("Nothing to scan: {}", e),
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }
    }
}

fn walk(root: &Path, recurse: bool) -> walkdir::IntoIter {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(if recurse { usize::MAX } else { 1 })
        .follow_links(true)
        .sort_by(files_then_dirs)
        .into_iter()
}

fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| {
            let a = a.file_name().to_string_lossy().to_lowercase();
            let b = b.file_name().to_string_lossy().to_lowercase();
            a.cmp(&b)
        })
}

fn modified_secs(meta: &fs::Metadata) -> u64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str, contents: &[u8]) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn names(scanner: DirectoryScanner) -> Vec<String> {
        scanner.map(|f| f.info.name).collect()
    }

    #[test]
    fn test_scan_non_recursive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.td6", b"1");
        touch(tmp.path(), "A.TD4", b"22");
        touch(tmp.path(), "notes.txt", b"");
        touch(tmp.path(), "sub/c.td6", b"");

        let pattern = format!("{}/*.td4;*.td6", tmp.path().display());
        assert_eq!(names(scan_directory(&pattern, false)), vec!["A.TD4", "b.td6"]);
    }

    #[test]
    fn test_scan_recursive_depth_first() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "z.sc6", b"");
        touch(tmp.path(), "a/one.sc6", b"");
        touch(tmp.path(), "a/deep/two.sc6", b"");
        touch(tmp.path(), "b/three.sc6", b"");

        let scanner = DirectoryScanner::new(FilePattern::new(tmp.path(), "*.sc6"), true);
        assert_eq!(names(scanner), vec!["z.sc6", "one.sc6", "two.sc6", "three.sc6"]);
    }

    #[test]
    fn test_matching_directory_is_descended_not_listed() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Folder.td6/inner.td6", b"");
        touch(tmp.path(), "top.td6", b"");

        let pattern = format!("{}/*.td6", tmp.path().display());
        assert_eq!(names(scan_directory(&pattern, false)), vec!["top.td6"]);
        assert_eq!(names(scan_directory(&pattern, true)), vec!["top.td6", "inner.td6"]);
    }

    #[test]
    fn test_scan_reports_size() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "park.sv4", b"12345");

        let mut scanner = DirectoryScanner::new(FilePattern::new(tmp.path(), "*.sv4"), false);
        let file = scanner.next().unwrap();
        assert_eq!(file.info.size, 5);
        assert!(file.info.last_modified > 0);
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let scanner =
            DirectoryScanner::new(FilePattern::new(tmp.path().join("absent"), "*"), true);
        assert_eq!(scanner.count(), 0);
    }

    #[test]
    fn test_reset_restarts_walk() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "one.parkseq", b"");

        let mut scanner =
            DirectoryScanner::new(FilePattern::new(tmp.path(), "*.parkseq"), true);
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        scanner.reset();
        assert!(scanner.next().is_some());
    }
}
