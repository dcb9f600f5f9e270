//! Directory fingerprints used to decide whether a persisted index is stale.

use std::path::Path;

use super::pattern::FilePattern;
use super::scanner::DirectoryScanner;

const PATH_HASH_SEED: u32 = 0xD843_0DED;

/// Aggregate over every file matched by one or more patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryFingerprint {
    pub total_files: u32,
    pub total_file_size: u64,
    pub file_date_modified_checksum: u32,
    pub path_checksum: u32,
}

impl DirectoryFingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one file into the aggregate.
    pub fn add_file(&mut self, path: &Path, size: u64, last_modified: u64) {
        self.total_files = self.total_files.wrapping_add(1);
        self.total_file_size = self.total_file_size.wrapping_add(size);

        let hi = (last_modified >> 32) as u32;
        let lo = last_modified as u32;
        self.file_date_modified_checksum ^= hi ^ lo;
        self.file_date_modified_checksum = self.file_date_modified_checksum.rotate_right(5);

        self.path_checksum = self
            .path_checksum
            .wrapping_add(path_hash(&path.to_string_lossy()));
    }
}

/// Walks `pattern` recursively and folds each match into `fingerprint`.
pub fn query_directory(fingerprint: &mut DirectoryFingerprint, pattern: &FilePattern) {
    for file in DirectoryScanner::new(pattern.clone(), true) {
        fingerprint.add_file(&file.path, file.info.size, file.info.last_modified);
    }
}

/// One-at-a-time hash of a path string.
pub fn path_hash(path: &str) -> u32 {
    let mut hash = PATH_HASH_SEED;
    for &c in path.as_bytes() {
        hash = hash.wrapping_add(c as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn test_path_hash_empty_is_mixed_seed() {
        let mut h = PATH_HASH_SEED;
        h = h.wrapping_add(h << 3);
        h ^= h >> 11;
        h = h.wrapping_add(h << 15);
        assert_eq!(path_hash(""), h);
        assert_ne!(path_hash("a"), path_hash("b"));
    }

    #[test]
    fn test_add_file_rotates_timestamp() {
        let mut fp = DirectoryFingerprint::new();
        fp.add_file(Path::new("x"), 10, 0x1_0000_0020);
        assert_eq!(fp.total_files, 1);
        assert_eq!(fp.total_file_size, 10);
        assert_eq!(fp.file_date_modified_checksum, 0x21u32.rotate_right(5));
    }

    #[test]
    fn test_query_accumulates_across_patterns() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::write(a.path().join("one.td6"), b"abc").unwrap();
        fs::create_dir(b.path().join("nested")).unwrap();
        fs::write(b.path().join("nested/two.TD4"), b"defg").unwrap();
        fs::write(b.path().join("skip.txt"), b"zz").unwrap();

        let mut fp = DirectoryFingerprint::new();
        query_directory(&mut fp, &FilePattern::new(a.path(), "*.td4;*.td6"));
        query_directory(&mut fp, &FilePattern::new(b.path(), "*.td4;*.td6"));
        assert_eq!(fp.total_files, 2);
        assert_eq!(fp.total_file_size, 7);
    }

    #[test]
    fn test_fingerprint_changes_with_mtime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("park.td6");
        fs::write(&path, b"abc").unwrap();
        let pattern = FilePattern::new(tmp.path(), "*.td6");

        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(1_000)).unwrap();
        let mut before = DirectoryFingerprint::new();
        query_directory(&mut before, &pattern);

        file.set_modified(UNIX_EPOCH + Duration::from_secs(2_000)).unwrap();
        let mut after = DirectoryFingerprint::new();
        query_directory(&mut after, &pattern);

        assert_eq!(before.total_files, after.total_files);
        assert_eq!(before.path_checksum, after.path_checksum);
        assert_ne!(
            before.file_date_modified_checksum,
            after.file_date_modified_checksum
        );
    }
}
