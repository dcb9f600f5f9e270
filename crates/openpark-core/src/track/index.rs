//! Persisted track design index.
//!
//! The file stores the directory fingerprint it was built from. A cache is
//! only reused when the header and fingerprint match exactly; otherwise the
//! whole file is discarded.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::item::TrackRepositoryItem;
use crate::config::track_index::{MAGIC, VERSION};
use crate::error::{Error, Result};
use crate::fs::DirectoryFingerprint;
use crate::io::{ByteBuffer, ByteWriter};

pub fn encode_index(fingerprint: &DirectoryFingerprint, items: &[TrackRepositoryItem]) -> Vec<u8> {
    let mut out = ByteWriter::new();
    out.write_u32(MAGIC)
        .write_u16(VERSION)
        .write_u32(fingerprint.total_files)
        .write_u64(fingerprint.total_file_size)
        .write_u32(fingerprint.file_date_modified_checksum)
        .write_u32(fingerprint.path_checksum)
        .write_u32(items.len() as u32);
    for item in items {
        out.write_string(&item.name)
            .write_string(&item.path.to_string_lossy())
            .write_u8(item.ride_type)
            .write_string(&item.object_entry)
            .write_u32(item.flags);
    }
    out.into_bytes()
}

/// Parses an index, returning `Ok(None)` when the header or fingerprint
/// does not match `expected`.
pub fn decode_index(
    data: &[u8],
    expected: &DirectoryFingerprint,
) -> Result<Option<Vec<TrackRepositoryItem>>> {
    let mut buf = ByteBuffer::new(data);
    let magic = buf.read_u32()?;
    let version = buf.read_u16()?;
    if magic != MAGIC || version != VERSION {
        debug!("Track index header mismatch: magic {:#x}, version {}", magic, version);
        return Ok(None);
    }

    let stored = DirectoryFingerprint {
        total_files: buf.read_u32()?,
        total_file_size: buf.read_u64()?,
        file_date_modified_checksum: buf.read_u32()?,
        path_checksum: buf.read_u32()?,
    };
    if stored != *expected {
        debug!("Track index is stale");
        return Ok(None);
    }

    // Unreadable designs are left out, so the count may be below total_files.
    let count = buf.read_u32()?;
    if count > expected.total_files {
        return Err(Error::InvalidFormat(format!(
            "Track index lists {} items for {} files",
            count, expected.total_files
        )));
    }

    let mut items = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        items.push(TrackRepositoryItem {
            name: buf.read_string()?,
            path: PathBuf::from(buf.read_string()?),
            ride_type: buf.read_u8()?,
            object_entry: buf.read_string()?,
            flags: buf.read_u32()?,
        });
    }
    Ok(Some(items))
}

/// Loads the cached items if `path` holds an index for `fingerprint`.
///
/// Read and parse failures are logged and reported as a cache miss.
pub fn load_index(path: &Path, fingerprint: &DirectoryFingerprint) -> Option<Vec<TrackRepositoryItem>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            debug!("No track index at {}: {}", path.display(), e);
            return None;
        }
    };
    match decode_index(&data, fingerprint) {
        Ok(items) => items,
        Err(e) => {
            warn!("Unable to read track index {}: {}", path.display(), e);
            None
        }
    }
}

pub fn save_index(
    path: &Path,
    fingerprint: &DirectoryFingerprint,
    items: &[TrackRepositoryItem],
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, encode_index(fingerprint, items))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint() -> DirectoryFingerprint {
        DirectoryFingerprint {
            total_files: 2,
            total_file_size: 4096,
            file_date_modified_checksum: 0xABCD,
            path_checksum: 0x1234,
        }
    }

    fn items() -> Vec<TrackRepositoryItem> {
        vec![
            TrackRepositoryItem {
                name: "Loop".to_string(),
                path: PathBuf::from("/d/Loop.td6"),
                ride_type: 15,
                object_entry: "SCHT1".to_string(),
                flags: TrackRepositoryItem::READ_ONLY,
            },
            TrackRepositoryItem {
                name: "Maze".to_string(),
                path: PathBuf::from("/u/Maze.td4"),
                ride_type: 20,
                object_entry: "HMAZE".to_string(),
                flags: 0,
            },
        ]
    }

    #[test]
    fn test_index_reads_back() {
        let data = encode_index(&fingerprint(), &items());
        assert_eq!(decode_index(&data, &fingerprint()).unwrap(), Some(items()));
    }

    #[test]
    fn test_each_fingerprint_field_invalidates() {
        let data = encode_index(&fingerprint(), &items());
        let variants = [
            DirectoryFingerprint { total_files: 3, ..fingerprint() },
            DirectoryFingerprint { total_file_size: 1, ..fingerprint() },
            DirectoryFingerprint { file_date_modified_checksum: 1, ..fingerprint() },
            DirectoryFingerprint { path_checksum: 1, ..fingerprint() },
        ];
        for fp in variants {
            assert_eq!(decode_index(&data, &fp).unwrap(), None);
        }
    }

    #[test]
    fn test_bad_header_is_miss() {
        let mut data = encode_index(&fingerprint(), &items());
        data[4] = 9;
        assert_eq!(decode_index(&data, &fingerprint()).unwrap(), None);
        data[0] = 0;
        assert_eq!(decode_index(&data, &fingerprint()).unwrap(), None);
    }

    #[test]
    fn test_truncated_index_is_miss() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tracks.idx");
        let data = encode_index(&fingerprint(), &items());
        fs::write(&path, &data[..data.len() - 3]).unwrap();
        assert_eq!(load_index(&path, &fingerprint()), None);
        assert_eq!(load_index(&tmp.path().join("missing.idx"), &fingerprint()), None);
    }
}
