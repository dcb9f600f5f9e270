//! Highscore persistence.
//!
//! The current file is `u32 version | u32 count` followed by
//! `{ str file_name | str? name | i32 company_value | i64 timestamp }` records.
//! Timestamps are Unix seconds; `i64::MIN` marks an unknown achievement time.
//!
//! Scores from the original game live in a fixed-record legacy file that is
//! merged on top of the current list after every load.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::entry::HighscoreEntry;
use crate::config::highscores::{UNKNOWN_TIMESTAMP, VERSION};
use crate::error::{Error, Result};
use crate::io::{ByteBuffer, ByteWriter, decode_legacy, encode_legacy};

/// Legacy scores file layout: a 16-byte header ending in the record count,
/// then one 0x2B0-byte scenario record per installed scenario.
pub mod legacy {
    pub const HEADER_SIZE: usize = 16;
    pub const RECORD_SIZE: usize = 0x2B0;

    pub const PATH: usize = 0x000;
    pub const PATH_LEN: usize = 256;
    pub const CATEGORY: usize = 0x100;
    pub const OBJECTIVE_TYPE: usize = 0x120;
    pub const OBJECTIVE_ARG_1: usize = 0x121;
    pub const OBJECTIVE_ARG_2: usize = 0x122;
    pub const OBJECTIVE_ARG_3: usize = 0x126;
    pub const NAME: usize = 0x128;
    pub const NAME_LEN: usize = 64;
    pub const DETAILS: usize = 0x168;
    pub const DETAILS_LEN: usize = 256;
    pub const FLAGS: usize = 0x268;
    pub const COMPANY_VALUE: usize = 0x26C;
    pub const COMPLETED_BY: usize = 0x270;
    pub const COMPLETED_BY_LEN: usize = 64;

    pub const FLAG_COMPLETED: i32 = 1 << 1;
}

/// One record of the legacy scores file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyScore {
    pub path: String,
    pub completed: bool,
    pub company_value: i32,
    pub completed_by: String,
}

/// The flat list of highscores, keyed by scenario file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighscoreTable {
    entries: Vec<HighscoreEntry>,
}

impl HighscoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Finds the highscore for a scenario file name, ignoring case.
    pub fn find(&self, file_name: &str) -> Option<&HighscoreEntry> {
        self.entries
            .iter()
            .find(|h| h.file_name.eq_ignore_ascii_case(file_name))
    }

    fn find_mut(&mut self, file_name: &str) -> Option<&mut HighscoreEntry> {
        self.entries
            .iter_mut()
            .find(|h| h.file_name.eq_ignore_ascii_case(file_name))
    }

    /// Applies a scenario completion. Returns true if the table changed.
    ///
    /// A result is recorded when there is no record yet, when it beats the
    /// record, or when it equals an unclaimed record.
    pub fn try_record(&mut self, file_name: &str, company_value: i32, name: Option<&str>) -> bool {
        let now = Utc::now();
        match self.find_mut(file_name) {
            None => {
                self.entries.push(HighscoreEntry {
                    file_name: file_name.to_string(),
                    name: name.map(str::to_string),
                    company_value,
                    timestamp: Some(now),
                });
                true
            }
            Some(existing) => {
                let beats = company_value > existing.company_value;
                let claims = company_value == existing.company_value && !existing.is_claimed();
                if !beats && !claims {
                    return false;
                }
                if existing.is_claimed() {
                    existing.timestamp = Some(now);
                }
                existing.name = name.map(str::to_string);
                existing.company_value = company_value;
                true
            }
        }
    }

    /// Replaces the table with the contents of a highscore file.
    ///
    /// A missing file leaves the table untouched. A version mismatch is
    /// logged and also leaves the table untouched.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            debug!("No highscore file at {}", path.display());
            return Ok(());
        }
        let data = fs::read(path)?;
        let mut buf = ByteBuffer::new(&data);
        let version = buf.read_u32()?;
        if version != VERSION {
            error!(
                "Invalid or incompatible highscores file {} (version {})",
                path.display(),
                version
            );
            return Ok(());
        }

        let count = buf.read_u32()?;
        let mut entries = Vec::with_capacity(count.min(4096) as usize);
        for _ in 0..count {
            let file_name = buf.read_string()?;
            let name = buf.read_opt_string()?;
            let company_value = buf.read_i32()?;
            let raw_timestamp = buf.read_i64()?;
            entries.push(HighscoreEntry {
                file_name,
                name,
                company_value,
                timestamp: timestamp_from_raw(raw_timestamp),
            });
        }
        self.entries = entries;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = ByteWriter::new();
        out.write_u32(VERSION).write_u32(self.entries.len() as u32);
        for h in &self.entries {
            out.write_string(&h.file_name)
                .write_opt_string(h.name.as_deref())
                .write_i32(h.company_value)
                .write_i64(h.timestamp.map(|t| t.timestamp()).unwrap_or(UNKNOWN_TIMESTAMP));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, out.into_bytes())?;
        Ok(())
    }

    /// Merges completed records of a legacy scores file.
    ///
    /// Missing files and files of four bytes or fewer are skipped silently.
    /// Returns the number of records that changed the table.
    pub fn merge_legacy_file(&mut self, path: &Path) -> Result<usize> {
        let Ok(meta) = fs::metadata(path) else {
            return Ok(0);
        };
        if meta.len() <= 4 {
            return Ok(0);
        }
        let scores = read_legacy_scores(&fs::read(path)?)?;
        let merged = self.merge_legacy(&scores);
        info!("Merged {} legacy highscores from {}", merged, path.display());
        Ok(merged)
    }

    pub fn merge_legacy(&mut self, scores: &[LegacyScore]) -> usize {
        let mut merged = 0;
        for score in scores.iter().filter(|s| s.completed) {
            let file_name = base_name(&score.path);
            let name = Some(score.completed_by.clone()).filter(|n| !n.is_empty());
            match self.find_mut(&file_name) {
                Some(existing) => {
                    if score.company_value > existing.company_value {
                        existing.name = name;
                        existing.company_value = score.company_value;
                        existing.timestamp = None;
                        merged += 1;
                    }
                }
                None => {
                    self.entries.push(HighscoreEntry {
                        file_name,
                        name,
                        company_value: score.company_value,
                        timestamp: None,
                    });
                    merged += 1;
                }
            }
        }
        merged
    }
}

fn timestamp_from_raw(raw: i64) -> Option<DateTime<Utc>> {
    if raw == UNKNOWN_TIMESTAMP {
        None
    } else {
        DateTime::from_timestamp(raw, 0)
    }
}

/// Last component of a legacy path, which may use either separator.
fn base_name(path: &str) -> String {
    path.rsplit(['\\', '/']).next().unwrap_or(path).to_string()
}

/// Parses the records of a legacy scores file.
///
/// A file shorter than its declared record count yields the complete records
/// it does contain.
pub fn read_legacy_scores(data: &[u8]) -> Result<Vec<LegacyScore>> {
    let buf = ByteBuffer::new(data);
    if buf.len() < legacy::HEADER_SIZE {
        return Err(Error::InvalidFormat(
            "Legacy scores header truncated".to_string(),
        ));
    }
    let count = buf.read_u32_at(12)? as usize;

    let mut scores = Vec::new();
    for i in 0..count {
        let base = legacy::HEADER_SIZE + i * legacy::RECORD_SIZE;
        let Ok(record) = buf.slice_at(base, legacy::RECORD_SIZE) else {
            warn!(
                "Legacy scores file declares {} records but holds only {}",
                count, i
            );
            break;
        };
        let rec = ByteBuffer::new(record);
        scores.push(LegacyScore {
            path: decode_legacy(rec.slice_at(legacy::PATH, legacy::PATH_LEN)?),
            completed: rec.read_i32_at(legacy::FLAGS)? & legacy::FLAG_COMPLETED != 0,
            company_value: rec.read_i32_at(legacy::COMPANY_VALUE)?,
            completed_by: decode_legacy(
                rec.slice_at(legacy::COMPLETED_BY, legacy::COMPLETED_BY_LEN)?,
            ),
        });
    }
    Ok(scores)
}

/// Writes a legacy scores file, used to build fixtures and by migration tools.
pub fn encode_legacy_scores(scores: &[LegacyScore]) -> Vec<u8> {
    let mut out = ByteWriter::new();
    out.write_u32(0).write_u32(0).write_u32(0).write_u32(scores.len() as u32);
    for score in scores {
        let mut record = vec![0u8; legacy::RECORD_SIZE];
        record[legacy::PATH..legacy::PATH + legacy::PATH_LEN]
            .copy_from_slice(&encode_legacy(&score.path, legacy::PATH_LEN));
        let flags = if score.completed {
            legacy::FLAG_COMPLETED
        } else {
            0
        };
        record[legacy::FLAGS..legacy::FLAGS + 4].copy_from_slice(&flags.to_le_bytes());
        record[legacy::COMPANY_VALUE..legacy::COMPANY_VALUE + 4]
            .copy_from_slice(&score.company_value.to_le_bytes());
        record[legacy::COMPLETED_BY..legacy::COMPLETED_BY + legacy::COMPLETED_BY_LEN]
            .copy_from_slice(&encode_legacy(&score.completed_by, legacy::COMPLETED_BY_LEN));
        out.write_bytes(&record);
    }
    out.into_bytes()
}
