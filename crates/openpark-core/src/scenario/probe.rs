//! Reads just enough of a scenario file to index it.

use std::fs;
use std::path::Path;

use super::entry::{Objective, ScenarioCategory, ScenarioEntry, ScenarioSource};
use super::sources;
use crate::error::{Error, Result};
use crate::io::sawyer::{ChunkEncoding, SawyerReader, SawyerWriter};
use crate::io::{ByteBuffer, decode_legacy, encode_legacy};
use crate::legacy::LegacyImporter;

const HEADER_SIZE: usize = 0x20;
const INFO_SIZE: usize = 0x198;

const FILE_TYPE_SCENARIO: u8 = 1;

mod info {
    pub const CATEGORY: usize = 0x01;
    pub const OBJECTIVE_TYPE: usize = 0x02;
    pub const OBJECTIVE_ARG1: usize = 0x03;
    pub const OBJECTIVE_ARG2: usize = 0x04;
    pub const OBJECTIVE_ARG3: usize = 0x08;
    pub const NAME: usize = 0x48;
    pub const NAME_LEN: usize = 64;
    pub const DETAILS: usize = 0x88;
    pub const DETAILS_LEN: usize = 256;
}

/// Descriptive block of a scenario, as stored in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioInfo {
    pub category: ScenarioCategory,
    pub objective: Objective,
    pub name: String,
    pub details: String,
}

/// Parses the header and info chunks of a `.sc6` file.
///
/// Returns `Ok(None)` for chunked files that are saved games rather than
/// scenarios.
pub fn read_sc6_info(data: &[u8]) -> Result<Option<ScenarioInfo>> {
    let mut reader = SawyerReader::new(data);
    let header = reader.read_chunk_sized(HEADER_SIZE)?;
    if header[0] != FILE_TYPE_SCENARIO {
        return Ok(None);
    }

    let block = reader.read_chunk_sized(INFO_SIZE)?;
    let buf = ByteBuffer::new(&block);
    Ok(Some(ScenarioInfo {
        category: ScenarioCategory::from_u8(buf.read_u8_at(info::CATEGORY)?),
        objective: Objective {
            kind: buf.read_u8_at(info::OBJECTIVE_TYPE)?,
            arg1: buf.read_u8_at(info::OBJECTIVE_ARG1)?,
            arg2: buf.read_i32_at(info::OBJECTIVE_ARG2)?,
            arg3: buf.read_i16_at(info::OBJECTIVE_ARG3)?,
        },
        name: decode_legacy(buf.slice_at(info::NAME, info::NAME_LEN)?),
        details: decode_legacy(buf.slice_at(info::DETAILS, info::DETAILS_LEN)?),
    }))
}

/// Builds a minimal `.sc6` file carrying `info`.
pub fn encode_sc6_info(info: &ScenarioInfo) -> Vec<u8> {
    let mut header = vec![0u8; HEADER_SIZE];
    header[0] = FILE_TYPE_SCENARIO;

    let mut block = vec![0u8; INFO_SIZE];
    block[info::CATEGORY] = info.category as u8;
    block[info::OBJECTIVE_TYPE] = info.objective.kind;
    block[info::OBJECTIVE_ARG1] = info.objective.arg1;
    block[info::OBJECTIVE_ARG2..info::OBJECTIVE_ARG2 + 4]
        .copy_from_slice(&info.objective.arg2.to_le_bytes());
    block[info::OBJECTIVE_ARG3..info::OBJECTIVE_ARG3 + 2]
        .copy_from_slice(&info.objective.arg3.to_le_bytes());
    block[info::NAME..info::NAME + info::NAME_LEN]
        .copy_from_slice(&encode_legacy(&info.name, info::NAME_LEN));
    block[info::DETAILS..info::DETAILS + info::DETAILS_LEN]
        .copy_from_slice(&encode_legacy(&info.details, info::DETAILS_LEN));

    let mut writer = SawyerWriter::new();
    writer
        .write_chunk(ChunkEncoding::Rle, &header)
        .write_chunk(ChunkEncoding::RleCompressed, &block);
    writer.finish()
}

/// Reads the descriptive block of a scenario file of either format.
pub fn read_scenario_info(path: &Path) -> Result<Option<ScenarioInfo>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "sc6" => read_sc6_info(&fs::read(path)?),
        "sc4" => {
            let mut importer = LegacyImporter::new();
            importer.load_scenario(path)?;
            Ok(Some(importer.get_details()?))
        }
        _ => Err(Error::UnsupportedExtension(ext)),
    }
}

/// Builds the index entry for a scenario file from its info block.
pub fn build_entry(path: &Path, timestamp: u64, info: ScenarioInfo) -> ScenarioEntry {
    let name = sources::normalise_name(&info.name);
    let mut entry = ScenarioEntry {
        path: path.to_path_buf(),
        timestamp,
        category: info.category,
        source_game: ScenarioSource::Other,
        source_index: None,
        scenario_id: None,
        objective: info.objective,
        name: name.clone(),
        internal_name: info.name,
        details: info.details,
    };

    match sources::try_get_by_name(&name) {
        Some(desc) => {
            entry.source_game = desc.source;
            entry.source_index = Some(desc.index);
            entry.category = desc.category;
            entry.scenario_id = desc.id;
        }
        None => {
            entry.source_game = if info.category == ScenarioCategory::Real {
                ScenarioSource::Real
            } else {
                ScenarioSource::Other
            };
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, category: ScenarioCategory) -> ScenarioInfo {
        ScenarioInfo {
            category,
            objective: Objective {
                kind: 1,
                arg1: 3,
                arg2: 250_000,
                arg3: 1200,
            },
            name: name.to_string(),
            details: "Build a park".to_string(),
        }
    }

    #[test]
    fn test_sc6_info_reads_back() {
        let original = info("Crazy Castle", ScenarioCategory::Beginner);
        let file = encode_sc6_info(&original);
        assert_eq!(read_sc6_info(&file).unwrap(), Some(original));
    }

    #[test]
    fn test_saved_game_is_skipped() {
        let mut writer = SawyerWriter::new();
        writer.write_chunk(ChunkEncoding::Rle, &[0u8; HEADER_SIZE]);
        assert_eq!(read_sc6_info(&writer.finish()).unwrap(), None);
    }

    #[test]
    fn test_truncated_file_is_error() {
        assert!(read_sc6_info(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_build_entry_known_scenario() {
        let entry = build_entry(
            Path::new("/s/Forest Frontiers.sc6"),
            7,
            info("RCT1 Forest Frontiers", ScenarioCategory::Other),
        );
        assert_eq!(entry.name, "Forest Frontiers");
        assert_eq!(entry.internal_name, "RCT1 Forest Frontiers");
        assert_eq!(entry.source_game, ScenarioSource::Rct1);
        assert_eq!(entry.source_index, Some(0));
        assert_eq!(entry.category, ScenarioCategory::Beginner);
        assert_eq!(entry.scenario_id, Some(0));
    }

    #[test]
    fn test_build_entry_unknown_real_park() {
        let entry = build_entry(
            Path::new("my.sc6"),
            1,
            info("My Real Park", ScenarioCategory::Real),
        );
        assert_eq!(entry.source_game, ScenarioSource::Real);
        assert_eq!(entry.source_index, None);

        let entry = build_entry(Path::new("b.sc6"), 1, info("Mine", ScenarioCategory::Expert));
        assert_eq!(entry.source_game, ScenarioSource::Other);
        assert_eq!(entry.category, ScenarioCategory::Expert);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            read_scenario_info(Path::new("x.sv6")),
            Err(Error::UnsupportedExtension(_))
        ));
    }
}
