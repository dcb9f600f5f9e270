//! Title sequences on disk.
//!
//! A sequence is either a `.parkseq` zip archive holding `script.txt` and
//! its park files, or a directory holding `script.json` (or `script.txt`)
//! next to its park files.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use super::command::TitleCommand;
use super::script::{parse_json_script, parse_text_script, to_text_script};
use crate::config::scan;
use crate::error::{Error, Result};
use crate::fs::{DirectoryScanner, FilePattern};

const TEXT_SCRIPT: &str = "script.txt";
const JSON_SCRIPT: &str = "script.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSequence {
    pub name: String,
    pub path: PathBuf,
    /// Park file names, in the order `LOAD` indices refer to.
    pub saves: Vec<String>,
    pub commands: Vec<TitleCommand>,
    pub is_archive: bool,
}

fn is_park_file(name: &str) -> bool {
    FilePattern::new("", scan::PARK_FILE_PATTERN).matches(name)
}

fn sequence_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    Ok(ZipArchive::new(File::open(path)?)?)
}

/// Finds an archive entry by name, ignoring case.
fn archive_entry_name(archive: &mut ZipArchive<File>, wanted: &str) -> Result<Option<String>> {
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if !entry.is_dir() && entry.name().eq_ignore_ascii_case(wanted) {
            return Ok(Some(entry.name().to_string()));
        }
    }
    Ok(None)
}

impl TitleSequence {
    /// Loads a sequence from a `.parkseq` archive or a sequence directory.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_directory(path)
        } else {
            Self::load_archive(path)
        }
    }

    fn load_archive(path: &Path) -> Result<Self> {
        let mut archive = open_archive(path)?;
        let mut saves = Vec::new();
        for index in 0..archive.len() {
            let entry = archive.by_index(index)?;
            if !entry.is_dir() && is_park_file(entry.name()) {
                saves.push(entry.name().to_string());
            }
        }

        let script_name = archive_entry_name(&mut archive, TEXT_SCRIPT)?.ok_or_else(|| {
            Error::InvalidFormat(format!("{} has no {}", path.display(), TEXT_SCRIPT))
        })?;
        let mut script = String::new();
        archive.by_name(&script_name)?.read_to_string(&mut script)?;

        let commands = parse_text_script(&script, &saves);
        debug!(
            "Loaded title sequence {} ({} saves, {} commands)",
            path.display(),
            saves.len(),
            commands.len()
        );
        Ok(Self {
            name: sequence_name(path),
            path: path.to_path_buf(),
            saves,
            commands,
            is_archive: true,
        })
    }

    fn load_directory(path: &Path) -> Result<Self> {
        let pattern = FilePattern::new(path, scan::PARK_FILE_PATTERN);
        let saves: Vec<String> = DirectoryScanner::new(pattern, false)
            .map(|file| file.info.name)
            .collect();

        let json_path = path.join(JSON_SCRIPT);
        let text_path = path.join(TEXT_SCRIPT);
        let commands = if json_path.is_file() {
            parse_json_script(&fs::read_to_string(&json_path)?, &saves)?
        } else if text_path.is_file() {
            parse_text_script(&fs::read_to_string(&text_path)?, &saves)
        } else {
            return Err(Error::InvalidFormat(format!(
                "{} has no title script",
                path.display()
            )));
        };

        Ok(Self {
            name: sequence_name(path),
            path: path.to_path_buf(),
            saves,
            commands,
            is_archive: false,
        })
    }

    /// Returns the bytes of the park at `index` in the save list.
    pub fn read_save(&self, index: usize) -> Result<Vec<u8>> {
        let name = self.saves.get(index).ok_or(Error::OutOfRange {
            what: "save",
            index,
            len: self.saves.len(),
        })?;
        if !self.is_archive {
            return Ok(fs::read(self.path.join(name))?);
        }
        let mut archive = open_archive(&self.path)?;
        let mut entry = archive.by_name(name)?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Packs this sequence, with all of its parks, into a `.parkseq` archive.
    pub fn pack(&self, dest: &Path) -> Result<()> {
        let mut parks = Vec::with_capacity(self.saves.len());
        for (index, name) in self.saves.iter().enumerate() {
            parks.push((name.clone(), self.read_save(index)?));
        }
        write_archive(dest, &self.commands, &parks)
    }
}

/// Writes a `.parkseq` archive from a command list and named park files.
pub fn write_archive(dest: &Path, commands: &[TitleCommand], parks: &[(String, Vec<u8>)]) -> Result<()> {
    let saves: Vec<String> = parks.iter().map(|(name, _)| name.clone()).collect();
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = zip::ZipWriter::new(File::create(dest)?);
    let options = zip::write::FileOptions::default();
    writer.start_file(TEXT_SCRIPT, options)?;
    writer.write_all(to_text_script(commands, &saves).as_bytes())?;
    for (name, data) in parks {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(data)?;
    }
    writer.finish()?;
    Ok(())
}
