//! Configuration and tuning constants.
//!
//! This module contains:
//! - `Config` - user settings persisted as TOML
//! - `Paths` - every directory and file the repositories read or write
//! - Scan pattern, index format, and playback constants

mod paths;

pub use paths::Paths;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File-scan patterns.
pub mod scan {
    /// Scenario files probed by the scenario repository.
    pub const SCENARIO_PATTERN: &str = "*.sc4;*.sc6";

    /// Track design files indexed by the track repository.
    pub const TRACK_PATTERN: &str = "*.td4;*.td6";

    /// Packaged title sequences.
    pub const TITLE_SEQUENCE_PATTERN: &str = "*.parkseq";

    /// Park files that can be referenced from a title sequence script.
    pub const PARK_FILE_PATTERN: &str = "*.sv4;*.sv6;*.sc4;*.sc6";

    /// Theme files.
    pub const THEME_PATTERN: &str = "*.json";

    /// Object files read by the object catalog.
    pub const OBJECT_PATTERN: &str = "*.dat";
}

/// Track design index file format.
pub mod track_index {
    /// "TIDX" little-endian.
    pub const MAGIC: u32 = 0x5844_4954;

    pub const VERSION: u16 = 1;
}

/// Highscore file format.
pub mod highscores {
    pub const VERSION: u32 = 1;

    /// Timestamp written for records whose achievement time is unknown.
    pub const UNKNOWN_TIMESTAMP: i64 = i64::MIN;
}

/// Title sequence playback.
pub mod title {
    /// Simulation ticks per second of WAIT time.
    pub const TICKS_PER_SECOND: u32 = 40;

    /// Map tile the view centres on when nothing is playing.
    pub const IDLE_VIEW_TILE: (i32, i32) = (75, 75);

    /// Height (in land units) of the idle view.
    pub const IDLE_VIEW_HEIGHT: i32 = 16;

    /// Upper bound on simulated ticks during a seek.
    pub const MAX_SEEK_TICKS: u32 = 40 * 60 * 10;

    pub const MIN_SPEED: u8 = 1;
    pub const MAX_SPEED: u8 = 4;
}

/// Legacy park import.
pub mod import {
    /// Map size used when a legacy file declares zero.
    pub const DEFAULT_MAP_SIZE: u16 = 128;

    /// Maximum park entrances carried over.
    pub const MAX_PARK_ENTRANCES: usize = 4;

    /// Game version numbers separating the three legacy releases.
    pub const VERSION_ADDED_ATTRACTIONS: u32 = 110_000;
    pub const VERSION_LOOPY_LANDSCAPES: u32 = 120_000;
}

/// How the scenario list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioSortMode {
    #[default]
    Category,
    Origin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Read-only game data (built-in scenarios, tracks, title sequences).
    pub data_dir: PathBuf,
    /// User-writable content.
    pub user_dir: PathBuf,
    /// Optional install of the original game, source of its bundled scores file.
    pub legacy_dir: Option<PathBuf>,
}

impl Default for PathSettings {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: base.join("openpark").join("data"),
            user_dir: base.join("openpark"),
            legacy_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    pub sort_mode: ScenarioSortMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleSettings {
    /// Config id of the sequence shown at startup.
    pub default_sequence: String,
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            default_sequence: "*OPENRCT2".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Patch known land-ownership mistakes in the shipped legacy scenarios.
    pub fix_land_ownership: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            fix_land_ownership: true,
        }
    }
}

/// Top-level user configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathSettings,
    pub scenario: ScenarioSettings,
    pub title: TitleSettings,
    pub import: ImportSettings,
}

impl Config {
    /// Loads a TOML config file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Config rooted at explicit directories, used by tests and portable installs.
    pub fn with_dirs(data_dir: impl Into<PathBuf>, user_dir: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathSettings {
                data_dir: data_dir.into(),
                user_dir: user_dir.into(),
                legacy_dir: None,
            },
            ..Self::default()
        }
    }

    pub fn paths(&self) -> Paths {
        Paths::new(&self.paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_track_index_constants() {
        assert_eq!(&track_index::MAGIC.to_le_bytes(), b"TIDX");
        assert_eq!(track_index::VERSION, 1);
    }

    #[test]
    fn test_title_constants() {
        assert_eq!(title::TICKS_PER_SECOND, 40);
        assert!(title::MIN_SPEED <= title::MAX_SPEED);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scenario]
            sort_mode = "origin"
            "#,
        )
        .unwrap();
        assert_eq!(config.scenario.sort_mode, ScenarioSortMode::Origin);
        assert_eq!(config.title.default_sequence, "*OPENRCT2");
        assert!(config.import.fix_land_ownership);
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("conf/openpark.toml");
        let mut config = Config::with_dirs(tmp.path().join("data"), tmp.path().join("user"));
        config.paths.legacy_dir = Some(tmp.path().join("rct1"));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "scenario = [").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(crate::Error::ConfigParseError(_))
        ));
    }
}
