//! Scenario index entries and highscore records.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{EnumIter, FromRepr, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, IntoStaticStr, EnumIter,
    Serialize,
)]
#[repr(u8)]
pub enum ScenarioCategory {
    Beginner = 0,
    Challenging = 1,
    Expert = 2,
    Real = 3,
    Other = 4,
    Dlc = 5,
    BuildYourOwn = 6,
}

impl ScenarioCategory {
    /// Converts a stored category byte; unknown values read as `Other`.
    pub fn from_u8(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(ScenarioCategory::Other)
    }

    /// Primary key of the category sort: DLC first, build-your-own second,
    /// then the numeric category.
    pub fn sort_rank(&self) -> u8 {
        match self {
            ScenarioCategory::Dlc => 0,
            ScenarioCategory::BuildYourOwn => 1,
            other => *other as u8 + 2,
        }
    }
}

impl fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScenarioCategory::Beginner => "Beginner",
            ScenarioCategory::Challenging => "Challenging",
            ScenarioCategory::Expert => "Expert",
            ScenarioCategory::Real => "Real",
            ScenarioCategory::Other => "Other",
            ScenarioCategory::Dlc => "DLC",
            ScenarioCategory::BuildYourOwn => "Build your own",
        };
        write!(f, "{}", s)
    }
}

/// The release a scenario originally shipped with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, IntoStaticStr, EnumIter,
    Serialize,
)]
#[repr(u8)]
pub enum ScenarioSource {
    Rct1 = 0,
    Rct1Aa = 1,
    Rct1Ll = 2,
    Rct2 = 3,
    Rct2Ww = 4,
    Rct2Tt = 5,
    Real = 6,
    Other = 7,
}

impl ScenarioSource {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            ScenarioSource::Rct1 => "RCT1",
            ScenarioSource::Rct1Aa => "RCT1 AA",
            ScenarioSource::Rct1Ll => "RCT1 LL",
            ScenarioSource::Rct2 => "RCT2",
            ScenarioSource::Rct2Ww => "RCT2 WW",
            ScenarioSource::Rct2Tt => "RCT2 TT",
            ScenarioSource::Real => "Real",
            ScenarioSource::Other => "Other",
        }
    }
}

impl fmt::Display for ScenarioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Objective {
    pub kind: u8,
    pub arg1: u8,
    pub arg2: i32,
    pub arg3: i16,
}

/// One indexed scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioEntry {
    pub path: PathBuf,
    /// Last-modified time in seconds since the Unix epoch.
    pub timestamp: u64,
    pub category: ScenarioCategory,
    pub source_game: ScenarioSource,
    /// Position in the known-scenario list; `None` when unidentified.
    pub source_index: Option<u16>,
    /// Legacy scenario id, for scenarios that have one.
    pub scenario_id: Option<u8>,
    pub objective: Objective,
    /// Display name after normalisation.
    pub name: String,
    /// Name as stored in the file.
    pub internal_name: String,
    pub details: String,
}

impl ScenarioEntry {
    /// Bare file name, the key scenarios are deduplicated and scored by.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    pub fn is_identified(&self) -> bool {
        self.source_index.is_some()
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Best company value recorded for a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighscoreEntry {
    pub file_name: String,
    /// `None` until the record is claimed by a player.
    pub name: Option<String>,
    pub company_value: i32,
    /// `None` for records merged from legacy score files.
    pub timestamp: Option<DateTime<Utc>>,
}

impl HighscoreEntry {
    pub fn is_claimed(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_category_rank_order() {
        let mut cats: Vec<_> = ScenarioCategory::iter().collect();
        cats.sort_by_key(|c| c.sort_rank());
        assert_eq!(
            cats,
            vec![
                ScenarioCategory::Dlc,
                ScenarioCategory::BuildYourOwn,
                ScenarioCategory::Beginner,
                ScenarioCategory::Challenging,
                ScenarioCategory::Expert,
                ScenarioCategory::Real,
                ScenarioCategory::Other,
            ]
        );
    }

    #[test]
    fn test_category_from_unknown_byte() {
        assert_eq!(ScenarioCategory::from_u8(2), ScenarioCategory::Expert);
        assert_eq!(ScenarioCategory::from_u8(200), ScenarioCategory::Other);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(ScenarioSource::Rct1Ll.to_string(), "RCT1 LL");
        assert_eq!(ScenarioSource::from_u8(5), Some(ScenarioSource::Rct2Tt));
        assert_eq!(ScenarioSource::from_u8(8), None);
    }

    #[test]
    fn test_highscore_claimed() {
        let mut hs = HighscoreEntry {
            file_name: "Z.sc6".to_string(),
            name: None,
            company_value: 1,
            timestamp: None,
        };
        assert!(!hs.is_claimed());
        hs.name = Some(String::new());
        assert!(!hs.is_claimed());
        hs.name = Some("Ann".to_string());
        assert!(hs.is_claimed());
    }
}
