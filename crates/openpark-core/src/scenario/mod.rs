//! Scenario index, known-scenario tables, and highscores.

mod entry;
pub mod highscores;
mod probe;
mod repository;
pub mod sources;

pub use entry::{HighscoreEntry, Objective, ScenarioCategory, ScenarioEntry, ScenarioSource};
pub use highscores::{HighscoreTable, LegacyScore};
pub use probe::{ScenarioInfo, build_entry, encode_sc6_info, read_sc6_info, read_scenario_info};
pub use repository::{ScenarioRepository, compare};
pub use sources::SourceDesc;
