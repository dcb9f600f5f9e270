//! CLI argument definitions for openpark.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "openpark")]
#[command(about = "Park content repositories and legacy park importer", version)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, env = "OPENPARK_CONFIG", default_value = "openpark.toml")]
    pub config: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List scenarios with their highscores
    Scenarios {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a scenario completion
    RecordHighscore {
        /// Scenario file name, e.g. "Forest Frontiers.SC6"
        file: String,
        /// Company value reached
        value: i32,
        /// Name of the player
        #[arg(long)]
        name: Option<String>,
    },
    /// List track designs
    Tracks {
        /// Only designs for this ride type
        #[arg(long)]
        ride_type: Option<u8>,
        /// Only designs for this vehicle object
        #[arg(long)]
        entry: Option<String>,
    },
    /// Copy a track design into the user track directory
    InstallTrack { path: PathBuf },
    /// Rename a user track design
    RenameTrack { path: PathBuf, name: String },
    /// Delete a user track design
    DeleteTrack { path: PathBuf },
    /// List title sequences
    Titles,
    /// Print the commands of a title sequence
    TitleScript {
        index: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pack a title sequence directory into an archive
    PackTitle { dir: PathBuf, output: PathBuf },
    /// Import a legacy park (.sv4 or .sc4)
    Import {
        path: PathBuf,
        /// Output the imported park as JSON
        #[arg(long)]
        json: bool,
    },
    /// List themes
    Themes,
    /// Legacy park utilities
    Legacy {
        #[command(subcommand)]
        command: LegacyCommand,
    },
}

#[derive(Subcommand)]
pub enum LegacyCommand {
    /// Write an empty legacy park file
    NewFixture {
        output: PathBuf,
        /// Embedded game version
        #[arg(long, default_value = "120001")]
        game_version: u32,
        /// Scenario name stored in the header
        #[arg(long)]
        name: Option<String>,
    },
}
