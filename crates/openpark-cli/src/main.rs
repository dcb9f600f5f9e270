mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command, LegacyCommand};
use openpark_core::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("openpark={}", level).parse()?)
                .add_directive(format!("openpark_core={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load(&args.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", args.config);
            c
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };

    match args.command {
        Command::Scenarios { json } => commands::scenarios::list(config, json),
        Command::RecordHighscore { file, value, name } => {
            commands::scenarios::record_highscore(config, &file, value, name.as_deref())
        }
        Command::Tracks { ride_type, entry } => {
            commands::tracks::list(config, ride_type, entry.as_deref())
        }
        Command::InstallTrack { path } => commands::tracks::install(config, &path),
        Command::RenameTrack { path, name } => commands::tracks::rename(config, &path, &name),
        Command::DeleteTrack { path } => commands::tracks::delete(config, &path),
        Command::Titles => commands::titles::list(config),
        Command::TitleScript { index, json } => commands::titles::script(config, index, json),
        Command::PackTitle { dir, output } => commands::titles::pack(&dir, &output),
        Command::Import { path, json } => commands::import::run(config, &path, json),
        Command::Themes => commands::themes::list(config),
        Command::Legacy {
            command:
                LegacyCommand::NewFixture {
                    output,
                    game_version,
                    name,
                },
        } => commands::legacy::new_fixture(&output, game_version, name.as_deref()),
    }
}
