//! Owner of the content repositories for one running game.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::legacy::{ImportTarget, LegacyImporter};
use crate::object::{ObjectManager, StringTable};
use crate::scenario::ScenarioRepository;
use crate::theme::ThemeManager;
use crate::title::{ParkHost, TitleSequenceManager, TitleSequencePlayer};
use crate::track::TrackDesignRepository;

pub struct AppContext {
    config: Config,
    objects: Box<dyn ObjectManager>,
    strings: Box<dyn StringTable>,
    scenarios: ScenarioRepository,
    tracks: TrackDesignRepository,
    title_sequences: TitleSequenceManager,
    themes: ThemeManager,
}

impl AppContext {
    pub fn new(
        config: Config,
        objects: Box<dyn ObjectManager>,
        strings: Box<dyn StringTable>,
    ) -> Self {
        let paths = config.paths();
        Self {
            scenarios: ScenarioRepository::new(paths.clone(), config.scenario.sort_mode),
            tracks: TrackDesignRepository::new(paths.clone()),
            title_sequences: TitleSequenceManager::new(paths.clone()),
            themes: ThemeManager::new(paths),
            config,
            objects,
            strings,
        }
    }

    /// Scans every repository. Scenarios go first since title sequences
    /// resolve their parks through the scenario list at playback time.
    pub fn scan_all(&mut self) {
        self.scenarios.scan();
        self.tracks.scan();
        self.title_sequences.scan(self.strings.as_ref());
        self.themes.scan(self.strings.as_ref());
        info!(
            "Scanned {} scenarios, {} tracks, {} title sequences, {} themes",
            self.scenarios.count(),
            self.tracks.count(),
            self.title_sequences.count(),
            self.themes.count()
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scenarios(&self) -> &ScenarioRepository {
        &self.scenarios
    }

    pub fn scenarios_mut(&mut self) -> &mut ScenarioRepository {
        &mut self.scenarios
    }

    pub fn tracks(&self) -> &TrackDesignRepository {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut TrackDesignRepository {
        &mut self.tracks
    }

    pub fn title_sequences(&self) -> &TitleSequenceManager {
        &self.title_sequences
    }

    pub fn title_sequences_mut(&mut self) -> &mut TitleSequenceManager {
        &mut self.title_sequences
    }

    pub fn themes(&self) -> &ThemeManager {
        &self.themes
    }

    pub fn themes_mut(&mut self) -> &mut ThemeManager {
        &mut self.themes
    }

    pub fn objects(&self) -> &dyn ObjectManager {
        self.objects.as_ref()
    }

    pub fn strings(&self) -> &dyn StringTable {
        self.strings.as_ref()
    }

    /// Imports a legacy park with a fresh importer using the configured
    /// import settings.
    pub fn import_legacy(&mut self, path: &Path) -> Result<ImportTarget> {
        let mut importer = LegacyImporter::with_settings(self.config.import.clone());
        importer.load(path)?;
        importer.import(self.objects.as_mut())
    }

    /// Starts a title player on the configured default sequence, falling
    /// back to the first one.
    pub fn start_title<H: ParkHost>(&self, host: H) -> TitleSequencePlayer<H> {
        let mut player = TitleSequencePlayer::new(host);
        let index = self
            .title_sequences
            .find_by_config_id(&self.config.title.default_sequence)
            .unwrap_or(0);
        player.begin(&self.title_sequences, index);
        player
    }
}
