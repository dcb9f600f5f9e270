//! Scenario index with highscores.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::entry::{
    HighscoreEntry, ScenarioCategory, ScenarioEntry, ScenarioSource, file_name_of,
};
use super::highscores::HighscoreTable;
use super::probe::{build_entry, read_scenario_info};
use crate::config::{Paths, ScenarioSortMode, scan};
use crate::fs::{DirectoryScanner, FilePattern, ScannedFile};

/// Indexes the built-in and user scenario directories.
pub struct ScenarioRepository {
    paths: Paths,
    sort_mode: ScenarioSortMode,
    scenarios: Vec<ScenarioEntry>,
    highscores: HighscoreTable,
    conflicts: Vec<PathBuf>,
}

impl ScenarioRepository {
    pub fn new(paths: Paths, sort_mode: ScenarioSortMode) -> Self {
        Self {
            paths,
            sort_mode,
            scenarios: Vec::new(),
            highscores: HighscoreTable::new(),
            conflicts: Vec::new(),
        }
    }

    /// Rebuilds the index from disk and reloads every highscore source.
    pub fn scan(&mut self) {
        self.scenarios.clear();
        self.conflicts.clear();

        for dir in [self.paths.builtin_scenarios(), self.paths.user_scenarios()] {
            self.scan_dir(&dir);
        }
        self.sort();

        self.highscores.clear();
        if let Err(e) = self.highscores.load(&self.paths.highscores()) {
            error!("Unable to load highscores: {}", e);
        }
        let mut legacy_files = vec![self.paths.legacy_user_scores()];
        legacy_files.extend(self.paths.legacy_bundled_scores());
        for path in legacy_files {
            if let Err(e) = self.highscores.merge_legacy_file(&path) {
                error!("Unable to load legacy scores {}: {}", path.display(), e);
            }
        }

        info!(
            "Scanned {} scenarios, {} highscores",
            self.scenarios.len(),
            self.highscores.len()
        );
    }

    fn scan_dir(&mut self, dir: &Path) {
        let pattern = FilePattern::new(dir, scan::SCENARIO_PATTERN);
        for file in DirectoryScanner::new(pattern, true) {
            self.add_scenario(file);
        }
    }

    fn add_scenario(&mut self, file: ScannedFile) {
        let info = match read_scenario_info(&file.path) {
            Ok(Some(info)) => info,
            Ok(None) => {
                debug!("{} is not a scenario", file.path.display());
                return;
            }
            Err(e) => {
                warn!("Unable to read scenario {}: {}", file.path.display(), e);
                return;
            }
        };
        let entry = build_entry(&file.path, file.info.last_modified, info);
        self.add_entry(entry);
    }

    /// Adds an entry, resolving file-name collisions in favour of the newer file.
    fn add_entry(&mut self, entry: ScenarioEntry) {
        let file_name = entry.file_name();
        let Some(pos) = self
            .scenarios
            .iter()
            .position(|s| s.file_name().eq_ignore_ascii_case(&file_name))
        else {
            self.scenarios.push(entry);
            return;
        };

        let existing = &mut self.scenarios[pos];

        let conflict = if entry.timestamp > existing.timestamp {
            let older = existing.path.clone();
            *existing = entry;
            older
        } else {
            entry.path
        };
        warn!("{}", conflict_message(&conflict));
        self.conflicts.push(conflict);
    }

    pub fn sort(&mut self) {
        let mode = self.sort_mode;
        self.scenarios.sort_by(|a, b| compare(mode, a, b));
    }

    pub fn sort_mode(&self) -> ScenarioSortMode {
        self.sort_mode
    }

    pub fn set_sort_mode(&mut self, mode: ScenarioSortMode) {
        self.sort_mode = mode;
        self.sort();
    }

    pub fn count(&self) -> usize {
        self.scenarios.len()
    }

    pub fn scenarios(&self) -> &[ScenarioEntry] {
        &self.scenarios
    }

    pub fn get_by_index(&self, index: usize) -> Option<&ScenarioEntry> {
        self.scenarios.get(index)
    }

    /// Finds a scenario by bare file name, ignoring case.
    pub fn get_by_filename(&self, file_name: &str) -> Option<&ScenarioEntry> {
        let wanted = file_name_of(Path::new(file_name));
        self.scenarios
            .iter()
            .find(|s| s.file_name().eq_ignore_ascii_case(&wanted))
    }

    /// Finds a scenario by full path, ignoring case.
    pub fn get_by_path(&self, path: &Path) -> Option<&ScenarioEntry> {
        let wanted = path.to_string_lossy();
        self.scenarios
            .iter()
            .find(|s| s.path.to_string_lossy().eq_ignore_ascii_case(&wanted))
    }

    /// Finds the scenario at a known-scenario list position.
    pub fn get_by_source_index(&self, index: u16) -> Option<&ScenarioEntry> {
        self.scenarios
            .iter()
            .find(|s| s.source_index == Some(index))
    }

    pub fn highscores(&self) -> &[HighscoreEntry] {
        self.highscores.entries()
    }

    pub fn highscore_for(&self, scenario: &ScenarioEntry) -> Option<&HighscoreEntry> {
        self.highscores.find(&scenario.file_name())
    }

    /// Paths reported as ignored by the last scan.
    pub fn conflicts(&self) -> &[PathBuf] {
        &self.conflicts
    }

    /// Records a completion of `file_name` and persists the highscore file.
    ///
    /// Returns false when the scenario is unknown or the result does not
    /// replace the current record.
    pub fn try_record_highscore(
        &mut self,
        file_name: &str,
        company_value: i32,
        name: Option<&str>,
    ) -> bool {
        let Some(scenario) = self.get_by_filename(file_name) else {
            return false;
        };
        let key = scenario.file_name();
        if !self.highscores.try_record(&key, company_value, name) {
            return false;
        }
        if let Err(e) = self.highscores.save(&self.paths.highscores()) {
            error!("Unable to save highscores: {}", e);
        }
        true
    }
}

/// Total order over scenarios for the given mode.
pub fn compare(mode: ScenarioSortMode, a: &ScenarioEntry, b: &ScenarioEntry) -> Ordering {
    match mode {
        ScenarioSortMode::Category => compare_by_category(a, b),
        ScenarioSortMode::Origin => compare_by_origin(a, b),
    }
}

fn compare_by_category(a: &ScenarioEntry, b: &ScenarioEntry) -> Ordering {
    a.category
        .sort_rank()
        .cmp(&b.category.sort_rank())
        .then_with(|| match a.category {
            ScenarioCategory::Real | ScenarioCategory::Other => a.name.cmp(&b.name),
            _ => a
                .source_game
                .cmp(&b.source_game)
                .then_with(|| a.name.cmp(&b.name)),
        })
}

fn compare_by_origin(a: &ScenarioEntry, b: &ScenarioEntry) -> Ordering {
    if a.source_game != b.source_game {
        return a.source_game.cmp(&b.source_game);
    }
    if a.source_game == ScenarioSource::Real {
        return compare_by_category(a, b);
    }
    match (a.source_index, b.source_index) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_by_category(a, b),
    }
}

/// Diagnostic for a scenario dropped because a newer file shares its name.
fn conflict_message(ignored: &Path) -> String {
    format!(
        "Scenario conflict: '{}' ignored in favour of a newer file with the same name.",
        ignored.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::entry::Objective;

    fn entry(
        name: &str,
        category: ScenarioCategory,
        source: ScenarioSource,
        index: Option<u16>,
    ) -> ScenarioEntry {
        ScenarioEntry {
            path: PathBuf::from(format!("{}.sc6", name)),
            timestamp: 0,
            category,
            source_game: source,
            source_index: index,
            scenario_id: None,
            objective: Objective::default(),
            name: name.to_string(),
            internal_name: name.to_string(),
            details: String::new(),
        }
    }

    fn names(mut list: Vec<ScenarioEntry>, mode: ScenarioSortMode) -> Vec<String> {
        list.sort_by(|a, b| compare(mode, a, b));
        list.into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_category_order_dlc_and_byo_first() {
        let list = vec![
            entry("Zeta", ScenarioCategory::Beginner, ScenarioSource::Rct2, Some(90)),
            entry("Alpha", ScenarioCategory::Beginner, ScenarioSource::Rct1, Some(0)),
            entry("Byo", ScenarioCategory::BuildYourOwn, ScenarioSource::Other, Some(200)),
            entry("Dlc", ScenarioCategory::Dlc, ScenarioSource::Other, Some(198)),
            entry("Expert", ScenarioCategory::Expert, ScenarioSource::Rct1, Some(20)),
            entry("B Other", ScenarioCategory::Other, ScenarioSource::Rct2, None),
            entry("A Other", ScenarioCategory::Other, ScenarioSource::Rct1, None),
        ];
        assert_eq!(
            names(list, ScenarioSortMode::Category),
            vec!["Dlc", "Byo", "Alpha", "Zeta", "Expert", "A Other", "B Other"]
        );
    }

    #[test]
    fn test_origin_order_unidentified_last() {
        let list = vec![
            entry("Custom B", ScenarioCategory::Expert, ScenarioSource::Rct1, None),
            entry("Custom A", ScenarioCategory::Beginner, ScenarioSource::Rct1, None),
            entry("Second", ScenarioCategory::Expert, ScenarioSource::Rct1, Some(5)),
            entry("First", ScenarioCategory::Expert, ScenarioSource::Rct1, Some(1)),
            entry("Rct2", ScenarioCategory::Beginner, ScenarioSource::Rct2, Some(82)),
        ];
        assert_eq!(
            names(list, ScenarioSortMode::Origin),
            vec!["First", "Second", "Custom A", "Custom B", "Rct2"]
        );
    }

    #[test]
    fn test_conflict_keeps_newer_and_names_older() {
        let mut repo = ScenarioRepository::new(
            crate::Config::with_dirs("/nonexistent/data", "/nonexistent/user").paths(),
            ScenarioSortMode::Category,
        );
        let mut older = entry("Z", ScenarioCategory::Beginner, ScenarioSource::Other, None);
        older.path = PathBuf::from("a/Z.sc6");
        older.timestamp = 100;
        let mut newer = older.clone();
        newer.path = PathBuf::from("a/sub/Z.sc6");
        newer.timestamp = 200;
        newer.details = "newer".to_string();

        repo.add_entry(older.clone());
        repo.add_entry(newer);
        assert_eq!(repo.count(), 1);
        assert_eq!(repo.get_by_filename("z.sc6").unwrap().details, "newer");
        assert_eq!(repo.conflicts(), &[PathBuf::from("a/Z.sc6")]);

        // An older duplicate arriving later is the one ignored.
        let mut oldest = older;
        oldest.path = PathBuf::from("b/Z.sc6");
        oldest.timestamp = 50;
        repo.add_entry(oldest);
        assert_eq!(repo.get_by_filename("Z.sc6").unwrap().timestamp, 200);
        assert_eq!(repo.conflicts()[1], PathBuf::from("b/Z.sc6"));
    }

    #[test]
    fn test_conflict_message_names_ignored_file() {
        assert_eq!(
            conflict_message(Path::new("a/Z.sc6")),
            "Scenario conflict: 'a/Z.sc6' ignored in favour of a newer file with the same name."
        );
    }
}
