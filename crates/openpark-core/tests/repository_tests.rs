//! Integration tests for the scenario and track design repositories
//!
//! Every test builds its own content directories under a temp dir and drives
//! the repositories through their public API.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use openpark_core::config::ScenarioSortMode;
use openpark_core::legacy::LegacyParkBuilder;
use openpark_core::legacy::layout::header;
use openpark_core::object::{ObjectEntry, ObjectType};
use openpark_core::scenario::highscores::encode_legacy_scores;
use openpark_core::scenario::{
    LegacyScore, Objective, ScenarioCategory, ScenarioInfo, ScenarioRepository, ScenarioSource,
    encode_sc6_info,
};
use openpark_core::track::{TrackDesignRepository, encode_td6};
use openpark_core::{Config, Paths};
use tempfile::TempDir;

fn paths(tmp: &TempDir) -> Paths {
    Config::with_dirs(tmp.path().join("data"), tmp.path().join("user")).paths()
}

fn set_mtime(path: &Path, secs: u64) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn write_scenario(path: &Path, name: &str, details: &str, mtime: u64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let info = ScenarioInfo {
        category: ScenarioCategory::Other,
        objective: Objective::default(),
        name: name.to_string(),
        details: details.to_string(),
    };
    fs::write(path, encode_sc6_info(&info)).unwrap();
    set_mtime(path, mtime);
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_scan_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        write_scenario(&paths.builtin_scenarios().join("Forest Frontiers.SC6"), "Forest Frontiers", "", 10);
        write_scenario(&paths.user_scenarios().join("My Park.sc6"), "My Park", "Mine", 10);

        let mut repo = ScenarioRepository::new(paths, ScenarioSortMode::Category);
        repo.scan();
        let first = repo.scenarios().to_vec();
        repo.scan();
        assert_eq!(repo.scenarios(), first.as_slice());
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_known_title_is_identified() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        write_scenario(&paths.builtin_scenarios().join("ff.sc6"), "RCT1 Forest Frontiers", "", 10);

        let mut repo = ScenarioRepository::new(paths, ScenarioSortMode::Category);
        repo.scan();
        let entry = repo.get_by_filename("FF.SC6").unwrap();
        assert_eq!(entry.name, "Forest Frontiers");
        assert_eq!(entry.source_game, ScenarioSource::Rct1);
        assert_eq!(entry.category, ScenarioCategory::Beginner);
        assert!(entry.is_identified());
    }

    #[test]
    fn test_newer_duplicate_wins() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let older = paths.user_scenarios().join("Z.sc6");
        let newer = paths.user_scenarios().join("sub").join("Z.sc6");
        write_scenario(&older, "Z", "old", 100);
        write_scenario(&newer, "Z", "new", 200);

        let mut repo = ScenarioRepository::new(paths, ScenarioSortMode::Category);
        repo.scan();
        assert_eq!(repo.count(), 1);
        let entry = repo.get_by_filename("Z.sc6").unwrap();
        assert_eq!(entry.path, newer);
        assert_eq!(entry.details, "new");
        assert_eq!(repo.conflicts(), &[older]);
    }

    #[test]
    fn test_non_scenario_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let dir = paths.user_scenarios();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.sc6"), b"not a park").unwrap();
        fs::write(dir.join("notes.txt"), b"hello").unwrap();

        let mut repo = ScenarioRepository::new(paths, ScenarioSortMode::Category);
        repo.scan();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_legacy_scenario_is_listed() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let dir = paths.builtin_scenarios();
        fs::create_dir_all(&dir).unwrap();

        let mut builder = LegacyParkBuilder::new();
        builder
            .write_u16(header::SCENARIO_SLOT_INDEX, 0xFFFF)
            .scenario_name("Custom Valley");
        fs::write(dir.join("custom.sc4"), builder.encode().unwrap()).unwrap();

        let mut repo = ScenarioRepository::new(paths, ScenarioSortMode::Category);
        repo.scan();
        let entry = repo.get_by_filename("custom.sc4").unwrap();
        assert_eq!(entry.name, "Custom Valley");
        assert_eq!(entry.category, ScenarioCategory::Other);
        assert!(!entry.is_identified());
    }
}

mod highscore_tests {
    use super::*;

    fn repo_with_z(tmp: &TempDir) -> ScenarioRepository {
        let paths = paths(tmp);
        write_scenario(&paths.user_scenarios().join("Z.sc6"), "Z", "", 10);
        let mut repo = ScenarioRepository::new(paths, ScenarioSortMode::Category);
        repo.scan();
        repo
    }

    #[test]
    fn test_anonymous_record_can_be_claimed() {
        let tmp = TempDir::new().unwrap();
        let mut repo = repo_with_z(&tmp);

        assert!(repo.try_record_highscore("Z.sc6", 5000, None));
        assert!(repo.try_record_highscore("Z.sc6", 5000, Some("Ann")));

        let entry = repo.get_by_filename("Z.sc6").unwrap();
        let score = repo.highscore_for(entry).unwrap();
        assert_eq!(score.name.as_deref(), Some("Ann"));
        assert_eq!(score.company_value, 5000);
    }

    #[test]
    fn test_highscores_only_increase() {
        let tmp = TempDir::new().unwrap();
        let mut repo = repo_with_z(&tmp);

        assert!(repo.try_record_highscore("Z.sc6", 5000, Some("Ann")));
        assert!(!repo.try_record_highscore("Z.sc6", 4000, Some("Bob")));
        assert!(!repo.try_record_highscore("Z.sc6", 5000, Some("Bob")));
        assert!(repo.try_record_highscore("Z.sc6", 6000, Some("Bob")));

        let entry = repo.get_by_filename("Z.sc6").unwrap();
        let score = repo.highscore_for(entry).unwrap();
        assert_eq!(score.name.as_deref(), Some("Bob"));
        assert_eq!(score.company_value, 6000);
    }

    #[test]
    fn test_unknown_scenario_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut repo = repo_with_z(&tmp);
        assert!(!repo.try_record_highscore("Missing.sc6", 5000, None));
    }

    #[test]
    fn test_highscores_persist_across_scans() {
        let tmp = TempDir::new().unwrap();
        let mut repo = repo_with_z(&tmp);
        assert!(repo.try_record_highscore("Z.sc6", 5000, Some("Ann")));

        let mut reloaded = ScenarioRepository::new(paths(&tmp), ScenarioSortMode::Category);
        reloaded.scan();
        assert_eq!(reloaded.highscores().len(), 1);
        assert_eq!(reloaded.highscores()[0].company_value, 5000);
        assert!(reloaded.highscores()[0].timestamp.is_some());
    }

    #[test]
    fn test_legacy_scores_overwrite_with_unknown_timestamp() {
        let tmp = TempDir::new().unwrap();
        let mut repo = repo_with_z(&tmp);
        assert!(repo.try_record_highscore("Z.sc6", 5000, Some("Ann")));

        let legacy = encode_legacy_scores(&[LegacyScore {
            path: "C:\\RCT\\Scenarios\\Z.sc6".to_string(),
            completed: true,
            company_value: 7000,
            completed_by: "Old Timer".to_string(),
        }]);
        fs::write(paths(&tmp).legacy_user_scores(), legacy).unwrap();

        repo.scan();
        let entry = repo.get_by_filename("Z.sc6").unwrap();
        let score = repo.highscore_for(entry).unwrap();
        assert_eq!(score.company_value, 7000);
        assert_eq!(score.name.as_deref(), Some("Old Timer"));
        assert!(score.timestamp.is_none());
    }

    #[test]
    fn test_incomplete_legacy_scores_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let mut repo = repo_with_z(&tmp);

        let legacy = encode_legacy_scores(&[LegacyScore {
            path: "Z.sc6".to_string(),
            completed: false,
            company_value: 9000,
            completed_by: String::new(),
        }]);
        fs::write(paths(&tmp).legacy_user_scores(), legacy).unwrap();

        repo.scan();
        assert!(repo.highscores().is_empty());
    }
}

mod track_tests {
    use super::*;

    fn write_td6(path: &Path, ride_type: u8, object: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, encode_td6(ride_type, &ObjectEntry::new(ObjectType::Ride, object))).unwrap();
    }

    #[test]
    fn test_scan_writes_and_reuses_index() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        write_td6(&paths.builtin_tracks().join("Wooden.TD6"), 52, "PTCT1");
        write_td6(&paths.user_tracks().join("Mine.td6"), 52, "PTCT1");

        let mut repo = TrackDesignRepository::new(paths.clone());
        repo.scan();
        assert_eq!(repo.count(), 2);
        assert!(paths.track_index().is_file());

        // Unchanged directories are served from the index.
        let cached = repo.items().to_vec();
        let mut again = TrackDesignRepository::new(paths);
        again.scan();
        assert_eq!(again.items(), cached.as_slice());
    }

    #[test]
    fn test_new_file_invalidates_index() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        write_td6(&paths.user_tracks().join("A.td6"), 52, "PTCT1");

        let mut repo = TrackDesignRepository::new(paths.clone());
        repo.scan();
        assert_eq!(repo.count(), 1);

        write_td6(&paths.user_tracks().join("B.td6"), 52, "PTCT1");
        repo.scan();
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_filter_by_ride_type_and_entry() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        write_td6(&paths.user_tracks().join("A.td6"), 52, "PTCT1");
        write_td6(&paths.user_tracks().join("B.td6"), 52, "PTCT2");
        write_td6(&paths.user_tracks().join("C.td6"), 51, "ARRX");

        let mut repo = TrackDesignRepository::new(paths);
        repo.scan();
        assert_eq!(repo.count_for_object_entry(52, None), 2);
        assert_eq!(repo.count_for_object_entry(52, Some("ptct2")), 1);
        assert_eq!(repo.items_for_object_entry(51, None)[0].name, "C");
    }

    #[test]
    fn test_builtin_designs_are_read_only() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let builtin = paths.builtin_tracks().join("Wooden.TD6");
        write_td6(&builtin, 52, "PTCT1");

        let mut repo = TrackDesignRepository::new(paths);
        repo.scan();
        assert!(!repo.delete(&builtin));
        assert!(repo.rename(&builtin, "Other").is_none());
        assert!(builtin.is_file());
    }

    #[test]
    fn test_install_rename_delete() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let source = tmp.path().join("download").join("Loop.td6");
        write_td6(&source, 51, "ARRX");

        let mut repo = TrackDesignRepository::new(paths.clone());
        repo.scan();

        let installed = repo.install(&source).unwrap();
        assert_eq!(installed, paths.user_tracks().join("Loop.td6"));
        assert!(repo.install(&source).is_none());

        let renamed = repo.rename(&installed, "Corkscrew").unwrap();
        assert_eq!(renamed, paths.user_tracks().join("Corkscrew.td6"));
        assert_eq!(repo.items()[0].name, "Corkscrew");
        assert!(!installed.exists());

        assert!(repo.delete(&renamed));
        assert!(!renamed.exists());
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_install_rejects_unreadable_design() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let source = tmp.path().join("download").join("Broken.td6");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"not a track design").unwrap();

        let mut repo = TrackDesignRepository::new(paths.clone());
        repo.scan();
        let before = repo.count();

        assert!(repo.install(&source).is_none());
        assert!(!paths.user_tracks().join("Broken.td6").exists());
        assert_eq!(repo.count(), before);
    }
}
