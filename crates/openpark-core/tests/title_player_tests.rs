//! Title sequence player tests against a recording park host.

use std::fs;
use std::path::{Path, PathBuf};

use openpark_core::config::ScenarioSortMode;
use openpark_core::title::{ParkHost, TitleSequenceManager, TitleSequencePlayer};
use openpark_core::{BuiltinStrings, Config, Paths, ScenarioRepository};
use tempfile::TempDir;

#[derive(Default)]
struct MockHost {
    loaded: Vec<String>,
    views: Vec<(i32, i32, i32)>,
    speeds: Vec<u8>,
    ticks: u32,
    fail_loads: bool,
}

impl ParkHost for MockHost {
    fn load_park(&mut self, name: &str, _data: &[u8]) -> bool {
        if self.fail_loads {
            return false;
        }
        self.loaded.push(name.to_string());
        true
    }

    fn load_park_file(&mut self, path: &Path) -> bool {
        self.loaded.push(path.display().to_string());
        !self.fail_loads
    }

    fn set_view_location(&mut self, x: i32, y: i32, z: i32) {
        self.views.push((x, y, z));
    }

    fn terrain_height(&self, _tile_x: i32, _tile_y: i32) -> i32 {
        112
    }

    fn rotate_view(&mut self, _rotations: u8) {}

    fn set_zoom(&mut self, _level: u8) {}

    fn set_game_speed(&mut self, speed: u8) {
        self.speeds.push(speed);
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}

struct Fixture {
    _tmp: TempDir,
    paths: Paths,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let paths = Config::with_dirs(tmp.path().join("data"), tmp.path().join("user")).paths();
        Self { _tmp: tmp, paths }
    }

    fn sequence(&self, name: &str, script: &str) -> PathBuf {
        let dir = self.paths.user_title_sequences().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("park.sv6"), b"park").unwrap();
        fs::write(dir.join("script.txt"), script).unwrap();
        dir
    }

    fn manager(&self) -> TitleSequenceManager {
        let mut manager = TitleSequenceManager::new(self.paths.clone());
        manager.scan(&BuiltinStrings::new());
        manager
    }

    fn scenarios(&self) -> ScenarioRepository {
        ScenarioRepository::new(self.paths.clone(), ScenarioSortMode::Category)
    }
}

fn started(fixture: &Fixture, host: MockHost) -> TitleSequencePlayer<MockHost> {
    let manager = fixture.manager();
    let mut player = TitleSequencePlayer::new(host);
    assert!(player.begin(&manager, 0));
    player
}

#[test]
fn test_idle_player_shows_default_view() {
    let fixture = Fixture::new();
    let mut player = TitleSequencePlayer::new(MockHost::default());
    assert!(!player.update(&fixture.scenarios()));
    assert_eq!(player.host().views, vec![(75 * 32, 75 * 32, 16 * 8)]);
}

#[test]
fn test_begin_out_of_range_keeps_playing() {
    let fixture = Fixture::new();
    fixture.sequence("Intro", "LOAD park.sv6\nWAIT 1\n");
    let manager = fixture.manager();
    let mut player = TitleSequencePlayer::new(MockHost::default());
    assert!(!player.begin(&manager, 5));
    assert!(player.current_sequence().is_none());

    assert!(player.begin(&manager, 0));
    assert!(!player.begin(&manager, 1));
    assert_eq!(player.current_sequence().unwrap().name, "Intro");
}

#[test]
fn test_restart_with_wait_is_not_a_loop() {
    let fixture = Fixture::new();
    fixture.sequence("Loop", "LOAD park.sv6\nLOCATION 10 10\nWAIT 2\nRESTART\n");
    let scenarios = fixture.scenarios();
    let mut player = started(&fixture, MockHost::default());

    // Three full laps of 2 seconds each.
    for _ in 0..(3 * 2 * 40 + 3) {
        assert!(player.update(&scenarios));
        player.host_mut().tick();
    }
    assert!(player.host().loaded.len() >= 3);
    assert_eq!(player.host().views[0], (10 * 32 + 16, 10 * 32 + 16, 112));
}

#[test]
fn test_lap_without_wait_is_detected() {
    let fixture = Fixture::new();
    fixture.sequence("Busy", "LOAD park.sv6\nLOCATION 10 10\nSPEED 2\n");
    let scenarios = fixture.scenarios();
    let mut player = started(&fixture, MockHost::default());

    assert!(!player.update(&scenarios));
    // One lap ran before the loop was reported.
    assert_eq!(player.host().loaded.len(), 1);
    assert_eq!(player.host().speeds, vec![2]);
}

#[test]
fn test_end_holds_then_starts_over() {
    let fixture = Fixture::new();
    fixture.sequence("Once", "LOAD park.sv6\nEND\n");
    let scenarios = fixture.scenarios();
    let mut player = started(&fixture, MockHost::default());

    assert!(player.update(&scenarios));
    assert_eq!(player.position(), 1);
    assert!(player.is_waiting());

    assert!(player.update(&scenarios));
    assert_eq!(player.position(), 0);
    assert!(!player.is_waiting());

    assert!(player.update(&scenarios));
    assert_eq!(player.host().loaded.len(), 2);
}

#[test]
fn test_unloadable_parks_stop_playback() {
    let fixture = Fixture::new();
    fixture.sequence("Broken", "LOAD park.sv6\nWAIT 1\nLOAD park.sv6\nWAIT 1\n");
    let scenarios = fixture.scenarios();
    let host = MockHost {
        fail_loads: true,
        ..MockHost::default()
    };
    let mut player = started(&fixture, host);
    assert!(!player.update(&scenarios));
}

#[test]
fn test_missing_save_skips_to_next_load() {
    let fixture = Fixture::new();
    fixture.sequence("Gap", "LOAD gone.sv6\nWAIT 1\nLOAD park.sv6\nWAIT 1\n");
    let scenarios = fixture.scenarios();
    let mut player = started(&fixture, MockHost::default());

    assert!(player.update(&scenarios));
    assert_eq!(player.position(), 3);
    assert_eq!(player.host().loaded, vec!["park.sv6".to_string()]);
}

#[test]
fn test_missing_installed_scenario_counts_as_failed_load() {
    let fixture = Fixture::new();
    fixture.sequence("Mm", "LOADMM\nWAIT 1\nLOAD park.sv6\nWAIT 1\n");
    let scenarios = fixture.scenarios();
    let mut player = started(&fixture, MockHost::default());

    assert!(player.update(&scenarios));
    assert_eq!(player.position(), 3);
}

#[test]
fn test_seek_plays_up_to_target() {
    let fixture = Fixture::new();
    fixture.sequence("Seek", "LOAD park.sv6\nWAIT 1\nLOCATION 4 4\nWAIT 1\n");
    let scenarios = fixture.scenarios();
    let mut player = started(&fixture, MockHost::default());

    player.seek(2, &scenarios).unwrap();
    assert_eq!(player.position(), 2);
    assert!(!player.is_waiting());
    assert_eq!(player.host().ticks, 41);

    assert!(player.seek(9, &scenarios).is_err());
}

#[test]
fn test_seek_before_first_load_fails() {
    let fixture = Fixture::new();
    fixture.sequence("Late", "LOCATION 1 1\nLOAD park.sv6\nWAIT 1\n");
    let scenarios = fixture.scenarios();
    let mut player = started(&fixture, MockHost::default());

    assert!(player.seek(0, &scenarios).is_err());
    assert_eq!(player.position(), 0);
    assert!(player.host().views.is_empty());
    assert_eq!(player.host().ticks, 0);

    player.seek(2, &scenarios).unwrap();
    assert_eq!(player.position(), 2);
    assert_eq!(player.host().loaded, vec!["park.sv6".to_string()]);
}

#[test]
fn test_seek_without_sequence_fails() {
    let fixture = Fixture::new();
    let mut player = TitleSequencePlayer::new(MockHost::default());
    assert!(player.seek(0, &fixture.scenarios()).is_err());
}
