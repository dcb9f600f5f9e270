//! Title sequence playback.
//!
//! The player steps through a sequence's commands once per frame. A `WAIT`
//! pauses for a number of simulation ticks; every other command runs
//! immediately and playback moves on to the next one. A command that fails
//! (usually a park that cannot be loaded) makes playback jump to the next
//! load command instead. A lap that comes back to where the frame started
//! without waiting is reported as an infinite loop.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, error, warn};

use super::command::TitleCommand;
use super::manager::TitleSequenceManager;
use super::sequence::TitleSequence;
use crate::config::title::{IDLE_VIEW_HEIGHT, IDLE_VIEW_TILE, MAX_SEEK_TICKS, TICKS_PER_SECOND};
use crate::error::{Error, Result};
use crate::scenario::{ScenarioRepository, sources};

/// World units per map tile.
const TILE_SIZE: i32 = 32;

/// World units per land height unit.
const HEIGHT_UNIT: i32 = 8;

/// File name of the park loaded by `LOADMM`.
const MAGIC_MOUNTAIN: &str = "Six Flags Magic Mountain.SC6";

/// What the player needs from the running game.
pub trait ParkHost {
    /// Loads a park from a title sequence's save list.
    fn load_park(&mut self, name: &str, data: &[u8]) -> bool;

    /// Loads an installed park file.
    fn load_park_file(&mut self, path: &Path) -> bool;

    /// Centres the main view on a world position.
    fn set_view_location(&mut self, x: i32, y: i32, z: i32);

    /// Surface height of a tile, in world units.
    fn terrain_height(&self, tile_x: i32, tile_y: i32) -> i32;

    fn rotate_view(&mut self, rotations: u8);

    fn set_zoom(&mut self, level: u8);

    fn set_game_speed(&mut self, speed: u8);

    /// Advances the simulation by one tick.
    fn tick(&mut self);
}

pub struct TitleSequencePlayer<H: ParkHost> {
    host: H,
    sequence: Option<TitleSequence>,
    position: usize,
    wait_counter: u32,
}

impl<H: ParkHost> TitleSequencePlayer<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            sequence: None,
            position: 0,
            wait_counter: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_sequence(&self) -> Option<&TitleSequence> {
        self.sequence.as_ref()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_waiting(&self) -> bool {
        self.wait_counter > 0
    }

    /// Loads the sequence at `index` of the manager and starts it from the
    /// top. On failure the current sequence keeps playing.
    pub fn begin(&mut self, manager: &TitleSequenceManager, index: usize) -> bool {
        let Some(item) = manager.get(index) else {
            warn!("No title sequence at index {}", index);
            return false;
        };
        let sequence = match TitleSequence::load(&item.path) {
            Ok(sequence) => sequence,
            Err(e) => {
                error!("Unable to load title sequence {}: {}", item.path.display(), e);
                return false;
            }
        };

        self.eject();
        debug!("Playing title sequence {}", sequence.name);
        self.sequence = Some(sequence);
        self.reset();
        true
    }

    pub fn eject(&mut self) {
        self.sequence = None;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.wait_counter = 0;
    }

    /// Runs one frame of playback. Returns false when nothing is playing or
    /// playback is stuck.
    pub fn update(&mut self, scenarios: &ScenarioRepository) -> bool {
        let entry_position = self.position;
        let Some(len) = self.sequence.as_ref().map(|s| s.commands.len()) else {
            let (tile_x, tile_y) = IDLE_VIEW_TILE;
            self.host.set_view_location(
                tile_x * TILE_SIZE,
                tile_y * TILE_SIZE,
                IDLE_VIEW_HEIGHT * HEIGHT_UNIT,
            );
            return false;
        };
        if self.position >= len {
            self.position = 0;
            return false;
        }

        if self.wait_counter > 0 {
            self.wait_counter -= 1;
            if self.wait_counter == 0 {
                match self.command_at(self.position) {
                    Some(TitleCommand::Wait { .. }) => self.increment_position(len),
                    Some(TitleCommand::End) => self.position = 0,
                    _ => {}
                }
            }
            return true;
        }

        let mut failed_loads = HashSet::new();
        loop {
            let Some(command) = self.command_at(self.position) else {
                return false;
            };
            if self.execute(command, scenarios) {
                if matches!(command, TitleCommand::Wait { .. } | TitleCommand::End) {
                    break;
                }
                if command != TitleCommand::Restart {
                    self.increment_position(len);
                }
                if self.position == entry_position {
                    error!("Infinite loop detected in title sequence, a WAIT command may be missing");
                    return false;
                }
            } else if !failed_loads.insert(self.position)
                || !self.skip_to_next_load()
                || self.position == entry_position
            {
                error!("Unable to load any parks from the title sequence");
                return false;
            }
        }
        true
    }

    /// Plays from the closest load command at or before `target` until the
    /// position reaches `target`. Fails when no load command precedes it.
    pub fn seek(&mut self, target: usize, scenarios: &ScenarioRepository) -> Result<()> {
        let commands = match &self.sequence {
            Some(sequence) => &sequence.commands,
            None => return Err(Error::NotFound("title sequence".to_string())),
        };
        if target >= commands.len() {
            return Err(Error::OutOfRange {
                what: "title command",
                index: target,
                len: commands.len(),
            });
        }
        let start = commands[..=target]
            .iter()
            .rposition(TitleCommand::is_load)
            .ok_or_else(|| Error::NotFound(format!("load command at or before {}", target)))?;

        self.position = start;
        self.wait_counter = 0;
        let mut ticks = 0;
        while self.position != target && ticks < MAX_SEEK_TICKS {
            if !self.update(scenarios) {
                break;
            }
            self.host.tick();
            ticks += 1;
        }
        self.wait_counter = 0;
        Ok(())
    }

    fn command_at(&self, position: usize) -> Option<TitleCommand> {
        self.sequence.as_ref()?.commands.get(position).copied()
    }

    fn increment_position(&mut self, len: usize) {
        self.position += 1;
        if self.position >= len {
            self.position = 0;
        }
    }

    fn skip_to_next_load(&mut self) -> bool {
        let Some(sequence) = &self.sequence else {
            return false;
        };
        let len = sequence.commands.len();
        let next = (1..len)
            .map(|offset| (self.position + offset) % len)
            .find(|&i| sequence.commands[i].is_load());
        match next {
            Some(i) => {
                self.position = i;
                true
            }
            None => false,
        }
    }

    fn execute(&mut self, command: TitleCommand, scenarios: &ScenarioRepository) -> bool {
        match command {
            TitleCommand::Load { save_index } => self.load_save(save_index),
            TitleCommand::Location { x, y } => {
                let (tile_x, tile_y) = (i32::from(x), i32::from(y));
                let z = self.host.terrain_height(tile_x, tile_y);
                self.host.set_view_location(
                    tile_x * TILE_SIZE + TILE_SIZE / 2,
                    tile_y * TILE_SIZE + TILE_SIZE / 2,
                    z,
                );
                true
            }
            TitleCommand::Rotate { rotations } => {
                self.host.rotate_view(rotations);
                true
            }
            TitleCommand::Zoom { level } => {
                self.host.set_zoom(level);
                true
            }
            TitleCommand::Speed { speed } => {
                self.host.set_game_speed(speed);
                true
            }
            TitleCommand::Wait { seconds } => {
                self.wait_counter = (u32::from(seconds) * TICKS_PER_SECOND).max(1);
                true
            }
            TitleCommand::Restart => {
                self.position = 0;
                true
            }
            TitleCommand::End => {
                self.wait_counter = 1;
                true
            }
            TitleCommand::LoadMm => match scenarios.get_by_filename(MAGIC_MOUNTAIN) {
                Some(scenario) => self.host.load_park_file(&scenario.path),
                None => {
                    warn!("{} is not installed", MAGIC_MOUNTAIN);
                    false
                }
            },
            TitleCommand::LoadRct1 { scenario_id } => {
                let scenario = sources::try_get_by_id(scenario_id)
                    .and_then(|desc| scenarios.get_by_source_index(desc.index));
                match scenario {
                    Some(scenario) => self.host.load_park_file(&scenario.path),
                    None => {
                        warn!("Scenario {} is not installed", scenario_id);
                        false
                    }
                }
            }
        }
    }

    fn load_save(&mut self, save_index: Option<usize>) -> bool {
        let Some(sequence) = &self.sequence else {
            return false;
        };
        let Some(index) = save_index else {
            warn!("Title sequence {} references a missing park", sequence.name);
            return false;
        };
        let data = match sequence.read_save(index) {
            Ok(data) => data,
            Err(e) => {
                warn!("Unable to read title park {}: {}", index, e);
                return false;
            }
        };
        self.host.load_park(&sequence.saves[index], &data)
    }
}
