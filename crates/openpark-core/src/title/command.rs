use std::fmt;

use crate::config::title::{MAX_SPEED, MIN_SPEED};

/// One step of a title sequence script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCommand {
    /// Loads a park from the sequence's save list. `None` when the script
    /// named a save the sequence does not contain.
    Load { save_index: Option<usize> },
    /// Centres the view on a map tile.
    Location { x: u8, y: u8 },
    Rotate { rotations: u8 },
    Zoom { level: u8 },
    Speed { speed: u8 },
    Wait { seconds: u8 },
    Restart,
    End,
    /// Loads the bundled Six Flags Magic Mountain park.
    LoadMm,
    /// Loads an installed scenario by its legacy scenario id.
    LoadRct1 { scenario_id: u8 },
}

impl TitleCommand {
    pub fn speed(speed: u8) -> Self {
        TitleCommand::Speed {
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
        }
    }

    /// True for the commands that replace the running park.
    pub fn is_load(&self) -> bool {
        matches!(
            self,
            TitleCommand::Load { .. } | TitleCommand::LoadMm | TitleCommand::LoadRct1 { .. }
        )
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            TitleCommand::Load { .. } => "load",
            TitleCommand::Location { .. } => "location",
            TitleCommand::Rotate { .. } => "rotate",
            TitleCommand::Zoom { .. } => "zoom",
            TitleCommand::Speed { .. } => "speed",
            TitleCommand::Wait { .. } => "wait",
            TitleCommand::Restart => "restart",
            TitleCommand::End => "end",
            TitleCommand::LoadMm => "loadmm",
            TitleCommand::LoadRct1 { .. } => "loadrct1",
        }
    }
}

impl fmt::Display for TitleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword().to_uppercase();
        match self {
            TitleCommand::Load {
                save_index: Some(i),
            } => write!(f, "{} #{}", keyword, i),
            TitleCommand::Load { save_index: None } => write!(f, "{} <missing>", keyword),
            TitleCommand::Location { x, y } => write!(f, "{} {} {}", keyword, x, y),
            TitleCommand::Rotate { rotations } => write!(f, "{} {}", keyword, rotations),
            TitleCommand::Zoom { level } => write!(f, "{} {}", keyword, level),
            TitleCommand::Speed { speed } => write!(f, "{} {}", keyword, speed),
            TitleCommand::Wait { seconds } => write!(f, "{} {}", keyword, seconds),
            TitleCommand::LoadRct1 { scenario_id } => write!(f, "{} {}", keyword, scenario_id),
            TitleCommand::Restart | TitleCommand::End | TitleCommand::LoadMm => {
                write!(f, "{}", keyword)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_clamped() {
        assert_eq!(TitleCommand::speed(0), TitleCommand::Speed { speed: 1 });
        assert_eq!(TitleCommand::speed(9), TitleCommand::Speed { speed: 4 });
        assert_eq!(TitleCommand::speed(3), TitleCommand::Speed { speed: 3 });
    }

    #[test]
    fn test_load_class() {
        assert!(TitleCommand::LoadMm.is_load());
        assert!(TitleCommand::LoadRct1 { scenario_id: 2 }.is_load());
        assert!(TitleCommand::Load { save_index: None }.is_load());
        assert!(!TitleCommand::Wait { seconds: 1 }.is_load());
        assert!(!TitleCommand::Restart.is_load());
    }

    #[test]
    fn test_display() {
        assert_eq!(TitleCommand::Location { x: 3, y: 4 }.to_string(), "LOCATION 3 4");
        assert_eq!(TitleCommand::End.to_string(), "END");
    }
}
