//! Title sequences: scripts, archives, the installed-sequence list and the
//! player that drives the title screen.

mod command;
mod manager;
mod player;
mod script;
mod sequence;

pub use command::TitleCommand;
pub use manager::{TitleSequenceManager, TitleSequenceManagerItem};
pub use player::{ParkHost, TitleSequencePlayer};
pub use script::{parse_json_script, parse_text_line, parse_text_script, to_json_script, to_text_script};
pub use sequence::{TitleSequence, write_archive};
