//! Title sequence script formats.
//!
//! `script.txt` holds one command per line: a case-insensitive keyword
//! followed by whitespace-separated arguments, `#` starting a comment.
//! `script.json` is an array of objects with a `command` discriminator.
//! `LOAD` references a save by file name in both formats; the name is
//! resolved against the sequence's save list, ignoring case.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::command::TitleCommand;
use crate::error::{Error, Result};

fn find_save(saves: &[String], name: &str) -> Option<usize> {
    saves.iter().position(|s| s.eq_ignore_ascii_case(name))
}

fn parse_arg(args: &[&str], index: usize) -> Option<u8> {
    args.get(index).and_then(|a| a.parse().ok())
}

/// Parses one `script.txt` line. Blank lines and comments yield `Ok(None)`.
pub fn parse_text_line(line: &str, saves: &[String]) -> Result<Option<TitleCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();
    let bad_args = || Error::InvalidFormat(format!("Invalid arguments: {}", line));

    let command = match keyword.to_ascii_lowercase().as_str() {
        "load" => TitleCommand::Load {
            save_index: find_save(saves, rest),
        },
        "location" => TitleCommand::Location {
            x: parse_arg(&args, 0).ok_or_else(bad_args)?,
            y: parse_arg(&args, 1).ok_or_else(bad_args)?,
        },
        "rotate" => TitleCommand::Rotate {
            rotations: parse_arg(&args, 0).ok_or_else(bad_args)?,
        },
        "zoom" => TitleCommand::Zoom {
            level: parse_arg(&args, 0).ok_or_else(bad_args)?,
        },
        "speed" => TitleCommand::speed(parse_arg(&args, 0).ok_or_else(bad_args)?),
        "wait" => TitleCommand::Wait {
            seconds: parse_arg(&args, 0).ok_or_else(bad_args)?,
        },
        "restart" => TitleCommand::Restart,
        "end" => TitleCommand::End,
        "loadmm" => TitleCommand::LoadMm,
        "loadrct1" => TitleCommand::LoadRct1 {
            scenario_id: parse_arg(&args, 0).ok_or_else(bad_args)?,
        },
        other => {
            return Err(Error::InvalidFormat(format!("Unknown command: {}", other)));
        }
    };
    Ok(Some(command))
}

/// Parses a whole `script.txt`. Malformed lines are skipped with a warning.
pub fn parse_text_script(text: &str, saves: &[String]) -> Vec<TitleCommand> {
    let mut commands = Vec::new();
    for (number, line) in text.lines().enumerate() {
        match parse_text_line(line, saves) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(e) => warn!("Skipping title script line {}: {}", number + 1, e),
        }
    }
    commands
}

pub fn to_text_script(commands: &[TitleCommand], saves: &[String]) -> String {
    let mut out = String::new();
    for command in commands {
        let keyword = command.keyword().to_uppercase();
        let line = match command {
            TitleCommand::Load { save_index } => {
                match save_index.and_then(|i| saves.get(i)) {
                    Some(name) => format!("{} {}", keyword, name),
                    None => keyword,
                }
            }
            TitleCommand::Location { x, y } => format!("{} {} {}", keyword, x, y),
            TitleCommand::Rotate { rotations } => format!("{} {}", keyword, rotations),
            TitleCommand::Zoom { level } => format!("{} {}", keyword, level),
            TitleCommand::Speed { speed } => format!("{} {}", keyword, speed),
            TitleCommand::Wait { seconds } => format!("{} {}", keyword, seconds),
            TitleCommand::LoadRct1 { scenario_id } => format!("{} {}", keyword, scenario_id),
            TitleCommand::Restart | TitleCommand::End | TitleCommand::LoadMm => keyword,
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonCommand {
    command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotations: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zoom: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seconds: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    save_index: Option<u8>,
}

impl JsonCommand {
    fn into_command(self, saves: &[String]) -> Result<TitleCommand> {
        let command = match self.command.to_ascii_lowercase().as_str() {
            "load" => TitleCommand::Load {
                save_index: self.file.and_then(|f| find_save(saves, &f)),
            },
            "location" => TitleCommand::Location {
                x: self.x.unwrap_or_default(),
                y: self.y.unwrap_or_default(),
            },
            "rotate" => TitleCommand::Rotate {
                rotations: self.rotations.unwrap_or_default(),
            },
            "zoom" => TitleCommand::Zoom {
                level: self.zoom.unwrap_or_default(),
            },
            "speed" => TitleCommand::speed(self.speed.unwrap_or_default()),
            "wait" => TitleCommand::Wait {
                seconds: self.seconds.unwrap_or_default(),
            },
            "restart" => TitleCommand::Restart,
            "end" => TitleCommand::End,
            "loadmm" => TitleCommand::LoadMm,
            "loadrct1" => TitleCommand::LoadRct1 {
                scenario_id: self.save_index.unwrap_or_default(),
            },
            other => {
                return Err(Error::InvalidFormat(format!("Unknown command: {}", other)));
            }
        };
        Ok(command)
    }

    fn from_command(command: &TitleCommand, saves: &[String]) -> Self {
        let mut json = JsonCommand {
            command: command.keyword().to_string(),
            ..Default::default()
        };
        match *command {
            TitleCommand::Load { save_index } => {
                json.file = save_index.and_then(|i| saves.get(i)).cloned();
            }
            TitleCommand::Location { x, y } => {
                json.x = Some(x);
                json.y = Some(y);
            }
            TitleCommand::Rotate { rotations } => json.rotations = Some(rotations),
            TitleCommand::Zoom { level } => json.zoom = Some(level),
            TitleCommand::Speed { speed } => json.speed = Some(speed),
            TitleCommand::Wait { seconds } => json.seconds = Some(seconds),
            TitleCommand::LoadRct1 { scenario_id } => json.save_index = Some(scenario_id),
            TitleCommand::Restart | TitleCommand::End | TitleCommand::LoadMm => {}
        }
        json
    }
}

/// Parses a `script.json` array. Unknown commands are skipped with a warning;
/// malformed JSON fails the whole script.
pub fn parse_json_script(text: &str, saves: &[String]) -> Result<Vec<TitleCommand>> {
    let raw: Vec<JsonCommand> = serde_json::from_str(text)?;
    let mut commands = Vec::with_capacity(raw.len());
    for (index, json) in raw.into_iter().enumerate() {
        match json.into_command(saves) {
            Ok(command) => commands.push(command),
            Err(e) => warn!("Skipping title script command {}: {}", index, e),
        }
    }
    Ok(commands)
}

pub fn to_json_script(commands: &[TitleCommand], saves: &[String]) -> Result<String> {
    let raw: Vec<JsonCommand> = commands
        .iter()
        .map(|c| JsonCommand::from_command(c, saves))
        .collect();
    Ok(serde_json::to_string_pretty(&raw)?)
}
