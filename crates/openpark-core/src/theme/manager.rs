use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use super::UiTheme;
use crate::config::{Paths, scan};
use crate::error::{Error, Result};
use crate::fs::{DirectoryScanner, FilePattern};
use crate::object::{StringId, StringTable, string_ids};

/// One listed theme. Predefined themes have no file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeItem {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl ThemeItem {
    pub fn is_predefined(&self) -> bool {
        self.path.is_none()
    }
}

const PREDEFINED: [(fn() -> UiTheme, StringId); 2] = [
    (UiTheme::rct2, string_ids::THEME_RCT2),
    (UiTheme::rct1, string_ids::THEME_RCT1),
];

pub struct ThemeManager {
    paths: Paths,
    items: Vec<ThemeItem>,
}

impl ThemeManager {
    pub fn new(paths: Paths) -> Self {
        Self {
            paths,
            items: Vec::new(),
        }
    }

    /// Lists the predefined themes followed by every `*.json` file in the
    /// themes directory.
    pub fn scan(&mut self, strings: &dyn StringTable) {
        self.items.clear();
        for (build, string_id) in PREDEFINED {
            let name = strings
                .get(string_id)
                .map(str::to_string)
                .unwrap_or_else(|| build().name);
            self.items.push(ThemeItem { name, path: None });
        }

        let pattern = FilePattern::new(self.paths.themes(), scan::THEME_PATTERN);
        for file in DirectoryScanner::new(pattern, false) {
            self.items.push(ThemeItem {
                name: theme_name(&file.path),
                path: Some(file.path),
            });
        }
        info!("Found {} themes", self.items.len());
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ThemeItem] {
        &self.items
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Reads a theme. Unreadable files are logged and yield `None`.
    pub fn load(&self, index: usize) -> Option<UiTheme> {
        let item = self.items.get(index)?;
        let Some(path) = &item.path else {
            return PREDEFINED.get(index).map(|(build, _)| build());
        };
        match UiTheme::read_file(path) {
            Ok(theme) => Some(theme),
            Err(e) => {
                error!("Unable to read theme {}: {}", path.display(), e);
                None
            }
        }
    }

    fn theme_path(&self, name: &str) -> PathBuf {
        self.paths.themes().join(format!("{}.json", name))
    }

    fn item(&self, index: usize) -> Result<&ThemeItem> {
        self.items.get(index).ok_or(Error::OutOfRange {
            what: "theme",
            index,
            len: self.items.len(),
        })
    }

    fn user_item(&self, index: usize) -> Result<(&ThemeItem, &Path)> {
        let item = self.item(index)?;
        match &item.path {
            Some(path) => Ok((item, path)),
            None => Err(Error::ReadOnly(PathBuf::from(&item.name))),
        }
    }

    /// Writes `theme` to the themes directory under its own name, replacing
    /// any user theme of that name. Returns its index.
    pub fn save(&mut self, theme: &UiTheme) -> Result<usize> {
        if self.items[..PREDEFINED.len().min(self.items.len())]
            .iter()
            .any(|item| item.name.eq_ignore_ascii_case(&theme.name))
        {
            return Err(Error::ReadOnly(PathBuf::from(&theme.name)));
        }
        let path = self.theme_path(&theme.name);
        theme.write_file(&path)?;

        if let Some(index) = self.items.iter().position(|i| i.path.as_ref() == Some(&path)) {
            return Ok(index);
        }
        self.items.push(ThemeItem {
            name: theme.name.clone(),
            path: Some(path),
        });
        Ok(self.items.len() - 1)
    }

    /// Saves a copy of any theme as a new user theme.
    pub fn duplicate(&mut self, index: usize, new_name: &str) -> Result<usize> {
        let path = self.theme_path(new_name);
        if path.exists() {
            return Err(Error::AlreadyExists(path));
        }
        let mut theme = self
            .load(index)
            .ok_or_else(|| Error::NotFound(format!("theme {}", index)))?;
        theme.name = new_name.to_string();
        self.save(&theme)
    }

    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<PathBuf> {
        let (_, old_path) = self.user_item(index)?;
        let old_path = old_path.to_path_buf();
        let new_path = self.theme_path(new_name);
        if new_path.exists() {
            return Err(Error::AlreadyExists(new_path));
        }

        let mut theme = UiTheme::read_file(&old_path)?;
        theme.name = new_name.to_string();
        theme.write_file(&new_path)?;
        fs::remove_file(&old_path)?;

        self.items[index] = ThemeItem {
            name: new_name.to_string(),
            path: Some(new_path.clone()),
        };
        Ok(new_path)
    }

    pub fn delete(&mut self, index: usize) -> Result<()> {
        let (_, path) = self.user_item(index)?;
        fs::remove_file(path)?;
        self.items.remove(index);
        Ok(())
    }
}

fn theme_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
