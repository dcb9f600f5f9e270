//! UI colour themes.

mod manager;

pub use manager::{ThemeItem, ThemeManager};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::legacy::tables::colour;

/// Set on a colour to draw the window translucent.
pub const TRANSLUCENT: u8 = 0x80;

/// Colours of one window class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTheme {
    pub colours: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTheme {
    pub name: String,
    /// Keyed by window class name, e.g. `WC_TOP_TOOLBAR`.
    #[serde(default)]
    pub entries: BTreeMap<String, WindowTheme>,
    #[serde(default)]
    pub use_lights_ride: bool,
    #[serde(default)]
    pub use_lights_park: bool,
    #[serde(default)]
    pub use_alt_scenario_select_font: bool,
}

impl UiTheme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_file(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn entry(&self, window_class: &str) -> Option<&WindowTheme> {
        self.entries.get(window_class)
    }

    pub fn set_entry(&mut self, window_class: impl Into<String>, colours: Vec<u8>) {
        self.entries
            .insert(window_class.into(), WindowTheme { colours });
    }

    /// The default theme: every window keeps its built-in colours.
    pub fn rct2() -> Self {
        Self::new("RCT2")
    }

    /// Colours of the first game.
    pub fn rct1() -> Self {
        use colour::*;
        let grey_t = GREY | TRANSLUCENT;
        let entries: [(&str, [u8; 6]); 14] = [
            ("WC_TOP_TOOLBAR", [GREY, GREY, GREY, GREY, BLACK, BLACK]),
            ("WC_BOTTOM_TOOLBAR", [grey_t, grey_t, BLACK, YELLOW, BLACK, BLACK]),
            ("WC_RIDE", [BORDEAUX_RED, GREY, SATURATED_GREEN, BLACK, BLACK, BLACK]),
            ("WC_RIDE_LIST", [BORDEAUX_RED, GREY, GREY, BLACK, BLACK, BLACK]),
            ("WC_CONSTRUCT_RIDE", [BORDEAUX_RED, GREY, GREY, BLACK, BLACK, BLACK]),
            ("WC_PEEP", [LIGHT_BROWN, BORDEAUX_RED, BORDEAUX_RED, BLACK, BLACK, BLACK]),
            ("WC_GUEST_LIST", [LIGHT_BROWN, BORDEAUX_RED, BORDEAUX_RED, BLACK, BLACK, BLACK]),
            ("WC_STAFF_LIST", [DARK_GREEN, LIGHT_PURPLE, LIGHT_PURPLE, BLACK, BLACK, BLACK]),
            ("WC_FINANCES", [LIGHT_PURPLE, GREY, GREY, BLACK, BLACK, BLACK]),
            ("WC_TITLE_MENU", [grey_t, grey_t, grey_t, BLACK, BLACK, BLACK]),
            ("WC_TITLE_EXIT", [grey_t, grey_t, grey_t, BLACK, BLACK, BLACK]),
            ("WC_NEW_CAMPAIGN", [LIGHT_PURPLE, LIGHT_PURPLE, GREY, BLACK, BLACK, BLACK]),
            ("WC_TITLE_OPTIONS", [grey_t, grey_t, grey_t, BLACK, BLACK, BLACK]),
            ("WC_STAFF", [DARK_GREEN, LIGHT_PURPLE, LIGHT_PURPLE, BLACK, BLACK, BLACK]),
        ];

        let mut theme = Self::new("RCT1");
        for (window_class, colours) in entries {
            theme.set_entry(window_class, colours.to_vec());
        }
        theme.use_lights_ride = true;
        theme.use_lights_park = true;
        theme.use_alt_scenario_select_font = true;
        theme
    }
}
