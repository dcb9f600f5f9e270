use std::collections::HashMap;

/// Identifier of a localised string.
pub type StringId = u16;

/// String identifiers used by this crate.
pub mod ids {
    use super::StringId;

    pub const TITLE_SEQUENCE_RCT1: StringId = 5305;
    pub const TITLE_SEQUENCE_RCT1_AA: StringId = 5306;
    pub const TITLE_SEQUENCE_RCT1_AA_LL: StringId = 5307;
    pub const TITLE_SEQUENCE_RCT2: StringId = 5308;
    pub const TITLE_SEQUENCE_OPENRCT2: StringId = 5309;

    pub const THEME_RCT2: StringId = 5231;
    pub const THEME_RCT1: StringId = 5232;
}

/// Localised string lookup.
pub trait StringTable {
    fn get(&self, id: StringId) -> Option<&str>;
}

/// English strings for the identifiers in [`ids`].
#[derive(Debug, Clone)]
pub struct BuiltinStrings {
    strings: HashMap<StringId, String>,
}

impl Default for BuiltinStrings {
    fn default() -> Self {
        let strings = [
            (ids::TITLE_SEQUENCE_RCT1, "RollerCoaster Tycoon 1"),
            (ids::TITLE_SEQUENCE_RCT1_AA, "RollerCoaster Tycoon 1 (AA)"),
            (ids::TITLE_SEQUENCE_RCT1_AA_LL, "RollerCoaster Tycoon 1 (AA + LL)"),
            (ids::TITLE_SEQUENCE_RCT2, "RollerCoaster Tycoon 2"),
            (ids::TITLE_SEQUENCE_OPENRCT2, "OpenRCT2"),
            (ids::THEME_RCT2, "RCT2"),
            (ids::THEME_RCT1, "RCT1"),
        ]
        .into_iter()
        .map(|(id, s)| (id, s.to_string()))
        .collect();
        Self { strings }
    }
}

impl BuiltinStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides or adds a string, e.g. from a language pack.
    pub fn set(&mut self, id: StringId, text: impl Into<String>) {
        self.strings.insert(id, text.into());
    }
}

impl StringTable for BuiltinStrings {
    fn get(&self, id: StringId) -> Option<&str> {
        self.strings.get(&id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_and_override() {
        let mut strings = BuiltinStrings::new();
        assert_eq!(strings.get(ids::TITLE_SEQUENCE_RCT2), Some("RollerCoaster Tycoon 2"));
        assert_eq!(strings.get(1), None);

        strings.set(ids::TITLE_SEQUENCE_RCT2, "RCT2 Intro");
        assert_eq!(strings.get(ids::TITLE_SEQUENCE_RCT2), Some("RCT2 Intro"));
    }
}
