//! Object entry lists and the maps from legacy codes into them.

/// Ordered, de-duplicated object names of one type. The position of a name
/// is the entry index the imported park refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    names: Vec<String>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        let name = name.trim_end();
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name))
    }

    /// Returns the index of `name`, appending it first if it is new.
    pub fn get_or_add(&mut self, name: &str) -> usize {
        match self.index_of(name) {
            Some(index) => index,
            None => {
                self.names.push(name.trim_end().to_string());
                self.names.len() - 1
            }
        }
    }

    pub fn add_range(&mut self, names: &[&str]) {
        for name in names {
            self.get_or_add(name);
        }
    }
}

/// Legacy code to entry index. Unmapped codes read as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMap {
    slots: Vec<Option<u8>>,
}

impl EntryMap {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    pub fn get(&self, code: usize) -> Option<u8> {
        self.slots.get(code).copied().flatten()
    }

    pub fn is_mapped(&self, code: usize) -> bool {
        self.get(code).is_some()
    }

    /// Maps `code`. Codes outside the map and indices past `u8` are ignored.
    pub fn set(&mut self, code: usize, index: usize) {
        if let (Some(slot), Ok(index)) = (self.slots.get_mut(code), u8::try_from(index)) {
            *slot = Some(index);
        }
    }
}

/// Where a research theme's scenery ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeSlot {
    #[default]
    Unmapped,
    /// Items live in the general scenery set; no group of its own.
    General,
    Group(u8),
}

impl ThemeSlot {
    pub fn group(&self) -> Option<u8> {
        match self {
            ThemeSlot::Group(index) => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_add_ignores_case_and_padding() {
        let mut list = EntryList::new();
        assert_eq!(list.get_or_add("TARMAC  "), 0);
        assert_eq!(list.get_or_add("PATHDIRT"), 1);
        assert_eq!(list.get_or_add("tarmac"), 0);
        assert_eq!(list.names(), &["TARMAC".to_string(), "PATHDIRT".to_string()]);
    }

    #[test]
    fn test_entry_map_bounds() {
        let mut map = EntryMap::new(4);
        map.set(2, 7);
        map.set(9, 1);
        map.set(1, 300);
        assert_eq!(map.get(2), Some(7));
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(9), None);
        assert!(!map.is_mapped(0));
    }
}
