use std::path::PathBuf;

use serde::Serialize;

/// One indexed track design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRepositoryItem {
    pub name: String,
    pub path: PathBuf,
    pub ride_type: u8,
    /// Name of the ride or vehicle object the design requires.
    pub object_entry: String,
    pub flags: u32,
}

impl TrackRepositoryItem {
    /// Built-in designs are protected from rename and delete.
    pub const READ_ONLY: u32 = 1 << 0;

    pub fn is_read_only(&self) -> bool {
        self.flags & Self::READ_ONLY != 0
    }

    pub fn matches_path(&self, path: &std::path::Path) -> bool {
        self.path
            .to_string_lossy()
            .eq_ignore_ascii_case(&path.to_string_lossy())
    }
}
