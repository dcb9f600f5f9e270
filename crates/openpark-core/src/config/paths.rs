use std::path::{Path, PathBuf};

use super::PathSettings;

/// Resolved locations of every file and directory the repositories touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    data_dir: PathBuf,
    user_dir: PathBuf,
    legacy_dir: Option<PathBuf>,
}

impl Paths {
    pub fn new(settings: &PathSettings) -> Self {
        Self {
            data_dir: settings.data_dir.clone(),
            user_dir: settings.user_dir.clone(),
            legacy_dir: settings.legacy_dir.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    pub fn builtin_scenarios(&self) -> PathBuf {
        self.data_dir.join("scenarios")
    }

    pub fn user_scenarios(&self) -> PathBuf {
        self.user_dir.join("scenario")
    }

    pub fn highscores(&self) -> PathBuf {
        self.user_dir.join("highscores.dat")
    }

    pub fn legacy_user_scores(&self) -> PathBuf {
        self.user_dir.join("scores.dat")
    }

    /// Scores file bundled with the original game, if its install is known.
    pub fn legacy_bundled_scores(&self) -> Option<PathBuf> {
        self.legacy_dir
            .as_ref()
            .map(|dir| dir.join("Data").join("scores.dat"))
    }

    pub fn builtin_tracks(&self) -> PathBuf {
        self.data_dir.join("tracks")
    }

    pub fn user_tracks(&self) -> PathBuf {
        self.user_dir.join("track")
    }

    pub fn track_index(&self) -> PathBuf {
        self.user_dir.join("tracks.idx")
    }

    pub fn builtin_title_sequences(&self) -> PathBuf {
        self.data_dir.join("title")
    }

    pub fn user_title_sequences(&self) -> PathBuf {
        self.user_dir.join("title sequences")
    }

    pub fn themes(&self) -> PathBuf {
        self.user_dir.join("themes")
    }

    pub fn object_dirs(&self) -> [PathBuf; 2] {
        [self.data_dir.join("objects"), self.user_dir.join("object")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_layout() {
        let paths = Paths::new(&PathSettings {
            data_dir: PathBuf::from("/game"),
            user_dir: PathBuf::from("/home/u/park"),
            legacy_dir: Some(PathBuf::from("/rct1")),
        });
        assert_eq!(paths.track_index(), PathBuf::from("/home/u/park/tracks.idx"));
        assert_eq!(paths.builtin_tracks(), PathBuf::from("/game/tracks"));
        assert_eq!(
            paths.legacy_bundled_scores(),
            Some(PathBuf::from("/rct1/Data/scores.dat"))
        );
    }

    #[test]
    fn test_no_legacy_dir() {
        let paths = Paths::new(&PathSettings {
            data_dir: PathBuf::from("/game"),
            user_dir: PathBuf::from("/u"),
            legacy_dir: None,
        });
        assert!(paths.legacy_bundled_scores().is_none());
    }
}
