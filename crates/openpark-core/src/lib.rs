pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod io;
pub mod legacy;
pub mod object;
pub mod scenario;
pub mod theme;
pub mod title;
pub mod track;

pub use config::{Config, Paths};
pub use context::AppContext;
pub use error::{Error, Result};
pub use legacy::{ImportTarget, LegacyImporter, LegacyParkBuilder, load_legacy_park};
pub use object::{BuiltinStrings, ObjectCatalog, ObjectEntry, ObjectManager, ObjectType, StringTable};
pub use scenario::{ScenarioEntry, ScenarioRepository};
pub use theme::ThemeManager;
pub use title::{ParkHost, TitleCommand, TitleSequence, TitleSequenceManager, TitleSequencePlayer};
pub use track::{TrackDesignRepository, TrackRepositoryItem};
