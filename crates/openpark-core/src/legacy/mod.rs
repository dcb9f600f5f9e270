//! Import of parks and scenarios from the first game (`.sv4` / `.sc4`).
//!
//! - `image` - typed reads over a decoded park
//! - `mapping` - legacy codes to object entry lists
//! - `importer` - the translation passes
//! - `builder` - writes park files, mainly for tests and fixtures

mod builder;
mod entries;
mod image;
mod importer;
pub mod layout;
mod mapping;
pub mod tables;
mod target;
mod tiles;

pub use builder::{LegacyParkBuilder, RideWriter};
pub use entries::{EntryList, EntryMap, ThemeSlot};
pub use image::{
    BannerRecord, GameVersion, ParkImage, RawElement, RawTile, ResearchRecord, RideRecord,
    is_user_string_id,
};
pub use importer::{LegacyImporter, load_legacy_park};
pub use mapping::ObjectMappings;
pub use target::*;
pub use tiles::fix_land_ownership;
