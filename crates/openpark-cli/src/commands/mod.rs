//! CLI command implementations.

pub mod import;
pub mod legacy;
pub mod scenarios;
pub mod themes;
pub mod titles;
pub mod tracks;

use openpark_core::{AppContext, BuiltinStrings, Config, ObjectCatalog};
use tracing::debug;

/// Builds a context whose object catalog holds every installed object.
pub fn context(config: Config) -> AppContext {
    let mut catalog = ObjectCatalog::new();
    for dir in config.paths().object_dirs() {
        let found = catalog.scan_dir(&dir);
        debug!("{} objects in {}", found, dir.display());
    }
    AppContext::new(config, Box::new(catalog), Box::new(BuiltinStrings::new()))
}
