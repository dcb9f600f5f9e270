//! Track design listing and maintenance.

use std::path::Path;

use anyhow::{Result, bail};
use openpark_core::Config;

pub fn list(config: Config, ride_type: Option<u8>, entry: Option<&str>) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.tracks_mut().scan();
    let repo = ctx.tracks();

    let items = match ride_type {
        Some(ride_type) => repo.items_for_object_entry(ride_type, entry),
        None => repo.items().to_vec(),
    };
    for item in &items {
        println!(
            "{:>3} {:<8} {:<32}{} {}",
            item.ride_type,
            item.object_entry,
            item.name,
            if item.is_read_only() { " (built-in)" } else { "" },
            item.path.display()
        );
    }
    println!("{} track designs", items.len());
    Ok(())
}

pub fn install(config: Config, path: &Path) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.tracks_mut().scan();
    match ctx.tracks_mut().install(path) {
        Some(dest) => {
            println!("Installed {}", dest.display());
            Ok(())
        }
        None => bail!("Unable to install {}", path.display()),
    }
}

pub fn rename(config: Config, path: &Path, new_name: &str) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.tracks_mut().scan();
    match ctx.tracks_mut().rename(path, new_name) {
        Some(dest) => {
            println!("Renamed to {}", dest.display());
            Ok(())
        }
        None => bail!("Unable to rename {}", path.display()),
    }
}

pub fn delete(config: Config, path: &Path) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.tracks_mut().scan();
    if !ctx.tracks_mut().delete(path) {
        bail!("Unable to delete {}", path.display());
    }
    println!("Deleted {}", path.display());
    Ok(())
}
