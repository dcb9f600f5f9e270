//! Legacy park import.

use std::path::Path;

use anyhow::{Result, bail};
use openpark_core::{Config, LegacyImporter};
use tracing::info;

pub fn run(config: Config, path: &Path, json: bool) -> Result<()> {
    let mut ctx = super::context(config);
    let mut importer = LegacyImporter::with_settings(ctx.config().import.clone());
    importer.load(path)?;

    let missing = importer.missing_objects(ctx.objects())?;
    if !missing.is_empty() {
        for entry in &missing {
            println!("missing: {}", entry);
        }
        bail!("{} objects required by {} are not installed", missing.len(), path.display());
    }

    info!("Importing {}", path.display());
    let park = ctx.import_legacy(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&park)?);
        return Ok(());
    }

    println!("Scenario:  {}", park.scenario.name);
    println!("Park:      {}", park.park.name);
    println!("Map size:  {}", park.map_size);
    println!("Objects:   {}", park.objects.len());
    println!("Rides:     {}", park.rides.len());
    for ride in &park.rides {
        println!(
            "  {:>3} type {:>3} {}",
            ride.index,
            ride.ride_type,
            ride.name.as_deref().unwrap_or("")
        );
    }
    println!("Banners:   {}", park.banners.len());
    println!("Entrances: {}", park.park_entrances.len());
    println!("Cash:      {}", park.finance.cash);
    Ok(())
}
