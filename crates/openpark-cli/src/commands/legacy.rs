//! Legacy park fixtures.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use openpark_core::LegacyParkBuilder;
use openpark_core::legacy::layout::header;

pub fn new_fixture(output: &Path, game_version: u32, name: Option<&str>) -> Result<()> {
    let mut builder = LegacyParkBuilder::new();
    builder.write_u32(header::GAME_VERSION, game_version);
    if let Some(name) = name {
        builder.scenario_name(name);
    }
    let data = builder.encode()?;
    fs::write(output, &data).with_context(|| format!("Unable to write {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), data.len());
    Ok(())
}
