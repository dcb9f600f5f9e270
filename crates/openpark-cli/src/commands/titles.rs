//! Title sequence listing and packing.

use std::path::Path;

use anyhow::{Context, Result, bail};
use openpark_core::Config;
use openpark_core::title::{TitleSequence, to_json_script};

pub fn list(config: Config) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.scan_all();
    let manager = ctx.title_sequences();
    for (index, item) in manager.items().iter().enumerate() {
        println!(
            "{:>2} {:<36} {:<12} {}",
            index,
            item.name,
            manager.config_id(index).unwrap_or_default(),
            item.path.display()
        );
    }
    Ok(())
}

pub fn script(config: Config, index: usize, json: bool) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.scan_all();
    let Some(item) = ctx.title_sequences().get(index) else {
        bail!(
            "No title sequence {} ({} available)",
            index,
            ctx.title_sequences().count()
        );
    };
    let sequence = TitleSequence::load(&item.path)
        .with_context(|| format!("Unable to load {}", item.path.display()))?;

    if json {
        println!("{}", to_json_script(&sequence.commands, &sequence.saves)?);
    } else {
        for (position, command) in sequence.commands.iter().enumerate() {
            println!("{:>3} {}", position, command);
        }
    }
    Ok(())
}

pub fn pack(dir: &Path, output: &Path) -> Result<()> {
    let sequence = TitleSequence::load(dir)
        .with_context(|| format!("Unable to load {}", dir.display()))?;
    sequence.pack(output)?;
    println!(
        "Packed {} ({} parks) into {}",
        sequence.name,
        sequence.saves.len(),
        output.display()
    );
    Ok(())
}
