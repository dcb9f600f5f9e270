//! Theme listing.

use anyhow::Result;
use openpark_core::Config;

pub fn list(config: Config) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.scan_all();
    for item in ctx.themes().items() {
        match &item.path {
            Some(path) => println!("{:<24} {}", item.name, path.display()),
            None => println!("{:<24} (predefined)", item.name),
        }
    }
    Ok(())
}
