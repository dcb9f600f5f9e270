//! Scenario listing and highscore recording.

use anyhow::{Result, bail};
use openpark_core::Config;
use openpark_core::scenario::{HighscoreEntry, ScenarioEntry};
use serde::Serialize;

#[derive(Serialize)]
struct ScenarioRow<'a> {
    #[serde(flatten)]
    scenario: &'a ScenarioEntry,
    highscore: Option<&'a HighscoreEntry>,
}

pub fn list(config: Config, json: bool) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.scenarios_mut().scan();
    let repo = ctx.scenarios();

    if json {
        let rows: Vec<ScenarioRow<'_>> = repo
            .scenarios()
            .iter()
            .map(|scenario| ScenarioRow {
                scenario,
                highscore: repo.highscore_for(scenario),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for scenario in repo.scenarios() {
        let score = match repo.highscore_for(scenario) {
            Some(h) if h.is_claimed() => format!(
                "{} by {}",
                h.company_value,
                h.name.as_deref().unwrap_or("?")
            ),
            Some(h) => format!("{} (unclaimed)", h.company_value),
            None => "-".to_string(),
        };
        println!(
            "{:<14} {:<8} {:<40} {}",
            scenario.category.to_string(),
            scenario.source_game.short_name(),
            scenario.name,
            score
        );
    }
    for path in repo.conflicts() {
        println!("duplicate: {}", path.display());
    }
    println!("{} scenarios", repo.count());
    Ok(())
}

pub fn record_highscore(
    config: Config,
    file_name: &str,
    company_value: i32,
    name: Option<&str>,
) -> Result<()> {
    let mut ctx = super::context(config);
    ctx.scenarios_mut().scan();
    if ctx.scenarios().get_by_filename(file_name).is_none() {
        bail!("Unknown scenario: {}", file_name);
    }
    if ctx
        .scenarios_mut()
        .try_record_highscore(file_name, company_value, name)
    {
        println!("New highscore for {}: {}", file_name, company_value);
    } else {
        println!("Existing highscore for {} kept", file_name);
    }
    Ok(())
}
