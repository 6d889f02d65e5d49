use anyhow::{Context, Result};
use birthcal_core::Config;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(config: &Config, json: bool) -> Result<()> {
    let birthdays = config.birthdays()?;

    if json {
        let out = serde_json::to_string_pretty(&birthdays).context("Failed to serialize birthdays")?;
        println!("{}", out);
        return Ok(());
    }

    if birthdays.is_empty() {
        println!("{}", "No birthdays configured".dimmed());
        return Ok(());
    }

    for birthday in &birthdays {
        println!("{}", birthday.render());
    }
    println!();
    println!("{} {} birthdays OK", "✓".green(), birthdays.len());

    Ok(())
}
