use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use birthcal_core::Config;
use birthcal_core::ics::{IcsOptions, generate_ics};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use tracing::info;

use super::expander;

/// Counts reported after writing a calendar.
#[derive(Debug, PartialEq, Eq)]
pub struct Written {
    pub people: usize,
    pub events: usize,
}

pub fn run(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| config.output_path());
    let written = write_calendar(config, &path, Utc::now())?;

    println!(
        "{} {} events for {} people written to {}",
        "✓".green(),
        written.events,
        written.people,
        path.display().bold()
    );
    Ok(())
}

/// Parse, expand and write the whole configured list. Nothing is written if
/// any birthday is malformed.
pub fn write_calendar(config: &Config, path: &Path, stamp: DateTime<Utc>) -> Result<Written> {
    let birthdays = config.birthdays()?;
    let events = expander().events(&birthdays);

    let options = IcsOptions {
        calendar_name: config.calendar_name.clone(),
        reminder_minutes: config.reminder_minutes,
        stamp,
    };
    let ics = generate_ics(&events, &options)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, ics)
        .with_context(|| format!("Failed to write calendar to {}", path.display()))?;

    info!(path = %path.display(), events = events.len(), "wrote calendar");

    Ok(Written {
        people: birthdays.len(),
        events: events.len(),
    })
}
