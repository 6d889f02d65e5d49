use anyhow::Result;
use birthcal_core::{Birthday, Config, ChineseCalendar, Expander, Occurrence};
use chrono::{Local, NaiveDate, TimeDelta};
use owo_colors::OwoColorize;

use super::expander;
use crate::render::{Render, format_date_label};

pub fn run(config: &Config, days: i64) -> Result<()> {
    let today = Local::now().date_naive();
    let until = window_end(today, days)?;

    let birthdays = config.birthdays()?;
    let expander = expander();
    let upcoming = upcoming(&expander, &birthdays, today, until);

    if upcoming.is_empty() {
        println!("{}", "No birthdays coming up".dimmed());
        return Ok(());
    }

    let mut current_date: Option<NaiveDate> = None;
    for occurrence in &upcoming {
        if current_date != Some(occurrence.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(occurrence.date, today).bold());
            current_date = Some(occurrence.date);
        }
        println!("  {}", occurrence.render());
    }

    Ok(())
}

/// Last day of a `days`-long window starting at `today`.
fn window_end(today: NaiveDate, days: i64) -> Result<NaiveDate> {
    if days < 0 {
        anyhow::bail!("--days must not be negative");
    }
    TimeDelta::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or_else(|| anyhow::anyhow!("--days {days} is out of range"))
}

/// Occurrences dated within `[from, to]`, sorted by date. Birthdays on the
/// same day keep config order.
fn upcoming(
    expander: &Expander<ChineseCalendar>,
    birthdays: &[Birthday],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<Occurrence> {
    let mut found: Vec<Occurrence> = birthdays
        .iter()
        .flat_map(|birthday| {
            expander
                .occurrences(birthday)
                .skip_while(move |o| o.date < from)
                .take_while(move |o| o.date <= to)
        })
        .collect();

    found.sort_by_key(|o| o.date);
    found
}
