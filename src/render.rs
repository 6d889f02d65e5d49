//! Terminal rendering for birthcal types.
//!
//! Extension traits that add colored output to birthcal-core types using
//! owo_colors.

use birthcal_core::{Birthday, Occurrence};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Birthday {
    fn render(&self) -> String {
        let leap = if self.is_leap_month() { " (闰月)" } else { "" };
        format!(
            "🎂 {} {} {}{}",
            self.name.bold(),
            self.date.calendar_label().dimmed(),
            self.date,
            leap.yellow()
        )
    }
}

impl Render for Occurrence {
    fn render(&self) -> String {
        let date = self.date.format("%Y-%m-%d").to_string();
        let title = if self.shifted_earlier {
            self.title.yellow().to_string()
        } else {
            self.title.clone()
        };
        format!("{} {}", date.dimmed(), title)
    }
}

/// Format a date relative to `today` (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
