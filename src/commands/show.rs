use anyhow::Result;
use birthcal_core::Config;
use owo_colors::OwoColorize;

use super::expander;
use crate::render::Render;

pub fn run(config: &Config, name: &str, from: Option<i32>, to: Option<i32>) -> Result<()> {
    let birthdays = config.birthdays()?;

    let Some(birthday) = birthdays.iter().find(|b| b.name == name) else {
        let available: Vec<_> = birthdays.iter().map(|b| b.name.as_str()).collect();
        anyhow::bail!(
            "'{}' not found. Available: {}",
            name,
            available.join(", ")
        );
    };

    println!("{}", birthday.render());

    let expander = expander();
    let mut shown = 0;
    for occurrence in expander
        .occurrences(birthday)
        .skip_while(|o| from.is_some_and(|from| o.calendar_year < from))
        .take_while(|o| to.is_none_or(|to| o.calendar_year <= to))
    {
        println!("   {}", occurrence.render());
        shown += 1;
    }

    if shown == 0 {
        println!("   {}", "No occurrences in range".dimmed());
    }

    Ok(())
}
