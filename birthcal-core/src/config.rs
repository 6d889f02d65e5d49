//! Birthday list configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::birthday::Birthday;
use crate::error::{BirthcalError, BirthcalResult};
use crate::parse::parse_birthday;

static DEFAULT_OUTPUT: &str = "calendar.ics";

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

/// Configuration at ~/.config/birthcal/config.toml (or a path given on the
/// command line).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Where the .ics file is written; `~` is expanded
    #[serde(default = "default_output")]
    pub output: String,

    /// Shown as the calendar name by clients that read X-WR-CALNAME
    pub calendar_name: Option<String>,

    /// Add a display alarm this many minutes before each birthday starts
    pub reminder_minutes: Option<i64>,

    #[serde(default)]
    pub birthdays: Vec<BirthdayEntry>,
}

/// One configured person, either `{ name = "..", birthday = ".." }` or
/// `["name", "birthday"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BirthdayEntry {
    Table { name: String, birthday: String },
    Pair(String, String),
}

impl BirthdayEntry {
    pub fn name(&self) -> &str {
        match self {
            BirthdayEntry::Table { name, .. } | BirthdayEntry::Pair(name, _) => name,
        }
    }

    pub fn birthday(&self) -> &str {
        match self {
            BirthdayEntry::Table { birthday, .. } | BirthdayEntry::Pair(_, birthday) => birthday,
        }
    }

    pub fn parse(&self) -> BirthcalResult<Birthday> {
        parse_birthday(self.name(), self.birthday())
    }
}

impl FromStr for Config {
    type Err = BirthcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| BirthcalError::Config(e.to_string()))
    }
}

impl Config {
    pub fn default_path() -> BirthcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BirthcalError::Config("Could not determine config directory".into()))?
            .join("birthcal");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> BirthcalResult<Self> {
        if !path.exists() {
            return Err(BirthcalError::Config(format!(
                "Config file not found at {}\n\n\
                Create it with your birthday list:\n\n\
                [[birthdays]]\n\
                name = \"张三\"\n\
                birthday = \"2000-2-29\"",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Output path with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output).as_ref())
    }

    /// Parse every configured birthday, stopping at the first malformed one.
    pub fn birthdays(&self) -> BirthcalResult<Vec<Birthday>> {
        self.birthdays.iter().map(BirthdayEntry::parse).collect()
    }
}
