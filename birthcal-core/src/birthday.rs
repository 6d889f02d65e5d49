//! Parsed birthday types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A birthday in either calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "calendar", rename_all = "lowercase")]
pub enum BirthDate {
    /// Gregorian date
    Solar {
        year: Option<i32>,
        month: u32,
        day: u32,
    },
    /// Chinese lunisolar date
    Lunar {
        year: Option<i32>,
        month: u32,
        day: u32,
        leap_month: bool,
    },
}

impl BirthDate {
    pub fn year(&self) -> Option<i32> {
        match self {
            BirthDate::Solar { year, .. } | BirthDate::Lunar { year, .. } => *year,
        }
    }

    pub fn month(&self) -> u32 {
        match self {
            BirthDate::Solar { month, .. } | BirthDate::Lunar { month, .. } => *month,
        }
    }

    pub fn day(&self) -> u32 {
        match self {
            BirthDate::Solar { day, .. } | BirthDate::Lunar { day, .. } => *day,
        }
    }

    /// Only lunar dates can fall in a leap month.
    pub fn is_leap_month(&self) -> bool {
        matches!(self, BirthDate::Lunar { leap_month: true, .. })
    }

    pub fn is_lunar(&self) -> bool {
        matches!(self, BirthDate::Lunar { .. })
    }

    /// Label used in event titles.
    pub fn calendar_label(&self) -> &'static str {
        if self.is_lunar() { "农历" } else { "阳历" }
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthDate::Solar { year, month, day } => match year {
                Some(y) => write!(f, "{}-{:02}-{:02}", y, month, day),
                None => write!(f, "--{:02}-{:02}", month, day),
            },
            BirthDate::Lunar {
                year,
                month,
                day,
                leap_month,
            } => {
                if let Some(y) = year {
                    write!(f, "{}年", y)?;
                }
                let leap = if *leap_month { "闰" } else { "" };
                write!(f, "{}{}月{}日", leap, month, day)
            }
        }
    }
}

/// One configured person and their parsed birthday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub name: String,
    pub date: BirthDate,
}

impl Birthday {
    pub fn new(name: impl Into<String>, date: BirthDate) -> Self {
        Birthday {
            name: name.into(),
            date,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn is_leap_month(&self) -> bool {
        self.date.is_leap_month()
    }

    pub fn is_lunar(&self) -> bool {
        self.date.is_lunar()
    }
}
