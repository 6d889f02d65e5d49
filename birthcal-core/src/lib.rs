//! Core of birthcal: turn a list of birthdays into calendar events.
//!
//! - `parse`: birthday strings (Arabic or Chinese numerals) into [`Birthday`]
//! - `lunar`: lunar to Gregorian conversion behind [`LunarConverter`]
//! - `expand`: one [`Occurrence`] per year for 1900..=2099
//! - `ics`: all-day events as an .ics document

pub mod birthday;
pub mod config;
pub mod error;
pub mod event;
pub mod expand;
pub mod ics;
pub mod lunar;
pub mod numeral;
pub mod parse;

pub use birthday::{BirthDate, Birthday};
pub use config::{BirthdayEntry, Config};
pub use error::{BirthcalError, BirthcalResult};
pub use event::AllDayEvent;
pub use expand::{END_YEAR, Expander, FIRST_YEAR, Occurrence, Occurrences};
pub use lunar::{ChineseCalendar, LunarConverter, LunarDate};
pub use parse::parse_birthday;
