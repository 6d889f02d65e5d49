pub mod check;
pub mod generate;
pub mod show;
pub mod upcoming;

use birthcal_core::{ChineseCalendar, Expander};

/// Expander backed by the Chinese calendar.
fn expander() -> Expander<ChineseCalendar> {
    Expander::new(ChineseCalendar::new())
}
