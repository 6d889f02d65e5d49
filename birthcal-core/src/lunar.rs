//! Lunar to solar date conversion.
//!
//! The expander only depends on the [`LunarConverter`] trait so that tests can
//! swap in a fixed table. [`ChineseCalendar`] is the real implementation,
//! backed by the ICU4X Chinese calendar.

use chrono::NaiveDate;
use icu_calendar::chinese::Chinese;
use icu_calendar::{Date, Ref};

/// Offset between a Gregorian year and the ICU4X Chinese year that starts in it
/// (Chinese year 1 began in 2637 BCE).
const CHINESE_YEAR_OFFSET: i32 = 2637;

/// A date in the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    /// Gregorian year in which this lunar year begins
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap_month: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32, leap_month: bool) -> Self {
        LunarDate {
            year,
            month,
            day,
            leap_month,
        }
    }

    pub fn with_day(self, day: u32) -> Self {
        LunarDate { day, ..self }
    }

    /// ICU month code: `M05` for the fifth month, `M05L` for its leap month.
    fn month_code(&self) -> String {
        let leap = if self.leap_month { "L" } else { "" };
        format!("M{:02}{}", self.month, leap)
    }
}

/// Converts lunar dates to Gregorian dates.
pub trait LunarConverter {
    /// Returns `None` if the requested day does not exist: the month is too
    /// short, or a leap month was asked for in a year without one.
    fn lunar_to_solar(&self, date: LunarDate) -> Option<NaiveDate>;
}

impl<T: LunarConverter + ?Sized> LunarConverter for &T {
    fn lunar_to_solar(&self, date: LunarDate) -> Option<NaiveDate> {
        (**self).lunar_to_solar(date)
    }
}

/// Chinese calendar conversions using ICU4X.
pub struct ChineseCalendar {
    calendar: Chinese,
}

impl Default for ChineseCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl ChineseCalendar {
    pub fn new() -> Self {
        ChineseCalendar {
            calendar: Chinese::new(),
        }
    }

    /// Find the ordinal month (1..=13) that carries the requested month code.
    fn ordinal_month(&self, year: i32, code: &str) -> Option<u8> {
        let first = Date::try_new_chinese_date_with_calendar(year, 1, 1, Ref(&self.calendar)).ok()?;
        (1..=first.months_in_year()).find(|&ordinal| {
            Date::try_new_chinese_date_with_calendar(year, ordinal, 1, Ref(&self.calendar))
                .is_ok_and(|d| d.month().code.0.as_str() == code)
        })
    }
}

impl LunarConverter for ChineseCalendar {
    fn lunar_to_solar(&self, date: LunarDate) -> Option<NaiveDate> {
        let year = date.year + CHINESE_YEAR_OFFSET;
        let day = u8::try_from(date.day).ok()?;
        let ordinal = self.ordinal_month(year, &date.month_code())?;

        let month_start =
            Date::try_new_chinese_date_with_calendar(year, ordinal, 1, Ref(&self.calendar)).ok()?;
        if day == 0 || day > month_start.days_in_month() {
            return None;
        }

        let lunar =
            Date::try_new_chinese_date_with_calendar(year, ordinal, day, Ref(&self.calendar)).ok()?;
        let iso = lunar.to_iso();
        NaiveDate::from_ymd_opt(iso.year().number, iso.month().ordinal, iso.day_of_month().0)
    }
}
