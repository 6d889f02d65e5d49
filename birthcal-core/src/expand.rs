//! Expansion of a birthday into one occurrence per calendar year.

use chrono::NaiveDate;
use std::ops::Range;
use tracing::{debug, trace};

use crate::birthday::{BirthDate, Birthday};
use crate::event::AllDayEvent;
use crate::lunar::{LunarConverter, LunarDate};

/// First candidate year when the birth year is unknown.
pub const FIRST_YEAR: i32 = 1900;
/// Candidate years stop before this one.
pub const END_YEAR: i32 = 2100;

const SHIFTED_SUFFIX: &str = " (提前一天)";

/// One resolved birthday in one candidate year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// The year being evaluated (lunar year for lunar birthdays)
    pub calendar_year: i32,
    /// Resolved Gregorian date
    pub date: NaiveDate,
    /// The nominal date did not exist, so the occurrence moved one day earlier
    pub shifted_earlier: bool,
    /// Completed years, if the birth year is known
    pub age: Option<i32>,
    pub title: String,
}

impl Occurrence {
    /// Materialize as an all-day event.
    pub fn to_event(&self, birthday: &Birthday) -> AllDayEvent {
        let kind = if birthday.is_lunar() { "lunar" } else { "solar" };
        let key = format!("{}/{}/{}", birthday.name, kind, self.calendar_year);
        AllDayEvent::new(&key, self.title.clone(), self.date)
    }
}

/// Expands birthdays across the year window, resolving lunar dates through `C`.
pub struct Expander<C> {
    converter: C,
}

impl<C: LunarConverter> Expander<C> {
    pub fn new(converter: C) -> Self {
        Expander { converter }
    }

    /// Lazily yield every occurrence of `birthday`, in ascending year order.
    /// Years where the date cannot be resolved are left out.
    pub fn occurrences<'a>(&'a self, birthday: &'a Birthday) -> Occurrences<'a, C> {
        Occurrences {
            converter: &self.converter,
            birthday,
            years: year_range(birthday.year()),
        }
    }

    /// All events for `birthdays`, in input order then ascending year.
    pub fn events(&self, birthdays: &[Birthday]) -> Vec<AllDayEvent> {
        let mut events = Vec::new();
        for birthday in birthdays {
            let before = events.len();
            events.extend(
                self.occurrences(birthday)
                    .map(|occurrence| occurrence.to_event(birthday)),
            );
            debug!(name = %birthday.name, count = events.len() - before, "expanded birthday");
        }
        events
    }
}

/// Iterator over the occurrences of one birthday.
pub struct Occurrences<'a, C> {
    converter: &'a C,
    birthday: &'a Birthday,
    years: Range<i32>,
}

impl<C> Clone for Occurrences<'_, C> {
    fn clone(&self) -> Self {
        Occurrences {
            converter: self.converter,
            birthday: self.birthday,
            years: self.years.clone(),
        }
    }
}

impl<C: LunarConverter> Iterator for Occurrences<'_, C> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        for year in self.years.by_ref() {
            if let Some(occurrence) = resolve(self.converter, self.birthday, year) {
                return Some(occurrence);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.years.size_hint().1)
    }
}

fn year_range(birth_year: Option<i32>) -> Range<i32> {
    birth_year.unwrap_or(FIRST_YEAR)..END_YEAR
}

fn resolve<C: LunarConverter>(converter: &C, birthday: &Birthday, year: i32) -> Option<Occurrence> {
    let (date, shifted_earlier) = match birthday.date {
        BirthDate::Lunar {
            month,
            day,
            leap_month,
            ..
        } => resolve_lunar(converter, LunarDate::new(year, month, day, leap_month))?,
        BirthDate::Solar { month, day, .. } => resolve_solar(year, month, day)?,
    };

    let age = birthday.year().map(|birth_year| year - birth_year);
    Some(Occurrence {
        calendar_year: year,
        date,
        shifted_earlier,
        age,
        title: title(birthday, age, shifted_earlier),
    })
}

fn resolve_lunar<C: LunarConverter>(converter: &C, date: LunarDate) -> Option<(NaiveDate, bool)> {
    if let Some(solar) = converter.lunar_to_solar(date) {
        return Some((solar, false));
    }
    if date.day == 30 {
        if let Some(solar) = converter.lunar_to_solar(date.with_day(29)) {
            trace!(year = date.year, month = date.month, "no 30th day, using the 29th");
            return Some((solar, true));
        }
    }
    debug!(
        year = date.year,
        month = date.month,
        day = date.day,
        leap = date.leap_month,
        "lunar date does not exist, skipping year"
    );
    None
}

fn resolve_solar(year: i32, month: u32, day: u32) -> Option<(NaiveDate, bool)> {
    if month == 2 && day == 29 && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28).map(|d| (d, true));
    }
    NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, false))
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn title(birthday: &Birthday, age: Option<i32>, shifted_earlier: bool) -> String {
    let kind = birthday.date.calendar_label();
    let name = &birthday.name;
    let mut title = match age {
        None => format!("{kind}生日 {name}"),
        Some(0) => format!("{kind}诞辰 {name}"),
        Some(1) => format!("{kind}周岁 {name}"),
        Some(age) => format!("{kind}生日 {name}{age}周岁"),
    };
    if shifted_earlier {
        title.push_str(SHIFTED_SUFFIX);
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Converter backed by a fixed table. Lunar dates map to the Gregorian date
    /// with the same month and day unless listed as missing or overridden.
    #[derive(Default)]
    struct TableConverter {
        overrides: HashMap<LunarDate, NaiveDate>,
        missing: Vec<LunarDate>,
    }

    impl LunarConverter for TableConverter {
        fn lunar_to_solar(&self, date: LunarDate) -> Option<NaiveDate> {
            if self.missing.contains(&date) {
                return None;
            }
            if let Some(d) = self.overrides.get(&date) {
                return Some(*d);
            }
            if date.leap_month {
                return None;
            }
            NaiveDate::from_ymd_opt(date.year, date.month, date.day.min(28))
        }
    }

    fn solar(name: &str, year: Option<i32>, month: u32, day: u32) -> Birthday {
        Birthday::new(name, BirthDate::Solar { year, month, day })
    }

    fn lunar(name: &str, year: Option<i32>, month: u32, day: u32, leap_month: bool) -> Birthday {
        Birthday::new(
            name,
            BirthDate::Lunar {
                year,
                month,
                day,
                leap_month,
            },
        )
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_year_titles() {
        let expander = Expander::new(TableConverter::default());
        let birthday = solar("王五", Some(1990), 6, 15);
        let all: Vec<_> = expander.occurrences(&birthday).collect();

        assert_eq!(all.len(), (2099 - 1990 + 1) as usize);
        assert_eq!(all[0].calendar_year, 1990);
        assert_eq!(all[0].title, "阳历诞辰 王五");
        assert_eq!(all[1].title, "阳历周岁 王五");
        assert_eq!(all[2].title, "阳历生日 王五2周岁");
        assert_eq!(all.last().unwrap().title, "阳历生日 王五109周岁");
        assert_eq!(all.last().unwrap().date, ymd(2099, 6, 15));
        assert!(all.iter().all(|o| !o.shifted_earlier));
        assert!(all.windows(2).all(|w| w[0].calendar_year + 1 == w[1].calendar_year));
    }

    #[test]
    fn test_unknown_year_spans_whole_window() {
        let expander = Expander::new(TableConverter::default());
        let birthday = solar("赵六", None, 1, 1);
        let all: Vec<_> = expander.occurrences(&birthday).collect();

        assert_eq!(all.len(), 200);
        assert_eq!(all[0].calendar_year, FIRST_YEAR);
        assert_eq!(all[199].calendar_year, END_YEAR - 1);
        assert!(all.iter().all(|o| o.title == "阳历生日 赵六" && o.age.is_none()));
    }

    #[test]
    fn test_feb_29_shifts_to_feb_28() {
        let expander = Expander::new(TableConverter::default());
        let birthday = solar("张三", Some(2000), 2, 29);
        let all: Vec<_> = expander.occurrences(&birthday).take(5).collect();

        assert_eq!(all[0].date, ymd(2000, 2, 29));
        assert!(!all[0].shifted_earlier);
        assert_eq!(all[1].date, ymd(2001, 2, 28));
        assert!(all[1].shifted_earlier);
        assert_eq!(all[1].title, "阳历周岁 张三 (提前一天)");
        assert_eq!(all[4].date, ymd(2004, 2, 29));
        assert_eq!(all[4].title, "阳历生日 张三4周岁");

        // 1900 and 2100 are not leap years, 2000 is
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_feb_29_without_year_starts_shifted_in_1900() {
        let expander = Expander::new(TableConverter::default());
        let birthday = solar("小明", None, 2, 29);
        let all: Vec<_> = expander.occurrences(&birthday).collect();

        assert_eq!(all.len(), 200);
        assert_eq!(all[0].date, ymd(1900, 2, 28));
        assert!(all[0].shifted_earlier);
        assert_eq!(all[0].title, "阳历生日 小明 (提前一天)");
        assert_eq!(all[4].date, ymd(1904, 2, 29));
        assert!(!all[4].shifted_earlier);
        assert_eq!(all[199].date, ymd(2099, 2, 28));
    }

    #[test]
    fn test_lunar_thirtieth_falls_back_to_twenty_ninth() {
        let mut converter = TableConverter::default();
        converter.missing.push(LunarDate::new(2001, 3, 30, false));
        converter
            .overrides
            .insert(LunarDate::new(2001, 3, 29, false), ymd(2001, 4, 21));
        converter.overrides.insert(LunarDate::new(2000, 3, 30, false), ymd(2000, 5, 3));
        converter.overrides.insert(LunarDate::new(2002, 3, 30, false), ymd(2002, 5, 11));

        let expander = Expander::new(converter);
        let birthday = lunar("孙七", Some(2000), 3, 30, false);
        let all: Vec<_> = expander.occurrences(&birthday).take(3).collect();

        assert_eq!(all[0].date, ymd(2000, 5, 3));
        assert_eq!(all[0].title, "农历诞辰 孙七");
        assert_eq!(all[1].date, ymd(2001, 4, 21));
        assert!(all[1].shifted_earlier);
        assert_eq!(all[1].title, "农历周岁 孙七 (提前一天)");
        assert_eq!(all[2].date, ymd(2002, 5, 11));
        assert!(!all[2].shifted_earlier);
    }

    #[test]
    fn test_lunar_missing_year_is_skipped() {
        let mut converter = TableConverter::default();
        converter.missing.push(LunarDate::new(2001, 3, 30, false));
        converter.missing.push(LunarDate::new(2001, 3, 29, false));
        converter.missing.push(LunarDate::new(2002, 3, 15, false));

        let expander = Expander::new(converter);

        let thirtieth = lunar("周八", Some(2000), 3, 30, false);
        let years: Vec<_> = expander
            .occurrences(&thirtieth)
            .take(3)
            .map(|o| o.calendar_year)
            .collect();
        assert_eq!(years, vec![2000, 2002, 2003]);

        // Only the 30th gets a fallback
        let fifteenth = lunar("吴九", Some(2001), 3, 15, false);
        let years: Vec<_> = expander
            .occurrences(&fifteenth)
            .take(2)
            .map(|o| o.calendar_year)
            .collect();
        assert_eq!(years, vec![2001, 2003]);
    }

    #[test]
    fn test_lunar_leap_month_only_in_leap_years() {
        let mut converter = TableConverter::default();
        converter
            .overrides
            .insert(LunarDate::new(2020, 4, 15, true), ymd(2020, 6, 6));
        converter
            .overrides
            .insert(LunarDate::new(2023, 4, 15, true), ymd(2023, 6, 3));

        let expander = Expander::new(converter);
        let birthday = lunar("郑十", None, 4, 15, true);
        let all: Vec<_> = expander.occurrences(&birthday).collect();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].date, ymd(2020, 6, 6));
        assert_eq!(all[0].title, "农历生日 郑十");
        assert_eq!(all[1].calendar_year, 2023);
    }

    #[test]
    fn test_occurrences_are_restartable() {
        let expander = Expander::new(TableConverter::default());
        let birthday = lunar("钱一", Some(1950), 8, 15, false);

        let first: Vec<_> = expander.occurrences(&birthday).collect();
        let second: Vec<_> = expander.occurrences(&birthday).collect();
        assert_eq!(first, second);

        let iter = expander.occurrences(&birthday);
        let cloned: Vec<_> = iter.clone().collect();
        assert_eq!(cloned, iter.collect::<Vec<_>>());
    }

    #[test]
    fn test_birth_year_after_window_is_empty() {
        let expander = Expander::new(TableConverter::default());
        let birthday = solar("未来", Some(2150), 1, 1);
        assert_eq!(expander.occurrences(&birthday).count(), 0);
    }

    #[test]
    fn test_events_keep_input_order() {
        let expander = Expander::new(TableConverter::default());
        let birthdays = vec![
            solar("乙", Some(2098), 12, 31),
            solar("甲", Some(2097), 1, 1),
        ];
        let events = expander.events(&birthdays);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["阳历诞辰 乙", "阳历周岁 乙", "阳历诞辰 甲", "阳历周岁 甲", "阳历生日 甲2周岁"]
        );
        assert_eq!(events[1].start, ymd(2099, 12, 31));
        assert_eq!(events[1].end, ymd(2100, 1, 1));
    }
}
