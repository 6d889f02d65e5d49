//! Birthday string parsing.
//!
//! Two notations are accepted and told apart by the first character:
//! - Arabic digits: `"2000-2-29"`, `"1990/6/15"`, `"6.15"` (Gregorian)
//! - Chinese numerals: `"一九九〇年闰四月十五"`, `"腊月初八"` (lunar)

use chrono::NaiveDate;

use crate::birthday::{BirthDate, Birthday};
use crate::error::{BirthcalError, BirthcalResult};
use crate::numeral;

/// Markers stripped from the day part of a lunar date.
const DAY_MARKERS: &[char] = &['初', '号', '日'];
const LEAP_MARKER: char = '闰';

/// Parse one configured birthday.
pub fn parse_birthday(name: &str, raw: &str) -> BirthcalResult<Birthday> {
    if name.trim().is_empty() {
        return Err(BirthcalError::format(name, raw, "name is empty"));
    }

    let input = raw.trim();
    let date = match input.chars().next() {
        Some(c) if c.is_ascii_digit() => parse_solar(input),
        Some(_) => parse_lunar(input),
        None => Err("birthday is empty".to_string()),
    }
    .map_err(|reason| BirthcalError::format(name, raw, reason))?;

    Ok(Birthday::new(name.trim(), date))
}

fn parse_solar(input: &str) -> Result<BirthDate, String> {
    let groups: Vec<&str> = input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .collect();

    let (year, month, day) = match groups.as_slice() {
        [y, m, d] => (Some(*y), *m, *d),
        [m, d] => (None, *m, *d),
        _ => return Err(format!("expected 2 or 3 numbers, found {}", groups.len())),
    };

    let year = match year {
        Some(y) => known_year(y.parse::<i32>().map_err(|_| format!("invalid year {y:?}"))?),
        None => None,
    };
    let month: u32 = month.parse().map_err(|_| format!("invalid month {month:?}"))?;
    let day: u32 = day.parse().map_err(|_| format!("invalid day {day:?}"))?;

    check_month(month)?;
    let max_day = max_solar_day(month);
    if day == 0 || day > max_day {
        return Err(format!("day {day} is outside 1..={max_day} for month {month}"));
    }
    if let Some(year) = year {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(format!("{year}-{month}-{day} does not exist"));
        }
    }

    Ok(BirthDate::Solar { year, month, day })
}

fn parse_lunar(input: &str) -> Result<BirthDate, String> {
    let segments: Vec<&str> = input.split(['年', '月']).collect();
    let (year, month, day) = match segments.as_slice() {
        [y, m, d] => (Some(*y), *m, *d),
        [m, d] => (None, *m, *d),
        _ => return Err("expected <year>年<month>月<day> or <month>月<day>".to_string()),
    };

    let year = match year {
        Some(y) => lunar_year(y)?,
        None => None,
    };

    let leap_month = month.contains(LEAP_MARKER);
    let month_word: String = month.chars().filter(|c| *c != LEAP_MARKER).collect();
    let month = numeral::lookup(&month_word)
        .ok_or_else(|| format!("unknown month numeral {month_word:?}"))?;
    check_month(month)?;

    let day_word: String = day.chars().filter(|c| !DAY_MARKERS.contains(c)).collect();
    let day = lunar_day(&day_word).ok_or_else(|| format!("unknown day numeral {day_word:?}"))?;
    if !(1..=30).contains(&day) {
        return Err(format!("lunar day {day} is outside 1..=30"));
    }

    Ok(BirthDate::Lunar {
        year,
        month,
        day,
        leap_month,
    })
}

/// Read a lunar year digit by digit: 一九九〇 -> 1990.
fn lunar_year(word: &str) -> Result<Option<i32>, String> {
    if word.is_empty() {
        return Ok(None);
    }
    let digits = word
        .chars()
        .map(|c| numeral::digit(c).and_then(|d| char::from_digit(d, 10)))
        .collect::<Option<String>>()
        .ok_or_else(|| format!("invalid year numeral {word:?}"))?;
    let year = digits
        .parse::<i32>()
        .map_err(|_| format!("invalid year {word:?}"))?;
    Ok(known_year(year))
}

/// Compose a lunar day from its numeral spelling.
///
/// Single characters go through the numeral table. Longer words are rewritten
/// into decimal digits: `<X>十<Y>` -> `<X><Y>`, leading 十 -> `1`, trailing
/// 十 -> `0`, 廿 -> `2`, then each remaining digit character.
fn lunar_day(word: &str) -> Option<u32> {
    let mut chars: Vec<char> = word.chars().collect();
    if chars.len() == 1 {
        return numeral::digit(chars[0]).or_else(|| numeral::lookup(word));
    }

    if let Some(i) = (1..chars.len().saturating_sub(1)).find(|&i| chars[i] == '十') {
        chars.remove(i);
    }
    if chars.first() == Some(&'十') {
        chars[0] = '1';
    }
    if let Some(last) = chars.last_mut().filter(|c| **c == '十') {
        *last = '0';
    }
    if let Some(c) = chars.iter_mut().find(|c| **c == '廿') {
        *c = '2';
    }

    let digits = chars
        .into_iter()
        .map(|c| numeral::digit(c).and_then(|d| char::from_digit(d, 10)))
        .collect::<Option<String>>()?;
    digits.parse().ok()
}

/// Year 0 stands for "unknown".
fn known_year(year: i32) -> Option<i32> {
    (year != 0).then_some(year)
}

fn check_month(month: u32) -> Result<(), String> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(format!("month {month} is outside 1..=12"))
    }
}

/// Longest a Gregorian month can be in any year (February counts 29).
fn max_solar_day(month: u32) -> u32 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
