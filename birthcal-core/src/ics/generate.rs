//! ICS document generation.

use chrono::{DateTime, NaiveDate, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};

use crate::error::{BirthcalError, BirthcalResult};
use crate::event::AllDayEvent;

/// Calendar-wide settings for a generated document.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    pub calendar_name: Option<String>,
    pub reminder_minutes: Option<i64>,
    /// DTSTAMP for every event
    pub stamp: DateTime<Utc>,
}

impl Default for IcsOptions {
    fn default() -> Self {
        IcsOptions {
            calendar_name: None,
            reminder_minutes: None,
            stamp: Utc::now(),
        }
    }
}

/// Generate one .ics document holding all `events`, in order.
pub fn generate_ics(events: &[AllDayEvent], options: &IcsOptions) -> BirthcalResult<String> {
    if let Some(minutes) = options.reminder_minutes {
        if minutes < 0 {
            return Err(BirthcalError::IcsGenerate(format!(
                "reminder_minutes must not be negative, got {minutes}"
            )));
        }
    }

    let mut cal = Calendar::new();
    if let Some(ref name) = options.calendar_name {
        cal.append_property(Property::new("X-WR-CALNAME", name));
    }

    let dtstamp = options.stamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        if event.end <= event.start {
            return Err(BirthcalError::IcsGenerate(format!(
                "event '{}' ends before it starts",
                event.title
            )));
        }

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.summary(&event.title);

        add_date_property(&mut ics_event, "DTSTART", event.start);
        add_date_property(&mut ics_event, "DTEND", event.end);

        // Birthdays never block time
        ics_event.add_property("TRANSP", "TRANSPARENT");

        if let Some(minutes) = options.reminder_minutes {
            let trigger = Trigger::before_start(chrono::Duration::minutes(minutes));
            ics_event.alarm(Alarm::display(&event.title, trigger));
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Rewrite the icalendar crate's output into the shape birthcal ships.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:BIRTHCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a VALUE=DATE property (all-day start/end)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_event(title: &str, y: i32, m: u32, d: u32) -> AllDayEvent {
        let start = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        AllDayEvent::new(title, title.to_string(), start)
    }

    fn options() -> IcsOptions {
        IcsOptions {
            calendar_name: None,
            reminder_minutes: None,
            stamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_all_day_event_has_value_date() {
        let events = vec![make_event("阳历诞辰 张三", 2000, 2, 29)];
        let ics = generate_ics(&events, &options()).unwrap();

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20000229"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20000301"),
            "DTEND should be the next day. ICS:\n{}",
            ics
        );
        assert!(ics.contains("SUMMARY:阳历诞辰 张三"));
        assert!(ics.contains("TRANSP:TRANSPARENT"));
        assert!(ics.contains("DTSTAMP:20250101T000000Z"));
    }

    #[test]
    fn test_one_vevent_per_record_in_order() {
        let events = vec![
            make_event("first", 2001, 2, 28),
            make_event("second", 2002, 2, 28),
            make_event("third", 2003, 2, 28),
        ];
        let ics = generate_ics(&events, &options()).unwrap();

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
        let first = ics.find("SUMMARY:first").unwrap();
        let second = ics.find("SUMMARY:second").unwrap();
        let third = ics.find("SUMMARY:third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_header_is_cleaned_up() {
        let mut opts = options();
        opts.calendar_name = Some("生日".to_string());
        let ics = generate_ics(&[], &opts).unwrap();

        assert!(ics.contains("PRODID:BIRTHCAL"));
        assert!(!ics.contains("CALSCALE"));
        assert!(ics.contains("X-WR-CALNAME:生日"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_alarm_is_minimal() {
        let mut opts = options();
        opts.reminder_minutes = Some(60);
        let events = vec![make_event("农历生日 李四", 2024, 1, 18)];
        let ics = generate_ics(&events, &opts).unwrap();

        assert!(ics.contains("BEGIN:VALARM"), "Should have VALARM");
        assert!(ics.contains("ACTION:DISPLAY"), "Should have ACTION:DISPLAY");
        let valarm_section: String = ics
            .split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap()
            .to_string();
        assert!(
            !valarm_section.contains("UID:"),
            "VALARM should not have UID. Got:\n{}",
            valarm_section
        );
        assert!(
            !valarm_section.contains("DTSTAMP:"),
            "VALARM should not have DTSTAMP. Got:\n{}",
            valarm_section
        );
    }

    #[test]
    fn test_negative_reminder_is_rejected() {
        let mut opts = options();
        opts.reminder_minutes = Some(-5);
        assert!(matches!(
            generate_ics(&[], &opts),
            Err(BirthcalError::IcsGenerate(_))
        ));
    }
}
