//! All-day event records handed to the ICS generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An all-day calendar event spanning `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllDayEvent {
    pub uid: String,
    pub title: String,
    pub start: NaiveDate,
    /// Exclusive, normally the day after `start`
    pub end: NaiveDate,
}

impl AllDayEvent {
    /// Build a one-day event. The UID is derived from `key` so regenerating
    /// the calendar keeps the same UIDs.
    pub fn new(key: &str, title: String, start: NaiveDate) -> Self {
        let end = start.succ_opt().unwrap_or(start);
        let uid = format!("{}@birthcal", Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()));
        AllDayEvent {
            uid,
            title,
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_next_day() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let event = AllDayEvent::new("k", "title".to_string(), start);
        assert_eq!(event.end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_uid_is_stable_per_key() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let a = AllDayEvent::new("张三/solar/2024", "x".to_string(), start);
        let b = AllDayEvent::new("张三/solar/2024", "y".to_string(), start);
        let c = AllDayEvent::new("张三/solar/2025", "x".to_string(), start);
        assert_eq!(a.uid, b.uid);
        assert_ne!(a.uid, c.uid);
        assert!(a.uid.ends_with("@birthcal"));
    }
}
