// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::RecurrenceRule;

/// Stable format of the occurrence part of an event id, in UTC.
const OCCURRENCE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// A calendar events can be stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// The display name, matched case-insensitively.
    pub name: String,

    /// Whether events in this calendar can be created, changed or removed.
    #[serde(default)]
    pub read_only: bool,
}

impl Calendar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
        }
    }

    pub fn is_writable(&self) -> bool {
        !self.read_only
    }
}

/// Identifies one occurrence of an event.
///
/// Written as the series uid for the first occurrence and `uid@YYYYMMDDTHHMMSSZ`
/// for later occurrences of a recurring series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId {
    /// The uid of the stored event or series.
    pub uid: String,

    /// Start of the targeted occurrence, if it is not the first one.
    pub occurrence: Option<DateTime<Utc>>,
}

impl EventId {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            occurrence: None,
        }
    }

    pub fn with_occurrence(uid: impl Into<String>, occurrence: DateTime<Utc>) -> Self {
        Self {
            uid: uid.into(),
            occurrence: Some(occurrence),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.occurrence {
            Some(at) => write!(f, "{}@{}", self.uid, at.format(OCCURRENCE_FORMAT)),
            None => f.write_str(&self.uid),
        }
    }
}

impl FromStr for EventId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('@') {
            None if !s.is_empty() => Ok(Self::new(s)),
            Some((uid, occurrence)) if !uid.is_empty() => {
                let naive = NaiveDateTime::parse_from_str(occurrence, OCCURRENCE_FORMAT)
                    .map_err(|_| format!("Invalid occurrence in event id: {s}"))?;
                Ok(Self::with_occurrence(uid, Utc.from_utc_datetime(&naive)))
            }
            _ => Err(format!("Invalid event id: {s}")),
        }
    }
}

/// A single occurrence of an event, as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The id of this occurrence.
    pub id: EventId,

    /// The title of the event, may be blank.
    pub title: String,

    /// Name of the calendar holding the event.
    pub calendar: String,

    /// Start of this occurrence.
    pub start: DateTime<Local>,

    /// End of this occurrence.
    pub end: DateTime<Local>,

    /// Whether the event spans whole days, from local midnight to local midnight.
    pub all_day: bool,

    pub location: Option<String>,

    pub notes: Option<String>,

    /// The rule of the series this occurrence belongs to.
    pub recurrence: Option<RecurrenceRule>,
}

impl Event {
    /// Whether this event is part of a recurring series.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

/// Draft for an event, used for creating new events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,

    /// Target calendar; the first writable calendar when `None`.
    pub calendar: Option<String>,

    pub start: DateTime<Local>,

    pub end: DateTime<Local>,

    pub all_day: bool,

    pub location: Option<String>,

    pub notes: Option<String>,

    pub recurrence: Option<RecurrenceRule>,
}

/// Sorts events for display: all-day events first, then by start, end and title.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(compare_events);
}

fn compare_events(a: &Event, b: &Event) -> Ordering {
    b.all_day
        .cmp(&a.all_day)
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.end.cmp(&b.end))
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn event(title: &str, start_hour: u32, hours: i64, all_day: bool) -> Event {
        let start = Local
            .with_ymd_and_hms(2026, 2, 20, start_hour, 0, 0)
            .earliest()
            .unwrap();
        Event {
            id: EventId::new(title),
            title: title.to_string(),
            calendar: "Calendar".to_string(),
            start,
            end: start + Duration::hours(hours),
            all_day,
            location: None,
            notes: None,
            recurrence: None,
        }
    }

    #[test]
    fn test_event_id_round_trip() {
        let id: EventId = "abc-123".parse().unwrap();
        assert_eq!(id, EventId::new("abc-123"));
        assert_eq!(id.to_string(), "abc-123");

        let at = Utc.with_ymd_and_hms(2026, 2, 20, 14, 0, 0).unwrap();
        let id = EventId::with_occurrence("abc-123", at);
        assert_eq!(id.to_string(), "abc-123@20260220T140000Z");
        assert_eq!("abc-123@20260220T140000Z".parse::<EventId>().unwrap(), id);
    }

    #[test]
    fn test_event_id_rejects_malformed() {
        assert!("".parse::<EventId>().is_err());
        assert!("@20260220T140000Z".parse::<EventId>().is_err());
        assert!("abc@tomorrow".parse::<EventId>().is_err());
    }

    #[test]
    fn test_sort_events() {
        let mut events = vec![
            event("b", 10, 1, false),
            event("late", 12, 1, false),
            event("holiday", 0, 24, true),
            event("A", 10, 1, false),
            event("long", 10, 2, false),
        ];
        sort_events(&mut events);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["holiday", "A", "b", "long", "late"]);
    }

    #[test]
    fn test_calendar_writable() {
        assert!(Calendar::new("Work").is_writable());
        let calendar = Calendar {
            name: "Holidays".to_string(),
            read_only: true,
        };
        assert!(!calendar.is_writable());
    }
}
