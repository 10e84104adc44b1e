// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod local;

pub use local::LocalStore;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::{Error, Result};
use crate::event::{Calendar, Event, EventDraft, EventId};
use crate::recurrence::Span;

/// A place calendar events are read from and written to.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Asks for permission to read and write events, `false` if it was denied.
    async fn request_access(&self) -> Result<bool> {
        Ok(true)
    }

    /// All calendars known to the store.
    async fn calendars(&self) -> Result<Vec<Calendar>>;

    /// Looks up an occurrence by id. A bare series uid yields its first occurrence.
    async fn event(&self, id: &EventId) -> Result<Option<Event>>;

    /// Occurrences overlapping `[start, end)`, sorted for display.
    async fn events_between(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Event>>;

    /// Creates a new event, returning its first occurrence.
    async fn create(&mut self, draft: EventDraft) -> Result<Event>;

    /// Writes the fields of `event` back to the occurrence identified by `event.id`.
    async fn save(&mut self, event: &Event, span: Span) -> Result<Event>;

    /// Removes the occurrence identified by `event.id`.
    async fn remove(&mut self, event: &Event, span: Span) -> Result<()>;
}

/// Picks a writable calendar by case-insensitive name, or the first writable one.
pub fn find_writable_calendar<'a>(
    calendars: &'a [Calendar],
    name: Option<&str>,
) -> Result<&'a Calendar> {
    let mut writable = calendars.iter().filter(|a| a.is_writable()).peekable();
    if writable.peek().is_none() {
        return Err(Error::NoWritableCalendar);
    }

    let Some(name) = name.map(str::trim).filter(|a| !a.is_empty()) else {
        return writable.next().ok_or(Error::NoWritableCalendar);
    };

    let needle = name.to_lowercase();
    let mut available = Vec::new();
    for calendar in writable {
        if calendar.name.to_lowercase() == needle {
            return Ok(calendar);
        }
        available.push(calendar.name.as_str());
    }

    Err(Error::CalendarNotFound {
        name: name.to_string(),
        available: available.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendars() -> Vec<Calendar> {
        vec![
            Calendar {
                name: "Holidays".to_string(),
                read_only: true,
            },
            Calendar::new("Personal"),
            Calendar::new("Work"),
        ]
    }

    #[test]
    fn test_find_writable_calendar_default() {
        let calendars = calendars();
        let found = find_writable_calendar(&calendars, None).unwrap();
        assert_eq!(found.name, "Personal");
    }

    #[test]
    fn test_find_writable_calendar_case_insensitive() {
        let calendars = calendars();
        let found = find_writable_calendar(&calendars, Some("wORK")).unwrap();
        assert_eq!(found.name, "Work");
    }

    #[test]
    fn test_find_writable_calendar_skips_read_only() {
        let calendars = calendars();
        let err = find_writable_calendar(&calendars, Some("holidays")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Calendar not found: holidays. Writable calendars: Personal, Work"
        );
    }

    #[test]
    fn test_find_writable_calendar_none_writable() {
        let calendars = vec![Calendar {
            name: "Holidays".to_string(),
            read_only: true,
        }];
        let err = find_writable_calendar(&calendars, None).unwrap_err();
        assert!(matches!(err, Error::NoWritableCalendar));
    }
}
