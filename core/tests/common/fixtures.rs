// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use ical_core::{Calendar, EventDraft, LocalStore};

/// A local date-time that exists in every time zone used for tests.
pub fn local(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, mi, 0)
        .earliest()
        .expect("test date-time should exist")
}

/// Calendars used by the tests: two writable ones and a read-only one.
pub fn test_calendars() -> Vec<Calendar> {
    vec![
        Calendar::new("Personal"),
        Calendar::new("Work"),
        Calendar {
            name: "Holidays".to_string(),
            read_only: true,
        },
    ]
}

/// An hour-long event on June 10th, 2026 at 14:00 in the default calendar.
pub fn test_event_draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        calendar: None,
        start: local(2026, 6, 10, 14, 0),
        end: local(2026, 6, 10, 15, 0),
        all_day: false,
        location: None,
        notes: None,
        recurrence: None,
    }
}

/// Opens a store over `dir` with [`test_calendars`].
pub async fn test_store(dir: &Path) -> LocalStore {
    LocalStore::open(dir, test_calendars())
        .await
        .expect("store should open")
}
