// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Result alias used throughout `ical-core`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while interpreting inputs or talking to the calendar store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not parse {option} value: {input}")]
    InvalidDateTime { option: String, input: String },

    #[error("Could not parse --recurrence-end value: {0}")]
    InvalidRecurrenceEnd(String),

    #[error("Could not normalize --recurrence-end value: {0}")]
    RecurrenceEndOverflow(String),

    #[error("Event is recurring. Use --this-only or --all-future.")]
    AmbiguousSpan,

    #[error("Event not found for id: {0}")]
    EventNotFound(String),

    #[error("Calendar not found: {name}. Writable calendars: {available}")]
    CalendarNotFound { name: String, available: String },

    #[error("Calendar is read-only: {0}")]
    CalendarReadOnly(String),

    #[error("No writable calendars found.")]
    NoWritableCalendar,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupted calendar store at {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
