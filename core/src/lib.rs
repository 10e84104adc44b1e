// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of `ical`: date inputs, recurrence rules, and the calendar event store.

mod config;
mod datetime;
mod error;
mod event;
mod recurrence;
mod store;

pub use crate::config::{APP_NAME, Config, DEFAULT_CALENDAR, WeekStart, get_config_dir};
pub use crate::datetime::{
    DateInputParser, add_days, from_local_datetime, is_date_only, start_of_day,
};
pub use crate::error::{Error, Result};
pub use crate::event::{Calendar, Event, EventDraft, EventId, sort_events};
pub use crate::recurrence::{
    Frequency, RecurrencePattern, RecurrenceRule, RecurrenceSpec, Span, SpanSelection,
    build_rule, resolve_span,
};
pub use crate::store::{EventStore, LocalStore, find_writable_calendar};
