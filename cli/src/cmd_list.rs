// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::Write};

use chrono::{DateTime, Datelike, TimeZone};
use ical_core::{EventStore, WeekStart, add_days, start_of_day};

use crate::cli::Session;
use crate::event_formatter::EventFormatter;

/// The days listed by `today`, `tomorrow` and `week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRange {
    Today,
    Tomorrow,
    Week,
}

impl ListRange {
    /// The half-open interval of local days covered, relative to `now`.
    pub fn interval<Tz: TimeZone>(
        self,
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let today = start_of_day(now);
        let (start, days) = match self {
            ListRange::Today => (today, 1),
            ListRange::Tomorrow => (add_days(&today, 1)?, 1),
            ListRange::Week => {
                let weekday = now.weekday().num_days_from_monday();
                let first = week_start.weekday().num_days_from_monday();
                let back = (7 + weekday - first) % 7;
                (add_days(&today, -i64::from(back))?, 7)
            }
        };
        let end = add_days(&start, days)?;
        Some((start, end))
    }

    pub async fn run<S: EventStore>(
        self,
        session: &Session<S>,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn Error>> {
        let (start, end) = self
            .interval(session.parser.now(), session.week_start)
            .ok_or("Could not determine date range.")?;

        tracing::debug!(range = ?self, start = %start, end = %end, "listing events");
        let events = session.store.events_between(start, end).await?;

        let formatter = EventFormatter::new();
        writeln!(out, "{}", formatter.format(&events))?;
        Ok(())
    }
}
