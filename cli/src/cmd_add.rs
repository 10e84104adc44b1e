// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::Write};

use ical_core::{EventDraft, EventStore, build_rule, find_writable_calendar};

use crate::cli::Session;
use crate::command::AddIntent;
use crate::util::normalize_times;

impl AddIntent {
    pub async fn run<S: EventStore>(
        self,
        session: &mut Session<S>,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn Error>> {
        let parser = &session.parser;
        let start = parser.parse_option("--start", &self.start)?;
        let end = parser.parse_option("--end", &self.end)?;
        let (start, end) = normalize_times(start, end, self.all_day)?;

        let calendars = session.store.calendars().await?;
        let calendar = find_writable_calendar(&calendars, self.calendar.as_deref())?;

        let recurrence = match &self.recurrence {
            Some(spec) => Some(build_rule(spec, parser)?),
            None => None,
        };

        let draft = EventDraft {
            title: self.title,
            calendar: Some(calendar.name.clone()),
            start,
            end,
            all_day: self.all_day,
            location: self.location,
            notes: self.notes,
            recurrence,
        };

        tracing::debug!(?draft, "creating event");
        let event = session.store.create(draft).await?;

        writeln!(out, "Event created.")?;
        writeln!(out, "ID: {}", event.id)?;
        Ok(())
    }
}
