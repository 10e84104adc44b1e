// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::Write};

use ical_core::{EventStore, Span, build_rule, find_writable_calendar, resolve_span};

use crate::cli::Session;
use crate::command::{AllDayTransition, EditIntent, RecurrenceUpdate};
use crate::util::{find_event, normalize_times};

impl EditIntent {
    pub async fn run<S: EventStore>(
        self,
        session: &mut Session<S>,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn Error>> {
        let mut event = find_event(&session.store, &self.id).await?;
        let recurring = event.is_recurring();

        if let Some(title) = self.title {
            event.title = title;
        }

        if let Some(name) = self.calendar.as_deref() {
            let calendars = session.store.calendars().await?;
            event.calendar = find_writable_calendar(&calendars, Some(name))?.name.clone();
        }

        if let Some(location) = self.location {
            event.location = Some(location);
        }
        if self.clear_location {
            event.location = None;
        }

        if let Some(notes) = self.notes {
            event.notes = Some(notes);
        }
        if self.clear_notes {
            event.notes = None;
        }

        let parser = &session.parser;
        let start = match self.start.as_deref() {
            Some(raw) => parser.parse_option("--start", raw)?,
            None => event.start,
        };
        let end = match self.end.as_deref() {
            Some(raw) => parser.parse_option("--end", raw)?,
            None => event.end,
        };

        let all_day = match self.all_day {
            AllDayTransition::None => event.all_day,
            AllDayTransition::MakeAllDay => true,
            AllDayTransition::MakeTimed => false,
        };
        (event.start, event.end) = normalize_times(start, end, all_day)?;
        event.all_day = all_day;

        let recurrence_changed = match &self.recurrence {
            RecurrenceUpdate::None => false,
            RecurrenceUpdate::Set(spec) => {
                event.recurrence = Some(build_rule(spec, parser)?);
                true
            }
            RecurrenceUpdate::Clear => {
                event.recurrence = None;
                true
            }
        };

        let span = resolve_span(recurring, self.span)?;
        if recurring && recurrence_changed && span != Span::FutureEvents {
            return Err("Changing the recurrence of a recurring event requires --all-future.".into());
        }

        tracing::debug!(id = %event.id, ?span, "updating event");
        let saved = session.store.save(&event, span).await?;

        writeln!(out, "Event updated.")?;
        writeln!(out, "ID: {}", saved.id)?;
        Ok(())
    }
}
