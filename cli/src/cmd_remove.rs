// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::Write};

use ical_core::{Event, EventStore, add_days, resolve_span, start_of_day};

use crate::cli::Session;
use crate::command::{RemoveIntent, Selector};
use crate::util::{event_title, find_event};

impl RemoveIntent {
    pub async fn run<S: EventStore>(
        self,
        session: &mut Session<S>,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn Error>> {
        let event = match &self.selector {
            Selector::ById(id) => find_event(&session.store, id).await?,
            Selector::ByTitleAndStart {
                title,
                start,
                calendar,
            } => find_by_title_and_start(session, title, start, calendar.as_deref()).await?,
        };

        let span = resolve_span(event.is_recurring(), self.span)?;
        tracing::debug!(id = %event.id, ?span, "removing event");
        session.store.remove(&event, span).await?;

        writeln!(out, "Event removed.")?;
        Ok(())
    }
}

/// The single event on the local day of `start` matching the title and starting within a second.
async fn find_by_title_and_start<S: EventStore>(
    session: &Session<S>,
    title: &str,
    start: &str,
    calendar: Option<&str>,
) -> Result<Event, Box<dyn Error>> {
    let start = session.parser.parse_option("--start", start)?;
    let day = start_of_day(&start);
    let next_day = add_days(&day, 1).ok_or("Could not determine day range for selector.")?;

    let title = title.to_lowercase();
    let calendar = calendar.map(str::to_lowercase);
    let mut matches: Vec<Event> = session
        .store
        .events_between(day, next_day)
        .await?
        .into_iter()
        .filter(|event| {
            event_title(event).to_lowercase() == title
                && (event.start - start).num_milliseconds().abs() < 1000
                && calendar
                    .as_ref()
                    .is_none_or(|a| event.calendar.to_lowercase() == *a)
        })
        .collect();

    match matches.len() {
        0 => Err("No matching event found for title/start selector.".into()),
        1 => Ok(matches.remove(0)),
        n => Err(format!(
            "Multiple matching events found ({n}). Use --id to remove a specific event."
        )
        .into()),
    }
}
