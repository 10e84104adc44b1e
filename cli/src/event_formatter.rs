// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::Colorize;
use ical_core::Event;

use crate::util::{event_title, non_empty};

/// Formats events as blocks of lines, one block per event.
#[derive(Debug)]
pub struct EventFormatter {
    time_format: &'static str,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self { time_format: "%H:%M" }
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }

    fn write_event(&self, f: &mut fmt::Formatter<'_>, event: &Event) -> fmt::Result {
        let title = event_title(event);
        if event.all_day {
            writeln!(f, "{}  {}", "ALL DAY".cyan(), title.bold())?;
        } else {
            let range = format!(
                "{} - {}",
                event.start.format(self.time_format),
                event.end.format(self.time_format)
            );
            writeln!(f, "{}  {}", range.cyan(), title.bold())?;
        }

        write!(f, "ID: {}", event.id)?;

        if let Some(calendar) = non_empty(Some(&event.calendar)) {
            write!(f, "\nCalendar: {calendar}")?;
        }

        if let Some(location) = non_empty(event.location.as_deref()) {
            write!(f, "\nLocation: {location}")?;
        }

        let notes = event.notes.as_deref().map(|a| a.replace(['\r', '\n'], " "));
        if let Some(notes) = non_empty(notes.as_deref()) {
            write!(f, "\nNotes: {notes}")?;
        }

        Ok(())
    }
}

impl Default for EventFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.events.is_empty() {
            return f.write_str("No events.");
        }

        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            self.formatter.write_event(f, event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use ical_core::EventId;

    use super::*;

    fn event(title: &str, all_day: bool) -> Event {
        let start = Local
            .with_ymd_and_hms(2026, 2, 20, 9, 5, 0)
            .earliest()
            .unwrap();
        Event {
            id: EventId::new("uid-1"),
            title: title.to_string(),
            calendar: "Work".to_string(),
            start,
            end: start + chrono::TimeDelta::minutes(50),
            all_day,
            location: None,
            notes: None,
            recurrence: None,
        }
    }

    fn render(events: &[Event]) -> String {
        colored::control::set_override(false);
        EventFormatter::new().format(events).to_string()
    }

    #[test]
    fn test_no_events() {
        assert_eq!(render(&[]), "No events.");
    }

    #[test]
    fn test_timed_event() {
        let mut event = event("Standup", false);
        event.location = Some("Room 4".to_string());
        event.notes = Some("bring\nnotes".to_string());
        assert_eq!(
            render(&[event]),
            "09:05 - 09:55  Standup\nID: uid-1\nCalendar: Work\nLocation: Room 4\nNotes: bring notes"
        );
    }

    #[test]
    fn test_all_day_and_blank_title() {
        let mut event = event("  ", true);
        event.notes = Some("\n".to_string());
        assert_eq!(
            render(&[event]),
            "ALL DAY  (No Title)\nID: uid-1\nCalendar: Work"
        );
    }

    #[test]
    fn test_events_separated_by_blank_line() {
        let first = event("One", true);
        let mut second = event("Two", false);
        second.id = EventId::new("uid-2");
        assert_eq!(
            render(&[first, second]),
            "ALL DAY  One\nID: uid-1\nCalendar: Work\n\n09:05 - 09:55  Two\nID: uid-2\nCalendar: Work"
        );
    }
}
