// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::datetime::from_local_datetime;
use crate::error::{Error, Result};
use crate::event::{Calendar, Event, EventDraft, EventId, sort_events};
use crate::recurrence::{RecurrenceRule, Span};
use crate::store::{EventStore, find_writable_calendar};

/// Steps in a row that may land on nonexistent days before a series is considered exhausted.
const MAX_CONSECUTIVE_MISSES: u32 = 8;

/// Calendar store kept in a single JSON document on the local disk.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    calendars: Vec<Calendar>,
    document: Document,
}

impl LocalStore {
    /// File name of the document inside the calendar directory.
    pub const FILE_NAME: &str = "store.json";

    /// Opens the store in `dir`; a missing document is treated as an empty store.
    #[tracing::instrument(skip(calendars))]
    pub async fn open(dir: &Path, calendars: Vec<Calendar>) -> Result<Self> {
        let path = dir.join(Self::FILE_NAME);
        let document = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|source| Error::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no store document yet, starting empty");
                Document::default()
            }
            Err(source) => return Err(Error::Io { path, source }),
        };

        tracing::debug!(records = document.events.len(), "calendar store loaded");
        Ok(Self {
            path,
            calendars,
            document,
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content =
            serde_json::to_string_pretty(&self.document).map_err(|source| Error::Json {
                path: self.path.clone(),
                source,
            })?;

        // write then rename, so an interrupted write never truncates the store
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await.map_err(|source| Error::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), "calendar store saved");
        Ok(())
    }

    fn locate(&self, id: &EventId) -> Option<(usize, Occurrence)> {
        let index = self.document.events.iter().position(|a| a.uid == id.uid)?;
        let record = &self.document.events[index];
        let occurrence = match id.occurrence {
            None => record.occurrences().next(),
            Some(at) => record.occurrence_at(at),
        }?;
        Some((index, occurrence))
    }

    fn resolve(&self, id: &EventId) -> Option<Event> {
        self.locate(id)
            .map(|(index, occurrence)| self.document.events[index].to_event(occurrence))
    }

    fn ensure_writable(&self, calendar: &str) -> Result<()> {
        let needle = calendar.to_lowercase();
        match self.calendars.iter().find(|a| a.name.to_lowercase() == needle) {
            Some(found) if !found.is_writable() => Err(Error::CalendarReadOnly(found.name.clone())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl EventStore for LocalStore {
    async fn calendars(&self) -> Result<Vec<Calendar>> {
        Ok(self.calendars.clone())
    }

    async fn event(&self, id: &EventId) -> Result<Option<Event>> {
        Ok(self.resolve(id))
    }

    async fn events_between(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Event>> {
        let from = start.with_timezone(&Utc);
        let to = end.with_timezone(&Utc);
        let mut events: Vec<Event> = self
            .document
            .events
            .iter()
            .flat_map(|record| {
                record
                    .between(from, to)
                    .map(move |occurrence| record.to_event(occurrence))
            })
            .collect();

        sort_events(&mut events);
        Ok(events)
    }

    async fn create(&mut self, draft: EventDraft) -> Result<Event> {
        let calendar = find_writable_calendar(&self.calendars, draft.calendar.as_deref())?
            .name
            .clone();

        let record = Record::from_draft(new_uid(), calendar, draft);
        let event = record.to_event(Occurrence {
            index: 0,
            start: record.start,
            end: record.end,
        });

        self.document.events.push(record);
        self.flush().await?;
        tracing::info!(id = %event.id, "event created");
        Ok(event)
    }

    async fn save(&mut self, event: &Event, span: Span) -> Result<Event> {
        let (index, occurrence) = self
            .locate(&event.id)
            .ok_or_else(|| Error::EventNotFound(event.id.to_string()))?;
        self.ensure_writable(&self.document.events[index].calendar)?;
        self.ensure_writable(&event.calendar)?;

        let record = &mut self.document.events[index];
        let whole_series = span == Span::FutureEvents && occurrence.index == 0;
        let uid = if record.recurrence.is_none() || whole_series {
            record.assign(event);
            record.uid.clone()
        } else {
            let mut detached = Record::from_event(new_uid(), event);
            match span {
                Span::ThisEvent => {
                    record.exceptions.push(occurrence.start);
                    detached.recurrence = None;
                }
                Span::FutureEvents => {
                    let moved = record.truncate_before(occurrence.start);
                    if detached.recurrence.is_some() && detached.start == occurrence.start {
                        detached.exceptions = moved;
                    }
                }
            }

            let uid = detached.uid.clone();
            self.document.events.push(detached);
            uid
        };

        self.flush().await?;
        tracing::info!(id = %event.id, ?span, %uid, "event saved");

        let id = EventId::new(uid);
        self.resolve(&id)
            .ok_or_else(|| Error::EventNotFound(id.to_string()))
    }

    async fn remove(&mut self, event: &Event, span: Span) -> Result<()> {
        let (index, occurrence) = self
            .locate(&event.id)
            .ok_or_else(|| Error::EventNotFound(event.id.to_string()))?;
        self.ensure_writable(&self.document.events[index].calendar)?;

        let record = &mut self.document.events[index];
        let drop_record = if record.recurrence.is_none()
            || (span == Span::FutureEvents && occurrence.index == 0)
        {
            true
        } else if span == Span::FutureEvents {
            record.truncate_before(occurrence.start);
            false
        } else {
            record.exceptions.push(occurrence.start);
            record.occurrences().next().is_none()
        };

        if drop_record {
            self.document.events.remove(index);
        }

        self.flush().await?;
        tracing::info!(id = %event.id, ?span, "event removed");
        Ok(())
    }
}

fn new_uid() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    events: Vec<Record>,
}

/// A stored event or recurring series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    uid: String,
    title: String,
    calendar: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default)]
    all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recurrence: Option<RecurrenceRule>,
    /// Starts of occurrences removed from or detached out of the series.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    exceptions: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Occurrence {
    index: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Stored instants keep whole seconds, the precision of occurrence ids.
fn to_stored(dt: DateTime<Local>) -> DateTime<Utc> {
    dt.with_timezone(&Utc).trunc_subsecs(0)
}

impl Record {
    fn from_draft(uid: String, calendar: String, draft: EventDraft) -> Self {
        Self {
            uid,
            title: draft.title,
            calendar,
            start: to_stored(draft.start),
            end: to_stored(draft.end),
            all_day: draft.all_day,
            location: draft.location,
            notes: draft.notes,
            recurrence: draft.recurrence,
            exceptions: Vec::new(),
        }
    }

    fn from_event(uid: String, event: &Event) -> Self {
        Self {
            uid,
            title: event.title.clone(),
            calendar: event.calendar.clone(),
            start: to_stored(event.start),
            end: to_stored(event.end),
            all_day: event.all_day,
            location: event.location.clone(),
            notes: event.notes.clone(),
            recurrence: event.recurrence,
            exceptions: Vec::new(),
        }
    }

    /// Overwrites the record with the fields of `event`, moving exceptions along with the start.
    fn assign(&mut self, event: &Event) {
        let start = to_stored(event.start);
        let shift = start - self.start;

        self.title = event.title.clone();
        self.calendar = event.calendar.clone();
        self.start = start;
        self.end = to_stored(event.end);
        self.all_day = event.all_day;
        self.location = event.location.clone();
        self.notes = event.notes.clone();
        self.recurrence = event.recurrence;

        if self.recurrence.is_none() {
            self.exceptions.clear();
        } else {
            for exception in &mut self.exceptions {
                *exception = *exception + shift;
            }
        }
    }

    /// Ends the series right before `at`, returning the exceptions that fell after it.
    fn truncate_before(&mut self, at: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let until = at - TimeDelta::seconds(1);
        if let Some(rule) = self.recurrence.as_mut() {
            rule.until = Some(until);
        }

        let (kept, moved) = self.exceptions.iter().partition(|a| **a <= until);
        self.exceptions = kept;
        moved
    }

    fn occurrences(&self) -> Occurrences<'_> {
        Occurrences::new(self, 0)
    }

    /// Occurrences, skipping steps that certainly end before `from`.
    fn occurrences_from(&self, from: DateTime<Utc>) -> Occurrences<'_> {
        let skip = match self.recurrence {
            Some(rule) => {
                let days = (from - self.end).num_days() - 1;
                rule.frequency.lower_bound_steps(days) / rule.interval.max(1)
            }
            None => 0,
        };
        Occurrences::new(self, skip)
    }

    fn occurrence_at(&self, at: DateTime<Utc>) -> Option<Occurrence> {
        self.occurrences_from(at)
            .take_while(|a| a.start <= at)
            .find(|a| a.start == at)
    }

    fn between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> impl Iterator<Item = Occurrence> {
        self.occurrences_from(from)
            .take_while(move |a| a.start < to)
            .filter(move |a| a.end > from || (a.start == a.end && a.start >= from))
    }

    fn to_event(&self, occurrence: Occurrence) -> Event {
        let id = match occurrence.index {
            0 => EventId::new(&self.uid),
            _ => EventId::with_occurrence(&self.uid, occurrence.start),
        };

        Event {
            id,
            title: self.title.clone(),
            calendar: self.calendar.clone(),
            start: occurrence.start.with_timezone(&Local),
            end: occurrence.end.with_timezone(&Local),
            all_day: self.all_day,
            location: self.location.clone(),
            notes: self.notes.clone(),
            recurrence: self.recurrence,
        }
    }
}

/// Expands a record into occurrences on the local wall clock.
struct Occurrences<'a> {
    record: &'a Record,
    first: NaiveDateTime,
    wall_span: TimeDelta,
    next: Option<u32>,
    misses: u32,
}

impl<'a> Occurrences<'a> {
    fn new(record: &'a Record, skip: u32) -> Self {
        let first = record.start.with_timezone(&Local).naive_local();
        let wall_span = record.end.with_timezone(&Local).naive_local() - first;
        Self {
            record,
            first,
            wall_span,
            next: Some(skip),
            misses: 0,
        }
    }

    fn step(&self, index: u32) -> Option<NaiveDateTime> {
        match self.record.recurrence {
            _ if index == 0 => Some(self.first),
            Some(rule) => rule
                .frequency
                .step(self.first, index.checked_mul(rule.interval.max(1))?),
            None => None,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let index = self.next?;
            if index > 0 && self.record.recurrence.is_none() {
                return None;
            }
            self.next = index.checked_add(1);

            let Some(naive) = self.step(index) else {
                self.misses += 1;
                if self.misses > MAX_CONSECUTIVE_MISSES {
                    return None;
                }
                continue;
            };
            self.misses = 0;

            let (start, end) = if index == 0 {
                (self.record.start, self.record.end)
            } else {
                let end = naive.checked_add_signed(self.wall_span)?;
                (
                    from_local_datetime(&Local, naive).with_timezone(&Utc),
                    from_local_datetime(&Local, end).with_timezone(&Utc),
                )
            };

            let until = self.record.recurrence.and_then(|a| a.until);
            if until.is_some_and(|until| start > until) {
                return None;
            }

            if self.record.exceptions.contains(&start) {
                continue;
            }

            return Some(Occurrence { index, start, end });
        }
    }
}
