// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurring series: rule building, span resolution and occurrence edits.

use chrono::{Datelike, Weekday};
use ical_core::{
    DateInputParser, Error, Event, EventStore, LocalStore, RecurrencePattern, RecurrenceRule,
    RecurrenceSpec, SpanSelection, build_rule, resolve_span,
};

use crate::common::{local, setup_temp_dirs, test_event_draft, test_store};

fn weekly_until(end: &str) -> RecurrenceRule {
    let parser = DateInputParser::with_now(local(2026, 6, 1, 8, 0));
    let spec = RecurrenceSpec::new(RecurrencePattern::Weekly, Some(end.to_string()));
    build_rule(&spec, &parser).unwrap()
}

async fn summer(store: &LocalStore) -> Vec<Event> {
    store
        .events_between(local(2026, 6, 1, 0, 0), local(2026, 8, 1, 0, 0))
        .await
        .unwrap()
}

#[tokio::test]
async fn recurring_series_date_only_end_is_inclusive() {
    // Arrange - weekly on Wednesdays from June 10th, ending on July 1st (a Wednesday)
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut store = test_store(&temp_dirs.calendar_path).await;
    let mut draft = test_event_draft("Book club");
    draft.recurrence = Some(weekly_until("2026-07-01"));
    store.create(draft).await.unwrap();

    // Act
    let events = summer(&store).await;

    // Assert
    let days: Vec<_> = events.iter().map(|a| (a.start.month(), a.start.day())).collect();
    assert_eq!(days, vec![(6, 10), (6, 17), (6, 24), (7, 1)]);
    assert!(events.iter().all(|a| a.start.weekday() == Weekday::Wed));
}

#[tokio::test]
async fn recurring_series_requires_span() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut store = test_store(&temp_dirs.calendar_path).await;
    let mut draft = test_event_draft("Book club");
    draft.recurrence = Some(weekly_until("2026-07-01"));
    let first = store.create(draft).await.unwrap();

    let found = store.event(&first.id).await.unwrap().unwrap();
    let err = resolve_span(found.is_recurring(), SpanSelection::Automatic).unwrap_err();
    assert!(matches!(err, Error::AmbiguousSpan));
    assert_eq!(
        err.to_string(),
        "Event is recurring. Use --this-only or --all-future."
    );
}

#[tokio::test]
async fn recurring_series_edit_this_then_remove_future() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut store = test_store(&temp_dirs.calendar_path).await;
    let mut draft = test_event_draft("Book club");
    draft.recurrence = Some(weekly_until("2026-07-01"));
    store.create(draft).await.unwrap();

    // Act - move the second occurrence only
    let events = summer(&store).await;
    let mut second = events[1].clone();
    let span = resolve_span(second.is_recurring(), SpanSelection::ThisOnly).unwrap();
    second.start = local(2026, 6, 18, 14, 0);
    second.end = local(2026, 6, 18, 15, 0);
    store.save(&second, span).await.unwrap();

    // Act - drop everything from the third occurrence on
    let third = events[2].clone();
    let span = resolve_span(third.is_recurring(), SpanSelection::AllFuture).unwrap();
    store.remove(&third, span).await.unwrap();

    // Assert - the detached occurrence survives the truncation
    let events = summer(&store).await;
    let days: Vec<_> = events
        .iter()
        .map(|a| (a.start.day(), a.is_recurring()))
        .collect();
    assert_eq!(days, vec![(10, true), (18, false)]);
}

#[test]
fn recurring_series_bad_end_input() {
    let parser = DateInputParser::with_now(local(2026, 6, 1, 8, 0));
    let spec = RecurrenceSpec::new(RecurrencePattern::Daily, Some("someday".to_string()));
    let err = build_rule(&spec, &parser).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not parse --recurrence-end value: someday"
    );
}
