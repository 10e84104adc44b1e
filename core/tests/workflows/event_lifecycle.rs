// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Single event lifecycle: create, look up, update and remove.

use ical_core::{EventId, EventStore, Span, SpanSelection, resolve_span};

use crate::common::{local, setup_temp_dirs, test_event_draft, test_store};

#[tokio::test]
async fn event_lifecycle_create_edit_remove() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut store = test_store(&temp_dirs.calendar_path).await;

    // Act - create
    let created = store.create(test_event_draft("Dentist")).await.unwrap();

    // Assert - the printed id finds the event again after reopening
    let id: EventId = created.id.to_string().parse().unwrap();
    let store_reopened = test_store(&temp_dirs.calendar_path).await;
    let found = store_reopened.event(&id).await.unwrap().unwrap();
    assert_eq!(found.title, "Dentist");
    assert_eq!(found.calendar, "Personal");
    drop(store_reopened);

    // Act - edit
    let span = resolve_span(found.is_recurring(), SpanSelection::Automatic).unwrap();
    assert_eq!(span, Span::ThisEvent);
    let mut changed = found.clone();
    changed.title = "Dentist (moved)".to_string();
    changed.start = local(2026, 6, 11, 9, 0);
    changed.end = local(2026, 6, 11, 10, 0);
    let saved = store.save(&changed, span).await.unwrap();

    // Assert
    assert_eq!(saved.id, created.id);
    assert_eq!(saved.start, local(2026, 6, 11, 9, 0));
    let day = store
        .events_between(local(2026, 6, 10, 0, 0), local(2026, 6, 11, 0, 0))
        .await
        .unwrap();
    assert!(day.is_empty(), "Event should have moved off June 10th");

    // Act - remove
    store.remove(&saved, span).await.unwrap();

    // Assert
    assert!(store.event(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn event_lifecycle_store_file_written() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut store = test_store(&temp_dirs.calendar_path).await;
    store.create(test_event_draft("Written")).await.unwrap();

    let content = tokio::fs::read_to_string(store.path()).await.unwrap();
    assert!(content.contains("\"title\": \"Written\""));
    assert!(!temp_dirs.calendar_path.join("store.json.tmp").exists());
}

#[tokio::test]
async fn event_lifecycle_store_dir_created_on_first_write() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let nested = temp_dirs.calendar_path.join("nested").join("deeper");
    let mut store = test_store(&nested).await;
    assert!(!nested.exists());

    store.create(test_event_draft("First")).await.unwrap();
    assert!(nested.join("store.json").exists());
}

#[tokio::test]
async fn event_lifecycle_calendar_selection() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut store = test_store(&temp_dirs.calendar_path).await;

    let mut draft = test_event_draft("Review");
    draft.calendar = Some("WORK".to_string());
    let created = store.create(draft).await.unwrap();
    assert_eq!(created.calendar, "Work");

    let mut draft = test_event_draft("Party");
    draft.calendar = Some("Holidays".to_string());
    let err = store.create(draft).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Calendar not found: Holidays. Writable calendars: Personal, Work"
    );
}
