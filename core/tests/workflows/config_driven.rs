// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.

use ical_core::{Config, DEFAULT_CALENDAR, EventStore, LocalStore, WeekStart};

use crate::common::{setup_temp_dirs, test_event_draft};

#[tokio::test]
async fn config_drives_store_location_and_calendars() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let raw = serde_json::json!({
        "calendar_path": temp_dirs.calendar_path,
        "calendars": [
            { "name": "Shared", "read_only": true },
            { "name": "Mine" },
        ],
        "week_start": "sunday",
    });
    let mut config: Config = serde_json::from_value(raw).unwrap();
    config.normalize().unwrap();

    // Act
    let path = config.calendar_path().unwrap();
    let mut store = LocalStore::open(&path, config.calendars.clone())
        .await
        .unwrap();
    let created = store.create(test_event_draft("Lunch")).await.unwrap();

    // Assert - the first writable calendar is the default one
    assert_eq!(created.calendar, "Mine");
    assert_eq!(config.week_start, WeekStart::Sunday);
    assert!(temp_dirs.calendar_path.join(LocalStore::FILE_NAME).exists());
}

#[tokio::test]
async fn config_empty_calendars_fall_back_to_default() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut config = Config {
        calendar_path: Some(temp_dirs.calendar_path.clone()),
        calendars: Vec::new(),
        ..Config::default()
    };
    config.normalize().unwrap();

    let store = LocalStore::open(&config.calendar_path().unwrap(), config.calendars)
        .await
        .unwrap();
    let calendars = store.calendars().await.unwrap();
    assert_eq!(calendars.len(), 1);
    assert_eq!(calendars[0].name, DEFAULT_CALENDAR);
}
