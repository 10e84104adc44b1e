// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{DateTime, TimeZone};
use ical_core::{Event, EventId, EventStore, add_days, start_of_day};

/// Display title used for events without one.
pub const NO_TITLE: &str = "(No Title)";

/// The trimmed text, or `None` when it is blank.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
}

/// The title of an event for display and matching.
pub fn event_title(event: &Event) -> String {
    non_empty(Some(&event.title)).unwrap_or_else(|| NO_TITLE.to_string())
}

/// Normalizes the start and end of an event.
///
/// All-day events are moved to local midnights and span at least one day, timed events
/// must end after they start.
pub fn normalize_times<Tz: TimeZone>(
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    all_day: bool,
) -> Result<(DateTime<Tz>, DateTime<Tz>), Box<dyn Error>> {
    if !all_day {
        if end <= start {
            return Err("--end must be after --start".into());
        }
        return Ok((start, end));
    }

    let start = start_of_day(&start);
    let end = start_of_day(&end);
    if end > start {
        return Ok((start, end));
    }

    match add_days(&start, 1) {
        Some(next_day) => Ok((start, next_day)),
        None => Err("Could not normalize all-day event dates.".into()),
    }
}

/// Looks up an event by the id printed for it.
pub async fn find_event<S: EventStore>(store: &S, id: &str) -> Result<Event, Box<dyn Error>> {
    let found = match id.parse::<EventId>() {
        Ok(parsed) => store.event(&parsed).await?,
        Err(e) => {
            tracing::debug!(id, err = %e, "malformed event id");
            None
        }
    };
    found.ok_or_else(|| format!("Event not found for id: {id}").into())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate};

    use super::*;

    fn at(d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let naive = NaiveDate::from_ymd_opt(2026, 2, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap();
        tz.from_local_datetime(&naive).unwrap()
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  Lunch ")), Some("Lunch".to_string()));
        assert_eq!(non_empty(Some(" \t ")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_normalize_timed() {
        let (start, end) = normalize_times(at(20, 9, 0), at(20, 10, 0), false).unwrap();
        assert_eq!(start, at(20, 9, 0));
        assert_eq!(end, at(20, 10, 0));

        let err = normalize_times(at(20, 9, 0), at(20, 9, 0), false).unwrap_err();
        assert_eq!(err.to_string(), "--end must be after --start");
    }

    #[test]
    fn test_normalize_all_day() {
        let (start, end) = normalize_times(at(20, 9, 0), at(22, 10, 0), true).unwrap();
        assert_eq!(start, at(20, 0, 0));
        assert_eq!(end, at(22, 0, 0));
    }

    #[test]
    fn test_normalize_all_day_spans_one_day_at_least() {
        let (start, end) = normalize_times(at(20, 9, 0), at(20, 18, 0), true).unwrap();
        assert_eq!(start, at(20, 0, 0));
        assert_eq!(end, at(21, 0, 0));

        // an end before the start is not an error for all-day events
        let (_, end) = normalize_times(at(20, 9, 0), at(19, 9, 0), true).unwrap();
        assert_eq!(end, at(21, 0, 0));
    }
}
