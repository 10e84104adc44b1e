// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{
    DateTime, Days, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc, offset::LocalResult,
};

/// The start of the day (00:00:00) for the given `DateTime` in the same timezone.
pub fn start_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    let naive = NaiveDateTime::new(dt.date_naive(), NaiveTime::MIN);
    from_local_datetime(&dt.timezone(), naive)
}

/// Moves the wall clock of `dt` by `days` calendar days, keeping the time of day.
///
/// Returns `None` when the result falls outside the representable range.
pub fn add_days<Tz: TimeZone>(dt: &DateTime<Tz>, days: i64) -> Option<DateTime<Tz>> {
    let naive = dt.naive_local();
    let naive = if days >= 0 {
        naive.checked_add_days(Days::new(days.unsigned_abs()))?
    } else {
        naive.checked_sub_days(Days::new(days.unsigned_abs()))?
    };
    Some(from_local_datetime(&dt.timezone(), naive))
}

/// Convert the `NaiveDateTime` to the given timezone, handles local time ambiguities:
/// - `Single(dt)` returns directly;
/// - `Ambiguous(a, b)` takes the earlier one;
/// - `None` (local time does not exist, e.g., skipped by a DST transition): moves forward
///   by whole hours past the gap, so `02:30` in a one-hour gap becomes `03:30`.
pub fn from_local_datetime<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(x) => x,
        LocalResult::Ambiguous(a, b) => {
            tracing::debug!(%naive, "ambiguous local time, picking earliest");
            if a <= b { a } else { b }
        }
        LocalResult::None => {
            tracing::debug!(%naive, "nonexistent local time, moving past the gap");
            (1..=24)
                .filter_map(|hours| naive.checked_add_signed(TimeDelta::hours(hours)))
                .find_map(|shifted| tz.from_local_datetime(&shifted).earliest())
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive).with_timezone(tz))
        }
    }
}
