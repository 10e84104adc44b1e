// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::OnceLock;

use chrono::{
    DateTime, Days, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};
use regex::Regex;

use crate::datetime::util::from_local_datetime;
use crate::error::{Error, Result};

/// Wall-clock patterns tried after ISO 8601, interpreted in the parser's timezone.
const LOCAL_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

type Attempt<Tz> = fn(&DateInputParser<Tz>, &str) -> Option<DateTime<Tz>>;

/// Turns user supplied date/time strings into absolute instants.
///
/// Accepted inputs, in priority order:
/// 1. relative expressions such as `today 14:00` or `tomorrow 09:30`;
/// 2. ISO 8601: with fractional seconds and offset, without fractional seconds,
///    and date only (`2026-02-20`, midnight of that day);
/// 3. local patterns `YYYY-MM-DDTHH:MM[:SS]` and `YYYY-MM-DD HH:MM[:SS]`.
#[derive(Debug, Clone)]
pub struct DateInputParser<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl DateInputParser<Local> {
    /// A parser anchored at the current time in the process's local timezone.
    pub fn local() -> Self {
        Self::with_now(Local::now())
    }
}

impl<Tz: TimeZone> DateInputParser<Tz> {
    /// A parser whose relative expressions are resolved against `now`.
    pub fn with_now(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// The instant relative expressions are anchored at.
    pub fn now(&self) -> &DateTime<Tz> {
        &self.now
    }

    /// The timezone wall-clock inputs are interpreted in.
    pub fn timezone(&self) -> Tz {
        self.now.timezone()
    }

    /// Parses `input`, returning `None` if no accepted form matches.
    pub fn parse(&self, input: &str) -> Option<DateTime<Tz>> {
        let value = input.trim();
        let attempts: [Attempt<Tz>; 3] =
            [Self::parse_relative, Self::parse_iso8601, Self::parse_local];
        attempts.iter().find_map(|attempt| attempt(self, value))
    }

    /// Parses the value given to a command-line option, naming the option on failure.
    pub fn parse_option(&self, option: &str, input: &str) -> Result<DateTime<Tz>> {
        self.parse(input).ok_or_else(|| Error::InvalidDateTime {
            option: option.to_string(),
            input: input.to_string(),
        })
    }

    fn parse_relative(&self, value: &str) -> Option<DateTime<Tz>> {
        let mut parts = value.split_whitespace();
        let (Some(day), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };

        let offset = match day.to_lowercase().as_str() {
            "today" => 0,
            "tomorrow" => 1,
            _ => return None,
        };

        let (hour, minute) = parse_hour_minute(time)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        let date = self.now.date_naive().checked_add_days(Days::new(offset))?;
        Some(from_local_datetime(
            &self.timezone(),
            NaiveDateTime::new(date, time),
        ))
    }

    fn parse_iso8601(&self, value: &str) -> Option<DateTime<Tz>> {
        let tz = self.timezone();
        if let Some(dt) = parse_iso_fractional(value).or_else(|| parse_iso_internet(value)) {
            return Some(dt.with_timezone(&tz));
        }

        parse_iso_date(value).map(|date| from_local_datetime(&tz, date.and_time(NaiveTime::MIN)))
    }

    fn parse_local(&self, value: &str) -> Option<DateTime<Tz>> {
        LOCAL_PATTERNS.iter().find_map(|pattern| {
            NaiveDateTime::parse_from_str(value, pattern)
                .ok()
                .map(|naive| from_local_datetime(&self.timezone(), naive))
        })
    }
}

/// Whether the input is a bare `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn is_date_only(input: &str) -> bool {
    const RE: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).expect("date-only pattern is valid"));
    re.is_match(input.trim())
}

/// `2026-02-20T14:00:00.250Z`
fn parse_iso_fractional(value: &str) -> Option<DateTime<FixedOffset>> {
    let (_, time) = value.split_once('T')?;
    if !time.contains('.') {
        return None;
    }
    DateTime::parse_from_rfc3339(value).ok()
}

/// `2026-02-20T14:00:00Z`, `2026-02-20T14:00:00+08:00`
fn parse_iso_internet(value: &str) -> Option<DateTime<FixedOffset>> {
    let (_, time) = value.split_once('T')?;
    if time.contains('.') {
        return None;
    }
    DateTime::parse_from_rfc3339(value).ok()
}

/// `2026-02-20`
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !is_date_only(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parses `HH:MM` with hour in 0..=23 and minute in 0..=59.
fn parse_hour_minute(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = s.split_once(':')?;
    if minute.contains(':') {
        return None;
    }

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    (hour <= 23 && minute <= 59).then_some((hour, minute))
}
