// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Days, Months, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::{DateInputParser, add_days, is_date_only, start_of_day};
use crate::error::{Error, Result};

/// The recurrence patterns accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrencePattern {
    /// The frequency unit a rule built from this pattern repeats on.
    pub const fn frequency(self) -> Frequency {
        match self {
            RecurrencePattern::Daily => Frequency::Daily,
            RecurrencePattern::Weekly => Frequency::Weekly,
            RecurrencePattern::Monthly => Frequency::Monthly,
            RecurrencePattern::Yearly => Frequency::Yearly,
        }
    }
}

impl FromStr for RecurrencePattern {
    type Err = String;

    /// Case-sensitive: only the lowercase spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown recurrence pattern: {s}")),
        }
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Monthly => "monthly",
            RecurrencePattern::Yearly => "yearly",
        })
    }
}

/// A requested recurrence: the pattern plus the raw `--recurrence-end` input, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSpec {
    pub pattern: RecurrencePattern,
    pub end_input: Option<String>,
}

impl RecurrenceSpec {
    pub fn new(pattern: RecurrencePattern, end_input: Option<String>) -> Self {
        Self { pattern, end_input }
    }
}

/// Frequency unit of a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The wall-clock start of the `n`-th step from `first`.
    ///
    /// Returns `None` when the step lands on a day that does not exist, e.g. the 31st
    /// of a 30-day month or February 29th outside leap years; such steps are skipped.
    pub fn step(self, first: NaiveDateTime, n: u32) -> Option<NaiveDateTime> {
        let stepped = match self {
            Frequency::Daily => first.checked_add_days(Days::new(n.into()))?,
            Frequency::Weekly => first.checked_add_days(Days::new(u64::from(n) * 7))?,
            Frequency::Monthly => first.checked_add_months(Months::new(n))?,
            Frequency::Yearly => first.checked_add_months(Months::new(n.checked_mul(12)?))?,
        };

        match self {
            Frequency::Daily | Frequency::Weekly => Some(stepped),
            // chrono clamps to the last day of the month, RFC 5545 skips instead
            Frequency::Monthly | Frequency::Yearly => {
                (stepped.day() == first.day()).then_some(stepped)
            }
        }
    }

    /// Smallest step that could still start at or after `first + days`.
    pub(crate) fn lower_bound_steps(self, days: i64) -> u32 {
        let steps = match self {
            Frequency::Daily => days,
            Frequency::Weekly => days / 7,
            Frequency::Monthly => days / 31,
            Frequency::Yearly => days / 366,
        };
        u32::try_from(steps.max(0)).unwrap_or(u32::MAX)
    }
}

/// A recurrence rule as stored with an event series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    /// Inclusive end of the series; occurrences starting after it are dropped.
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            until: None,
        }
    }

    pub fn with_until(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.until = until;
        self
    }
}

/// Builds the rule for `spec`, interpreting the end input with `parser`.
///
/// A date-only end such as `2026-03-31` covers the whole day: the end is moved to the
/// last second of that day so occurrences on it are kept.
pub fn build_rule<Tz: TimeZone>(
    spec: &RecurrenceSpec,
    parser: &DateInputParser<Tz>,
) -> Result<RecurrenceRule> {
    let rule = RecurrenceRule::new(spec.pattern.frequency());
    let Some(input) = spec
        .end_input
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
    else {
        return Ok(rule);
    };

    let parsed = parser
        .parse(input)
        .ok_or_else(|| Error::InvalidRecurrenceEnd(input.to_string()))?;

    let until = if is_date_only(input) {
        inclusive_end_of_day(&parsed)
            .ok_or_else(|| Error::RecurrenceEndOverflow(input.to_string()))?
    } else {
        parsed
    };

    tracing::debug!(%input, until = %until.to_rfc3339(), "resolved recurrence end");
    Ok(rule.with_until(Some(until.with_timezone(&Utc))))
}

fn inclusive_end_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let next_day = add_days(&start_of_day(dt), 1)?;
    next_day.checked_sub_signed(TimeDelta::seconds(1))
}

/// How a change to a recurring event was requested to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanSelection {
    /// Nothing requested; only valid for events that do not recur.
    #[default]
    Automatic,
    ThisOnly,
    AllFuture,
}

/// How a change is applied once the target event is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Only the targeted occurrence.
    ThisEvent,
    /// The targeted occurrence and every later one in the series.
    FutureEvents,
}

/// Resolves the requested span against the recurrence state of the target event.
///
/// The recurrence state has to be looked up in the store first; a recurring event
/// never gets a span guessed for it.
pub fn resolve_span(is_recurring: bool, selection: SpanSelection) -> Result<Span> {
    if !is_recurring {
        return Ok(Span::ThisEvent);
    }

    match selection {
        SpanSelection::ThisOnly => Ok(Span::ThisEvent),
        SpanSelection::AllFuture => Ok(Span::FutureEvents),
        SpanSelection::Automatic => Err(Error::AmbiguousSpan),
    }
}
