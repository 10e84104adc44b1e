// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Usage text shown with every command-line error.
pub const USAGE: &str = r#"Usage:
  ical today
  ical tomorrow
  ical week
  ical add --title <text> --start <datetime> --end <datetime> [--calendar <name>] [--location <text>] [--notes <text>] [--all-day] [--recurrence <daily|weekly|monthly|yearly>] [--recurrence-end <date>]
  ical remove (--id <event-id> | --title <text> --start <datetime> [--calendar <name>]) [--this-only|--all-future]
  ical edit --id <event-id> [--title <text>] [--start <datetime>] [--end <datetime>] [--calendar <name>] [--location <text>] [--notes <text>] [--all-day|--timed] [--clear-location] [--clear-notes] [--recurrence <pattern>] [--recurrence-end <date>] [--clear-recurrence] [--this-only|--all-future]

Datetime formats:
  ISO 8601
  "YYYY-MM-DD HH:mm"
  "today HH:mm"
  "tomorrow HH:mm""#;
