// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use ical_core::{RecurrencePattern, RecurrenceSpec, SpanSelection};

use crate::token::{OptionSpec, Options, TokenError};
use crate::usage::USAGE;
use crate::util::non_empty;

/// A validated command, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Today,
    Tomorrow,
    Week,
    Add(AddIntent),
    Remove(RemoveIntent),
    Edit(EditIntent),
}

/// Creates a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddIntent {
    pub title: String,
    /// Raw `--start` input, interpreted when the command runs.
    pub start: String,
    /// Raw `--end` input, interpreted when the command runs.
    pub end: String,
    pub calendar: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub all_day: bool,
    pub recurrence: Option<RecurrenceSpec>,
}

/// How the event to remove is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    ById(String),
    ByTitleAndStart {
        title: String,
        start: String,
        calendar: Option<String>,
    },
}

/// Removes an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveIntent {
    pub selector: Selector,
    pub span: SpanSelection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AllDayTransition {
    #[default]
    None,
    MakeAllDay,
    MakeTimed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecurrenceUpdate {
    #[default]
    None,
    Set(RecurrenceSpec),
    Clear,
}

/// Changes an existing event; only the given fields are touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditIntent {
    pub id: String,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub calendar: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub all_day: AllDayTransition,
    pub clear_location: bool,
    pub clear_notes: bool,
    pub recurrence: RecurrenceUpdate,
    pub span: SpanSelection,
}

impl EditIntent {
    /// Whether anything about the event would change.
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.calendar.is_some()
            || self.location.is_some()
            || self.notes.is_some()
            || self.all_day != AllDayTransition::None
            || self.clear_location
            || self.clear_notes
            || self.recurrence != RecurrenceUpdate::None
    }
}

/// A command line that could not be turned into a [`Command`].
///
/// Renders the problem followed by the usage text, or the usage text alone when no
/// sub-command was given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", Rendered(.problem.as_deref()))]
pub struct ParseError {
    problem: Option<String>,
}

impl ParseError {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: Some(problem.into()),
        }
    }

    pub fn usage() -> Self {
        Self { problem: None }
    }

    /// The specific problem, without the usage text.
    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }
}

impl From<TokenError> for ParseError {
    fn from(err: TokenError) -> Self {
        Self::new(err.to_string())
    }
}

struct Rendered<'a>(Option<&'a str>);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(problem) => write!(f, "{problem}\n\n{USAGE}"),
            None => f.write_str(USAGE),
        }
    }
}

const ADD_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value("--title"),
    OptionSpec::value("--start"),
    OptionSpec::value("--end"),
    OptionSpec::value("--calendar"),
    OptionSpec::value("--location"),
    OptionSpec::value("--notes"),
    OptionSpec::flag("--all-day"),
    OptionSpec::value("--recurrence"),
    OptionSpec::value("--recurrence-end"),
];

const REMOVE_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value("--id"),
    OptionSpec::value("--title"),
    OptionSpec::value("--start"),
    OptionSpec::value("--calendar"),
    OptionSpec::flag("--this-only"),
    OptionSpec::flag("--all-future"),
];

const EDIT_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value("--id"),
    OptionSpec::value("--title"),
    OptionSpec::value("--start"),
    OptionSpec::value("--end"),
    OptionSpec::value("--calendar"),
    OptionSpec::value("--location"),
    OptionSpec::value("--notes"),
    OptionSpec::flag("--all-day"),
    OptionSpec::flag("--timed"),
    OptionSpec::flag("--clear-location"),
    OptionSpec::flag("--clear-notes"),
    OptionSpec::value("--recurrence"),
    OptionSpec::value("--recurrence-end"),
    OptionSpec::flag("--clear-recurrence"),
    OptionSpec::flag("--this-only"),
    OptionSpec::flag("--all-future"),
];

/// Parses the full argument list, program name included.
pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command, ParseError> {
    let Some(subcommand) = args.get(1).map(AsRef::<str>::as_ref) else {
        return Err(ParseError::usage());
    };

    let rest = &args[2..];
    let command = match subcommand {
        "today" => no_arguments(subcommand, rest, Command::Today)?,
        "tomorrow" => no_arguments(subcommand, rest, Command::Tomorrow)?,
        "week" => no_arguments(subcommand, rest, Command::Week)?,
        "add" => Command::Add(parse_add(rest)?),
        "remove" => Command::Remove(parse_remove(rest)?),
        "edit" => Command::Edit(parse_edit(rest)?),
        _ => return Err(ParseError::new(format!("Unknown command: {subcommand}"))),
    };

    tracing::debug!(?command, "command parsed");
    Ok(command)
}

fn no_arguments<S>(name: &str, rest: &[S], command: Command) -> Result<Command, ParseError> {
    match rest.is_empty() {
        true => Ok(command),
        false => Err(ParseError::new(format!(
            "Unexpected arguments for '{name}'."
        ))),
    }
}

fn parse_add<S: AsRef<str>>(tokens: &[S]) -> Result<AddIntent, ParseError> {
    let options = Options::read(tokens, ADD_OPTIONS)?;

    let title = required(&options, "--title")?;
    let start = required(&options, "--start")?;
    let end = required(&options, "--end")?;

    let pattern = optional(&options, "--recurrence");
    let end_input = optional(&options, "--recurrence-end");
    let recurrence = recurrence_spec(pattern, end_input)?;

    Ok(AddIntent {
        title,
        start,
        end,
        calendar: optional(&options, "--calendar"),
        location: optional(&options, "--location"),
        notes: optional(&options, "--notes"),
        all_day: options.flag("--all-day"),
        recurrence,
    })
}

fn parse_remove<S: AsRef<str>>(tokens: &[S]) -> Result<RemoveIntent, ParseError> {
    let options = Options::read(tokens, REMOVE_OPTIONS)?;

    let id = present(&options, "--id")?;
    let title = present(&options, "--title")?;
    let start = present(&options, "--start")?;
    let calendar = present(&options, "--calendar")?;

    let selector = match (id, title, start) {
        (Some(_), _, _) if options.has("--title") || options.has("--start") || calendar.is_some() => {
            return Err(ParseError::new(
                "Use either --id or --title/--start selector, not both.",
            ));
        }
        (Some(id), _, _) => Selector::ById(id),
        (None, Some(title), Some(start)) => Selector::ByTitleAndStart {
            title,
            start,
            calendar,
        },
        (None, Some(_), None) => {
            return Err(ParseError::new("Missing required option: --start"));
        }
        (None, None, Some(_)) => {
            return Err(ParseError::new("Missing required option: --title"));
        }
        (None, None, None) => {
            return Err(ParseError::new(
                "Missing selector. Use --id or --title with --start.",
            ));
        }
    };

    Ok(RemoveIntent {
        selector,
        span: span_selection(&options)?,
    })
}

fn parse_edit<S: AsRef<str>>(tokens: &[S]) -> Result<EditIntent, ParseError> {
    let options = Options::read(tokens, EDIT_OPTIONS)?;

    let Some(id) = present(&options, "--id")? else {
        return Err(ParseError::new("Missing required option: --id"));
    };

    let title = present(&options, "--title")?;
    let start = present(&options, "--start")?;
    let end = present(&options, "--end")?;
    let calendar = present(&options, "--calendar")?;
    let location = present(&options, "--location")?;
    let notes = present(&options, "--notes")?;
    let pattern = present(&options, "--recurrence")?;
    let end_input = present(&options, "--recurrence-end")?;

    let all_day = match (options.flag("--all-day"), options.flag("--timed")) {
        (true, true) => {
            return Err(ParseError::new(
                "--all-day and --timed cannot be used together.",
            ));
        }
        (true, false) => AllDayTransition::MakeAllDay,
        (false, true) => AllDayTransition::MakeTimed,
        (false, false) => AllDayTransition::None,
    };

    let clear_location = options.flag("--clear-location");
    if clear_location && location.is_some() {
        return Err(ParseError::new(
            "Use either --location or --clear-location, not both.",
        ));
    }

    let clear_notes = options.flag("--clear-notes");
    if clear_notes && notes.is_some() {
        return Err(ParseError::new(
            "Use either --notes or --clear-notes, not both.",
        ));
    }

    let clear_recurrence = options.flag("--clear-recurrence");
    if clear_recurrence && pattern.is_some() {
        return Err(ParseError::new(
            "Use either --recurrence or --clear-recurrence, not both.",
        ));
    }

    let recurrence = match recurrence_spec(pattern, end_input)? {
        Some(spec) => RecurrenceUpdate::Set(spec),
        None if clear_recurrence => RecurrenceUpdate::Clear,
        None => RecurrenceUpdate::None,
    };

    let intent = EditIntent {
        id,
        title,
        start,
        end,
        calendar,
        location,
        notes,
        all_day,
        clear_location,
        clear_notes,
        recurrence,
        span: span_selection(&options)?,
    };

    match intent.has_changes() {
        true => Ok(intent),
        false => Err(ParseError::new("No changes provided.")),
    }
}

/// A value that must be given and not blank.
fn required(options: &Options, name: &str) -> Result<String, ParseError> {
    optional(options, name)
        .ok_or_else(|| ParseError::new(format!("Missing required option: {name}")))
}

/// A value where a blank input counts as not given.
fn optional(options: &Options, name: &str) -> Option<String> {
    non_empty(options.value(name))
}

/// A value that may be omitted, but must not be blank when given.
fn present(options: &Options, name: &str) -> Result<Option<String>, ParseError> {
    match options.value(name) {
        None => Ok(None),
        Some(raw) => match non_empty(Some(raw)) {
            Some(value) => Ok(Some(value)),
            None => Err(TokenError::MissingValue(name.to_string()).into()),
        },
    }
}

fn recurrence_spec(
    pattern: Option<String>,
    end_input: Option<String>,
) -> Result<Option<RecurrenceSpec>, ParseError> {
    match (pattern, end_input) {
        (None, Some(_)) => Err(ParseError::new("--recurrence-end requires --recurrence.")),
        (None, None) => Ok(None),
        (Some(pattern), end_input) => {
            let pattern = pattern.parse::<RecurrencePattern>().map_err(ParseError::new)?;
            Ok(Some(RecurrenceSpec::new(pattern, end_input)))
        }
    }
}

fn span_selection(options: &Options) -> Result<SpanSelection, ParseError> {
    match (options.flag("--this-only"), options.flag("--all-future")) {
        (true, true) => Err(ParseError::new(
            "Use either --this-only or --all-future, not both.",
        )),
        (true, false) => Ok(SpanSelection::ThisOnly),
        (false, true) => Ok(SpanSelection::AllFuture),
        (false, false) => Ok(SpanSelection::Automatic),
    }
}
