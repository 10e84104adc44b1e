// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of `ical`.

mod cli;
mod cmd_add;
mod cmd_edit;
mod cmd_list;
mod cmd_remove;
mod command;
mod config;
mod event_formatter;
mod token;
mod usage;
mod util;

pub use crate::cli::{Session, run};
pub use crate::cmd_list::ListRange;
pub use crate::command::{
    AddIntent, AllDayTransition, Command, EditIntent, ParseError, RecurrenceUpdate,
    RemoveIntent, Selector, parse,
};
pub use crate::config::parse_config;
pub use crate::event_formatter::EventFormatter;
pub use crate::usage::USAGE;
