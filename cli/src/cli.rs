// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::Write, path::PathBuf, process::ExitCode};

use chrono::Local;
use ical_core::{Config, DateInputParser, EventStore, LocalStore, WeekStart};
use tracing_subscriber::EnvFilter;

use crate::cmd_list::ListRange;
use crate::command::{self, Command};
use crate::config::parse_config;

const ICAL_LOG_ENV: &str = "ICAL_LOG";

/// Run the `ical` command-line interface, returning the process exit code.
pub async fn run() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    // nothing touches the store until the whole command line is valid
    let command = match command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run_command(command, None).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_command(command: Command, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    tracing::debug!("parsing configuration...");
    let config = parse_config(config).await?;
    let mut session = Session::open(&config).await?;

    if !session.store.request_access().await? {
        return Err("Calendar access denied.".into());
    }

    let mut stdout = std::io::stdout().lock();
    command.run(&mut session, &mut stdout).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(ICAL_LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

/// Everything a command needs while it runs.
#[derive(Debug)]
pub struct Session<S> {
    pub store: S,
    /// Interprets date inputs relative to the moment the command started.
    pub parser: DateInputParser<Local>,
    pub week_start: WeekStart,
}

impl<S: EventStore> Session<S> {
    pub fn new(store: S, parser: DateInputParser<Local>, week_start: WeekStart) -> Self {
        Self {
            store,
            parser,
            week_start,
        }
    }
}

impl Session<LocalStore> {
    /// Opens the local store described by `config`.
    pub async fn open(config: &Config) -> Result<Self, Box<dyn Error>> {
        let path = config.calendar_path()?;
        let store = LocalStore::open(&path, config.calendars.clone()).await?;
        Ok(Self::new(store, DateInputParser::local(), config.week_start))
    }
}

#[cfg(test)]
impl Session<LocalStore> {
    /// A session over a fresh store in `dir`, with "now" at 2026-06-10 08:00 local time.
    pub async fn for_test(dir: &std::path::Path) -> Self {
        use chrono::TimeZone;

        let calendars = vec![
            ical_core::Calendar::new("Personal"),
            ical_core::Calendar::new("Work"),
        ];
        let store = LocalStore::open(dir, calendars).await.unwrap();
        let now = Local.with_ymd_and_hms(2026, 6, 10, 8, 0, 0).earliest().unwrap();
        Self::new(store, DateInputParser::with_now(now), WeekStart::Monday)
    }
}

impl Command {
    /// Run the command, writing its output to `out`.
    pub async fn run<S: EventStore>(
        self,
        session: &mut Session<S>,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn Error>> {
        match self {
            Command::Today => ListRange::Today.run(session, out).await,
            Command::Tomorrow => ListRange::Tomorrow.run(session, out).await,
            Command::Week => ListRange::Week.run(session, out).await,
            Command::Add(intent) => intent.run(session, out).await,
            Command::Remove(intent) => intent.run(session, out).await,
            Command::Edit(intent) => intent.run(session, out).await,
        }
    }
}
