// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use chrono::Weekday;

use crate::error::{Error, Result};
use crate::event::Calendar;

/// The name of the application.
pub const APP_NAME: &str = "ical";

/// Name of the calendar created when none is configured.
pub const DEFAULT_CALENDAR: &str = "Calendar";

/// Configuration for the calendar store and listings.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory holding the local calendar store.
    #[serde(default)]
    pub calendar_path: Option<PathBuf>,

    /// Calendars events can be placed in, the first writable one is the default.
    #[serde(default = "default_calendars")]
    pub calendars: Vec<Calendar>,

    /// First day of the week shown by `ical week`.
    #[serde(default)]
    pub week_start: WeekStart,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendar_path: None,
            calendars: default_calendars(),
            week_start: WeekStart::default(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<()> {
        self.calendar_path = Some(match &self.calendar_path {
            Some(path) => expand_path(path)?,
            None => get_data_dir()?.join(APP_NAME),
        });

        if self.calendars.is_empty() {
            tracing::warn!("no calendars configured, using the default one");
            self.calendars = default_calendars();
        }

        Ok(())
    }

    /// The calendar directory, falling back to the platform data directory.
    pub fn calendar_path(&self) -> Result<PathBuf> {
        match &self.calendar_path {
            Some(path) => Ok(path.clone()),
            None => Ok(get_data_dir()?.join(APP_NAME)),
        }
    }
}

/// First day of the week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub const fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

fn default_calendars() -> Vec<Calendar> {
    vec![Calendar::new(DEFAULT_CALENDAR)]
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config(format!("invalid path: {}", path.display())))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| Error::Config("user-specific home directory not found".into()))
}

/// The user-specific configuration directory.
pub fn get_config_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| Error::Config("user-specific config directory not found".into()))
}

fn get_data_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    let data_dir = xdg::BaseDirectories::new().get_data_home();
    #[cfg(windows)]
    let data_dir = dirs::data_dir();
    data_dir.ok_or_else(|| Error::Config("user-specific data directory not found".into()))
}
