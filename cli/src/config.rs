// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use ical_core::{APP_NAME, Config as CoreConfig, get_config_dir};

const ICAL_CONFIG_ENV: &str = "ICAL_CONFIG";

/// Loads the configuration.
///
/// An explicit path, or one from `ICAL_CONFIG`, must exist. The default location
/// `$XDG_CONFIG_HOME/ical/config.toml` is optional and falls back to built-in defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = path.or_else(|| std::env::var_os(ICAL_CONFIG_ENV).map(PathBuf::from));

    let mut config = match path {
        Some(path) => read_config(path).await?,
        None => {
            let path = get_config_dir()?.join(APP_NAME).join("config.toml");
            if fs::try_exists(&path).await.unwrap_or(false) {
                read_config(path).await?
            } else {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                CoreConfig::default()
            }
        }
    };

    config.normalize()?;
    Ok(config)
}

async fn read_config(path: PathBuf) -> Result<CoreConfig, Box<dyn Error>> {
    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?;

    let raw = content
        .parse::<ConfigRaw>()
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), "config loaded");
    Ok(raw.core)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
