// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration file support

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use sfls_core::{SflsError, SflsResult};
use tracing::debug;

/// When to decorate names with color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_term: bool) -> bool {
        match self {
            ColorChoice::Auto => is_term,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
}

/// `[display]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub long: bool,
    pub one: bool,
    pub human: bool,
    pub dir: bool,
    pub dirs_first: bool,
    pub sort_time: bool,
    pub sort_size: bool,
    pub sort_reverse: bool,
    pub color: Option<ColorChoice>,
    pub width: Option<usize>,
    pub all: bool,
}

/// Default location of `config.toml`
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "sfls", "sfls")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    pub fn parse(text: &str) -> SflsResult<Self> {
        toml::from_str(text).map_err(|e| SflsError::Config(e.to_string()))
    }

    /// Load from `explicit`, or from the default location if it exists.
    pub async fn load(explicit: Option<&Path>) -> SflsResult<Self> {
        let path = match explicit {
            Some(path) => {
                if !tokio::fs::try_exists(path).await? {
                    return Err(SflsError::NotFound(path.display().to_string()));
                }
                path.to_path_buf()
            }
            None => match default_path() {
                Some(path) if tokio::fs::try_exists(&path).await? => path,
                _ => return Ok(Self::default()),
            },
        };

        debug!(path = %path.display(), "Loading config");
        let text = tokio::fs::read_to_string(&path).await?;
        Self::parse(&text)
    }
}
