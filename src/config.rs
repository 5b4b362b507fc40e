// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for cloneclass
//!
//! Loads configuration from .cloneclassrc.toml in the current directory or
//! ~/.config/cloneclass/config.toml

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration loaded from .cloneclassrc.toml or ~/.config/cloneclass/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum fragment span applied when the CLI does not pass one
    pub min_span: Option<u32>,
    /// How many similar paths a failed snippet resolution suggests
    pub suggestion_count: Option<usize>,
    /// Directory holding content cache snapshots
    pub cache_dir: Option<PathBuf>,
    /// Disable snapshot persistence entirely
    pub no_snapshot: bool,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .cloneclassrc.toml in current directory
    /// 2. ~/.config/cloneclass/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(&PathBuf::from(".cloneclassrc.toml")) {
            return config;
        }

        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("cloneclass").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    fn load_from_path(path: &PathBuf) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge a CLI suggestion count with config (CLI wins).
    pub fn merge_suggestion_count(&self, cli_value: Option<usize>) -> usize {
        cli_value
            .or(self.suggestion_count)
            .unwrap_or(crate::resolve::DEFAULT_SUGGESTIONS)
    }

    /// Merge a CLI minimum span with config (CLI wins).
    pub fn merge_min_span(&self, cli_value: Option<u32>) -> Option<u32> {
        cli_value.or(self.min_span)
    }
}
