//! Configuration system for treepick.
//!
//! This module provides the configuration structure for treepick with
//! sensible defaults and support for serialization/deserialization via
//! serde. Configuration is loaded from a TOML file and merged with
//! command-line arguments, which always win.
//!
//! # Example
//!
//! ```
//! use treepick::config::Config;
//!
//! let config = Config::default();
//! assert!(!config.pretty);
//! assert!(!config.strict);
//! assert_eq!(config.max_depth, 512);
//! ```

use crate::selector::evaluator::Limits;
use serde::{Deserialize, Serialize};

/// Configuration for the treepick application.
///
/// All fields have sensible defaults via `Config::default()`, and every
/// field is optional in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pretty-print matched nodes instead of one compact line each
    #[serde(default)]
    pub pretty: bool,

    /// Reject selector rules with unrecognized condition clauses
    #[serde(default)]
    pub strict: bool,

    /// Maximum container nesting depth during evaluation
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of traversal steps during evaluation
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

/// Returns the default depth limit.
fn default_max_depth() -> usize {
    Limits::default().max_depth
}

/// Returns the default step limit.
fn default_max_steps() -> usize {
    Limits::default().max_steps
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: false,
            strict: false,
            max_depth: default_max_depth(),
            max_steps: default_max_steps(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treepick/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("treepick");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't
    /// be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// Returns the evaluator limits configured here.
    pub fn limits(&self) -> Limits {
        Limits {
            max_depth: self.max_depth,
            max_steps: self.max_steps,
        }
    }
}
