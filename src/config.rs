//! Runtime settings.
//!
//! Defaults are overridden by environment variables:
//!
//! | Variable               | Meaning                                   |
//! |------------------------|-------------------------------------------|
//! | `LIVETYPE_INTERVAL_MS` | base delay between steps, in milliseconds |
//! | `LIVETYPE_PREFIX`      | vendor prefix replacing `-webkit-`        |
//! | `LIVETYPE_LOG`         | file to append debug logs to              |

use std::path::PathBuf;
use std::time::Duration;

use typewriter::PacingConfig;

use crate::error::{LivetypeError, Result};

pub const INTERVAL_VAR: &str = "LIVETYPE_INTERVAL_MS";
pub const PREFIX_VAR: &str = "LIVETYPE_PREFIX";
pub const LOG_VAR: &str = "LIVETYPE_LOG";

/// Graphemes per step for the key panel.
pub const KEY_CHUNK: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub interval: Duration,
    /// Replaces `webkit` in `-webkit-` properties. Empty drops the prefix.
    pub prefix: String,
    /// No logging when unset.
    pub log_path: Option<PathBuf>,
    pub key_chunk: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(16),
            prefix: "webkit".to_string(),
            log_path: None,
            key_chunk: KEY_CHUNK,
        }
    }
}

impl Config {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(INTERVAL_VAR) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                LivetypeError::Config(format!("{INTERVAL_VAR} must be whole milliseconds, got `{raw}`"))
            })?;
            self.interval = Duration::from_millis(millis);
        }
        if let Some(prefix) = lookup(PREFIX_VAR) {
            if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(LivetypeError::Config(format!(
                    "{PREFIX_VAR} may only hold letters, digits and dashes, got `{prefix}`"
                )));
            }
            self.prefix = prefix;
        }
        if let Some(path) = lookup(LOG_VAR).filter(|p| !p.trim().is_empty()) {
            self.log_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    /// Pacing for the stylesheet and prose stages.
    pub fn pacing(&self) -> PacingConfig {
        PacingConfig::default().with_interval(self.interval)
    }

    /// Pacing for the key panel, many graphemes per step.
    pub fn key_pacing(&self) -> PacingConfig {
        self.pacing().with_chunk_size(self.key_chunk)
    }
}
