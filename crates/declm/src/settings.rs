// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Process-wide settings.
//!
//! Holds the default language model picked up by
//! [`Predict::new`](crate::predict::Predict::new), the cache directory, and the
//! log level.
//!
//! ```
//! use declm::settings::{self, LogLevel};
//!
//! settings::configure(|s| s.log_level = LogLevel::Debug);
//! assert_eq!(settings::settings().log_level, LogLevel::Debug);
//! settings::reset();
//! ```
//!
//! Environment variables read by [`Settings::from_env`]:
//!
//! | Variable          | Field       |
//! |-------------------|-------------|
//! | `DECLM_CACHE_DIR` | `cache_dir` |
//! | `DECLM_LOG_LEVEL` | `log_level` |

use crate::error::{Error, Result};
use crate::lm::LanguageModel;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Environment variable overriding the cache directory.
pub const ENV_CACHE_DIR: &str = "DECLM_CACHE_DIR";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "DECLM_LOG_LEVEL";

/// Logging verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Diagnostics
    Debug,
    /// Normal operation
    #[default]
    Info,
    /// Recoverable problems
    Warn,
    /// Failures only
    Error,
}

impl LogLevel {
    /// Lower-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Matching `tracing` level.
    #[cfg(feature = "tracing")]
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(Error::parse(format!("unknown log level `{}`", other))),
        }
    }
}

/// Library configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model used by modules constructed without an explicit one.
    #[serde(skip)]
    pub default_lm: Option<Arc<dyn LanguageModel>>,
    /// Cache directory, `$HOME/.declm/cache` unless overridden.
    pub cache_dir: PathBuf,
    /// Log verbosity.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_lm: None,
            cache_dir: default_cache_dir(),
            log_level: LogLevel::default(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field(
                "default_lm",
                &self.default_lm.as_ref().map(|lm| lm.model_name().to_string()),
            )
            .field("cache_dir", &self.cache_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Empty values are ignored. An unparseable log level is an error.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = var(ENV_CACHE_DIR) {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(level) = var(ENV_LOG_LEVEL) {
            self.log_level = level.parse()?;
        }
        Ok(())
    }

    /// Set the default language model, builder style.
    pub fn with_default_lm(mut self, lm: Arc<dyn LanguageModel>) -> Self {
        self.default_lm = Some(lm);
        self
    }

    /// Parse settings from YAML. The default model is never read from files.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load settings from a YAML file.
    #[cfg(feature = "yaml")]
    pub fn load_yaml(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

fn default_cache_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".declm").join("cache")
}

fn slot() -> &'static RwLock<Settings> {
    static SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();
    SETTINGS.get_or_init(|| RwLock::new(Settings::default()))
}

/// Mutate the process-wide settings.
pub fn configure<F: FnOnce(&mut Settings)>(f: F) {
    let mut guard = slot().write();
    f(&mut guard);

    #[cfg(feature = "tracing")]
    tracing::debug!(settings = ?*guard, "settings configured");
}

/// Snapshot of the process-wide settings.
pub fn settings() -> Settings {
    slot().read().clone()
}

/// The configured default language model, if any.
pub fn default_lm() -> Option<Arc<dyn LanguageModel>> {
    slot().read().default_lm.clone()
}

/// Restore the process-wide settings to their defaults.
pub fn reset() {
    *slot().write() = Settings::default();
}
