//! Level configuration
//!
//! A [`LevelConfig`] is the set of enabled levels. It can be built in code,
//! deserialized with serde (a list of level names), or parsed from a comma
//! separated string such as `"ERROR,WARNING,OVERVIEW"`, which is handy for
//! environment variables.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelConfig {
    enabled: BTreeSet<LogLevel>,
}

impl LevelConfig {
    /// Levels enabled by [`LogLevel::enabled_by_default`]
    pub fn defaults() -> Self {
        LogLevel::ALL
            .iter()
            .copied()
            .filter(|level| level.enabled_by_default())
            .collect()
    }

    pub fn none() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    pub fn all() -> Self {
        LogLevel::ALL.iter().copied().collect()
    }

    #[must_use]
    pub fn with(mut self, level: LogLevel) -> Self {
        self.enabled.insert(level);
        self
    }

    #[must_use]
    pub fn without(mut self, level: LogLevel) -> Self {
        self.enabled.remove(&level);
        self
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.enabled.contains(&level)
    }

    pub fn iter(&self) -> impl Iterator<Item = LogLevel> + '_ {
        self.enabled.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Read the level list from an environment variable.
    ///
    /// Returns `Ok(None)` when the variable is not set.
    pub fn from_env(var: &str) -> Result<Option<Self>> {
        match std::env::var(var) {
            Ok(value) => value.parse().map(Some),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(LoggerError::config(
                "LevelConfig",
                format!("environment variable {} is not valid unicode", var),
            )),
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl FromIterator<LogLevel> for LevelConfig {
    fn from_iter<I: IntoIterator<Item = LogLevel>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}

impl FromStr for LevelConfig {
    type Err = LoggerError;

    /// Comma separated level names. Whitespace around names is ignored, an
    /// empty or blank string means no level.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::none());
        }

        s.split(',')
            .map(str::trim)
            .map(|name| {
                if name.is_empty() {
                    Err(LoggerError::config("LevelConfig", "empty level name in list"))
                } else {
                    name.parse::<LogLevel>()
                }
            })
            .collect()
    }
}

impl fmt::Display for LevelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(LogLevel::name).collect();
        f.write_str(&names.join(","))
    }
}
