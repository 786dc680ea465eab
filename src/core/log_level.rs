//! Log level definitions and the level name table

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The closed set of log levels.
///
/// Levels are categories rather than a severity ladder: each one is switched
/// on or off on its own, there is no "minimum level".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Channel = 0,
    Locks = 1,
    Default = 2,
    Error = 3,
    Overview = 4,
    Scheduler = 5,
    Verbose = 6,
    VeryVerbose = 7,
    Warning = 8,
}

impl LogLevel {
    /// Number of levels
    pub const COUNT: usize = 9;

    /// Every level, in ordinal order
    pub const ALL: [LogLevel; LogLevel::COUNT] = [
        LogLevel::Channel,
        LogLevel::Locks,
        LogLevel::Default,
        LogLevel::Error,
        LogLevel::Overview,
        LogLevel::Scheduler,
        LogLevel::Verbose,
        LogLevel::VeryVerbose,
        LogLevel::Warning,
    ];

    /// Fixed display name of the level
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Channel => "CHANNEL",
            LogLevel::Locks => "LOCKS",
            LogLevel::Default => "DEFAULT",
            LogLevel::Error => "ERROR",
            LogLevel::Overview => "OVERVIEW",
            LogLevel::Scheduler => "SCHEDULER",
            LogLevel::Verbose => "VERBOSE",
            LogLevel::VeryVerbose => "VERY_VERBOSE",
            LogLevel::Warning => "WARNING",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether a freshly built registry has this level switched on.
    ///
    /// Errors, warnings and the general purpose levels are on; the
    /// diagnostic levels are off until asked for.
    pub const fn enabled_by_default(self) -> bool {
        matches!(
            self,
            LogLevel::Default | LogLevel::Error | LogLevel::Overview | LogLevel::Warning
        )
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Channel | LogLevel::Locks | LogLevel::Scheduler => Cyan,
            LogLevel::Default => White,
            LogLevel::Overview => Green,
            LogLevel::Verbose | LogLevel::VeryVerbose => BrightBlack,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    /// Exact, case-sensitive match against the display names
    fn from_str(s: &str) -> Result<Self> {
        LogLevel::ALL
            .iter()
            .copied()
            .find(|level| level.name() == s)
            .ok_or_else(|| LoggerError::unknown_level(s))
    }
}

/// Name table built once per registry.
///
/// Forward lookups index a vector, reverse lookups go through a hash map.
/// Nothing mutates the table after construction.
#[derive(Debug, Clone)]
pub struct LevelTable {
    names: Vec<&'static str>,
    values: HashMap<&'static str, LogLevel>,
}

impl LevelTable {
    pub fn new() -> Self {
        let names: Vec<&'static str> = LogLevel::ALL.iter().map(|level| level.name()).collect();
        let values = LogLevel::ALL
            .iter()
            .map(|level| (level.name(), *level))
            .collect();
        Self { names, values }
    }

    #[inline]
    pub fn name(&self, level: LogLevel) -> &'static str {
        self.names[level.index()]
    }

    pub fn value(&self, name: &str) -> Result<LogLevel> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let table = LevelTable::new();
        assert_eq!(table.len(), LogLevel::COUNT);
        for level in LogLevel::ALL {
            assert_eq!(table.value(table.name(level)).unwrap(), level);
        }
    }

    #[test]
    fn test_ordinals_match_all() {
        for (i, level) in LogLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert!("warning".parse::<LogLevel>().is_err());
        assert!(LevelTable::new().value("Overview").is_err());
    }

    #[test]
    fn test_unknown_name() {
        let err = "not-a-real-level".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, LoggerError::UnknownLevel { ref name } if name == "not-a-real-level"));
    }

    #[test]
    fn test_default_policy() {
        assert!(LogLevel::Error.enabled_by_default());
        assert!(LogLevel::Warning.enabled_by_default());
        assert!(!LogLevel::Verbose.enabled_by_default());
        assert!(!LogLevel::VeryVerbose.enabled_by_default());
        assert!(!LogLevel::Locks.enabled_by_default());
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(LogLevel::VeryVerbose.to_string(), "VERY_VERBOSE");
        assert_eq!(format!("[{}]", LogLevel::Scheduler), "[SCHEDULER]");
    }
}
