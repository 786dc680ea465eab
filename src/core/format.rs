//! Line formatting shared by the built-in devices
//!
//! Every built-in device renders a message as
//! `<timestamp> [<LEVEL>] <context>: <message>`.
//! The registry never formats anything itself.

use super::log_level::LogLevel;
use super::timestamp::{Timestamp, TimestampFormat};

/// Formatter producing one line per message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericFormat {
    timestamp_format: TimestampFormat,
}

impl GenericFormat {
    pub fn new(timestamp_format: TimestampFormat) -> Self {
        Self { timestamp_format }
    }

    /// Format with the default ISO 8601 timestamp
    ///
    /// # Example
    ///
    /// ```
    /// use device_logger::{GenericFormat, LogLevel, Timestamp};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let time = Timestamp::from(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap());
    /// let line = GenericFormat::format("Hello", "ctx", &time, LogLevel::Overview);
    /// assert_eq!(line, "2025-01-08T10:30:45.000Z [OVERVIEW] ctx: Hello");
    /// ```
    #[must_use]
    pub fn format(message: &str, context: &str, time: &Timestamp, level: LogLevel) -> String {
        Self::default().render(message, context, time, level)
    }

    #[must_use]
    pub fn render(&self, message: &str, context: &str, time: &Timestamp, level: LogLevel) -> String {
        format!(
            "{} [{}] {}: {}",
            time.format(&self.timestamp_format),
            level.name(),
            sanitize(context),
            sanitize(message)
        )
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }
}

/// Escape line breaks and tabs so one message can never span several lines
/// and forge extra entries.
pub fn sanitize(text: &str) -> String {
    if !text.contains(|c| matches!(c, '\n' | '\r' | '\t')) {
        return text.to_string();
    }
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
