//! Console device implementation

use crate::core::{
    GenericFormat, LogDevice, LogLevel, LoggerError, Result, Timestamp, TimestampFormat,
};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Stream a [`ConsoleDevice`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

pub struct ConsoleDevice {
    target: ConsoleTarget,
    name: String,
    use_colors: bool,
    format: GenericFormat,
}

impl ConsoleDevice {
    pub fn new(target: ConsoleTarget) -> Self {
        let name = match target {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        };
        Self {
            target,
            name: name.to_string(),
            use_colors: false,
            format: GenericFormat::default(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Color each line by level. Only has an effect with the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this device
    ///
    /// # Examples
    ///
    /// ```
    /// use device_logger::devices::ConsoleDevice;
    /// use device_logger::TimestampFormat;
    ///
    /// let device = ConsoleDevice::stdout()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format = GenericFormat::new(format);
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn render(&self, message: &str, context: &str, time: &Timestamp, level: LogLevel) -> String {
        let line = self.format.render(message, context, time, level);
        self.paint(line, level)
    }

    #[cfg(feature = "console")]
    fn paint(&self, line: String, level: LogLevel) -> String {
        if self.use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, line: String, _level: LogLevel) -> String {
        line
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        match self.target {
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        }
    }
}

impl LogDevice for ConsoleDevice {
    fn log(&self, message: &str, context: &str, time: &Timestamp, level: LogLevel) -> Result<()> {
        let line = self.render(message, context, time, level);
        self.write_line(&line).map_err(|e| {
            LoggerError::io_operation(format!("writing to {}", self.name), "console write failed", e)
        })
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(ConsoleDevice::stdout().name(), "stdout");
        assert_eq!(ConsoleDevice::stderr().name(), "stderr");
        assert_eq!(ConsoleDevice::stderr().with_name("clog").name(), "clog");
    }

    #[test]
    fn test_plain_render() {
        let device = ConsoleDevice::stdout().with_timestamp_format(TimestampFormat::Unix);
        let time = Timestamp::from(std::time::UNIX_EPOCH);
        let line = device.render("up", "boot", &time, LogLevel::Overview);
        assert_eq!(line, "0 [OVERVIEW] boot: up");
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_colored_render_keeps_text() {
        colored::control::set_override(true);
        let device = ConsoleDevice::stdout().with_colors(true);
        let line = device.render("bad", "io", &Timestamp::now(), LogLevel::Error);
        assert!(line.contains("[ERROR] io: bad"));
        assert!(line.contains('\u{1b}'));
        colored::control::unset_override();
    }

    #[test]
    fn test_log_to_stdout() {
        let device = ConsoleDevice::stdout();
        device
            .log("console test", "tests", &Timestamp::now(), LogLevel::Default)
            .unwrap();
        device.flush().unwrap();
    }
}
