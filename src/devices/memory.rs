//! In-memory capture device and closure adapter

use crate::core::{GenericFormat, LogDevice, LogLevel, Result, Timestamp};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// One message as a device saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub message: String,
    pub context: String,
    pub time: Timestamp,
    pub level: LogLevel,
}

impl LogRecord {
    /// The record rendered the way the console and file devices print it
    pub fn line(&self) -> String {
        GenericFormat::format(&self.message, &self.context, &self.time, self.level)
    }
}

/// Keeps every message it receives.
///
/// Useful for tests and for embedding applications that want to show recent
/// log output themselves.
#[derive(Default)]
pub struct MemoryDevice {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryDevice {
    /// Shared device, ready for [`DeviceRef::from_arc`](crate::DeviceRef::from_arc)
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(LogRecord::line).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove and return everything captured so far
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl LogDevice for MemoryDevice {
    fn log(&self, message: &str, context: &str, time: &Timestamp, level: LogLevel) -> Result<()> {
        self.records.lock().push(LogRecord {
            message: message.to_string(),
            context: context.to_string(),
            time: *time,
            level,
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

type LogFn = dyn Fn(&str, &str, &Timestamp, LogLevel) -> Result<()> + Send + Sync;

/// Device backed by a closure
///
/// # Example
///
/// ```
/// use device_logger::devices::FnDevice;
/// use device_logger::prelude::*;
///
/// let device = DeviceRef::new(FnDevice::new("print", |message, context, _time, level| {
///     println!("{level} {context} {message}");
///     Ok(())
/// }));
/// let registry = Registry::builder().default_devices(false).device(&device).build();
/// registry.overview("hello").unwrap();
/// ```
pub struct FnDevice {
    name: String,
    f: Box<LogFn>,
}

impl FnDevice {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &str, &Timestamp, LogLevel) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Box::new(f),
        }
    }
}

impl LogDevice for FnDevice {
    fn log(&self, message: &str, context: &str, time: &Timestamp, level: LogLevel) -> Result<()> {
        (self.f)(message, context, time, level)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FnDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDevice").field("name", &self.name).finish()
    }
}
