//! Core registry types and traits

pub mod config;
pub mod device;
pub mod error;
pub mod format;
pub mod log_level;
pub mod metrics;
pub mod registry;
pub mod timestamp;

pub use config::LevelConfig;
pub use device::{DeviceId, DeviceRef, LogDevice};
pub use error::{LoggerError, Result};
pub use format::GenericFormat;
pub use log_level::{LevelTable, LogLevel};
pub use metrics::DispatchMetrics;
pub use registry::{Registry, RegistryBuilder, DEFAULT_CONTEXT};
pub use timestamp::{Clock, SystemClock, Timestamp, TimestampFormat};
