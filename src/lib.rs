//! # Device Logger
//!
//! A thread-safe leveled logging facility. Callers emit messages with a level
//! and a context label; a [`Registry`] delivers each message to every
//! registered output device.
//!
//! ## Features
//!
//! - **Pluggable Devices**: Console, file, in-memory and closure devices, or your own [`LogDevice`]
//! - **Per-Level Switches**: Every level is enabled or disabled on its own at runtime
//! - **Deterministic Order**: Devices are called in the order their handles were created
//! - **Thread Safe**: Registration, level changes and dispatch are serialized by one reentrant lock
//!
//! ## Example
//!
//! ```
//! use device_logger::prelude::*;
//! use device_logger::devices::MemoryDevice;
//!
//! let registry = Registry::builder().default_devices(false).build();
//! let memory = MemoryDevice::new();
//! let device = DeviceRef::from_arc(memory.clone());
//! registry.register(&device);
//!
//! registry.log_message("Hello", LogLevel::Overview, "ctx").unwrap();
//! assert_eq!(memory.len(), 1);
//!
//! registry.remove(&device);
//! ```

pub mod core;
pub mod devices;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Clock, DeviceId, DeviceRef, DispatchMetrics, GenericFormat, LevelConfig, LogDevice,
        LogLevel, LoggerError, Registry, RegistryBuilder, Result, SystemClock, Timestamp,
        TimestampFormat, DEFAULT_CONTEXT,
    };
    pub use crate::devices::{factory, ConsoleDevice, FileDevice};
}

pub use crate::core::{
    Clock, DeviceId, DeviceRef, DispatchMetrics, GenericFormat, LevelConfig, LevelTable,
    LogDevice, LogLevel, LoggerError, Registry, RegistryBuilder, Result, SystemClock, Timestamp,
    TimestampFormat, DEFAULT_CONTEXT,
};
pub use devices::{ConsoleDevice, FileDevice, FnDevice, MemoryDevice};
