//! Device implementations

pub mod console;
pub mod factory;
pub mod file;
pub mod memory;

pub use console::{ConsoleDevice, ConsoleTarget};
pub use file::FileDevice;
pub use memory::{FnDevice, LogRecord, MemoryDevice};

// Re-export the device trait next to its implementations
pub use crate::core::LogDevice;
