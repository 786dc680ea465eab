//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Reverse level lookup found no level with this name
    #[error("Unknown log level name: '{name}'")]
    UnknownLevel { name: String },

    /// A registered device was dropped without being removed first
    #[error("Stale device handle: device #{id} is no longer valid")]
    StaleDevice { id: u64 },

    /// A device reported that it could not render a message
    #[error("Device '{device}' failed: {message}")]
    DeviceFailure { device: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File device error with path
    #[error("File device error for '{path}': {message}")]
    FileDeviceError { path: String, message: String },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },
}

impl LoggerError {
    /// Create an unknown level name error
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    /// Create a stale device handle error
    pub fn stale_device(id: u64) -> Self {
        LoggerError::StaleDevice { id }
    }

    /// Create a device failure error
    pub fn device(device: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::DeviceFailure {
            device: device.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file device error
    pub fn file_device(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileDeviceError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Whether this error means the caller let a device die while registered
    #[must_use]
    pub fn is_stale_device(&self) -> bool {
        matches!(self, LoggerError::StaleDevice { .. })
    }
}
