//! Logging macros for ergonomic log message formatting.
//!
//! The message is only formatted when its level is enabled, so disabled
//! diagnostic levels cost one flag check. Every macro evaluates to the
//! `Result` of the dispatch.
//!
//! # Examples
//!
//! ```
//! use device_logger::prelude::*;
//! use device_logger::{log_ctx, overview};
//!
//! let registry = Registry::builder().default_devices(false).build();
//!
//! overview!(registry, "Server started").unwrap();
//!
//! let port = 8080;
//! log_ctx!(registry, LogLevel::Overview, "net", "listening on port {}", port).unwrap();
//! ```

/// Log a formatted message with the default context.
///
/// ```
/// # use device_logger::prelude::*;
/// # let registry = Registry::builder().default_devices(false).build();
/// use device_logger::log;
/// log!(registry, LogLevel::Overview, "Simple message").unwrap();
/// log!(registry, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($registry:expr, $level:expr, $($arg:tt)+) => {
        $crate::log_ctx!($registry, $level, $crate::DEFAULT_CONTEXT, $($arg)+)
    };
}

/// Log a formatted message with an explicit context.
///
/// ```
/// # use device_logger::prelude::*;
/// # let registry = Registry::builder().default_devices(false).build();
/// use device_logger::log_ctx;
/// log_ctx!(registry, LogLevel::Warning, "scheduler", "queue at {}%", 93).unwrap();
/// ```
#[macro_export]
macro_rules! log_ctx {
    ($registry:expr, $level:expr, $context:expr, $($arg:tt)+) => {{
        let registry = &$registry;
        let level: $crate::LogLevel = $level;
        if registry.log_enabled(level) {
            registry.log_message(&format!($($arg)+), level, $context)
        } else {
            registry.metrics().record_suppressed();
            $crate::Result::Ok(())
        }
    }};
}

/// Log a channel-level message.
#[macro_export]
macro_rules! channel {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Channel, $($arg)+)
    };
}

/// Log a locks-level message.
#[macro_export]
macro_rules! locks {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Locks, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use device_logger::prelude::*;
/// # let registry = Registry::builder().default_devices(false).build();
/// use device_logger::error;
/// error!(registry, "Failed to connect to database").unwrap();
/// error!(registry, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log an overview-level message.
#[macro_export]
macro_rules! overview {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Overview, $($arg)+)
    };
}

/// Log a scheduler-level message.
#[macro_export]
macro_rules! scheduler {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Scheduler, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log a very-verbose-level message.
#[macro_export]
macro_rules! very_verbose {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::VeryVerbose, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Warning, $($arg)+)
    };
}
