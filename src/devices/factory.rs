//! Process-wide standard stream devices
//!
//! Each factory returns a handle to the same device every time, so the
//! devices live for the whole process and can be registered with, or
//! removed from, any number of registries.

use super::console::ConsoleDevice;
use crate::core::DeviceRef;
use std::sync::OnceLock;

static COUT: OnceLock<DeviceRef> = OnceLock::new();
static CERR: OnceLock<DeviceRef> = OnceLock::new();
static CLOG: OnceLock<DeviceRef> = OnceLock::new();

/// Standard output
pub fn cout() -> DeviceRef {
    COUT.get_or_init(|| DeviceRef::new(ConsoleDevice::stdout().with_name("cout")))
        .clone()
}

/// Standard error
pub fn cerr() -> DeviceRef {
    CERR.get_or_init(|| DeviceRef::new(ConsoleDevice::stderr().with_name("cerr")))
        .clone()
}

/// Diagnostic stream; registered by [`Registry::new`](crate::Registry::new)
pub fn clog() -> DeviceRef {
    CLOG.get_or_init(|| DeviceRef::new(ConsoleDevice::stderr().with_name("clog")))
        .clone()
}
