//! Device trait for log output destinations

use super::{error::Result, log_level::LogLevel, timestamp::Timestamp};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// A sink that renders one log line per call.
///
/// Devices are called with the registry lock held. A device may log through
/// the same registry from inside [`LogDevice::log`]; the nested message is
/// delivered before the outer call returns.
pub trait LogDevice: Send + Sync {
    fn log(&self, message: &str, context: &str, time: &Timestamp, level: LogLevel) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

static NEXT_DEVICE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a device, assigned once when it is wrapped in a [`DeviceRef`].
///
/// Ids grow monotonically and are never reused, so two live devices never
/// compare equal even if one was allocated where the other used to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(u64);

impl DeviceId {
    fn next() -> Self {
        Self(NEXT_DEVICE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owning handle to a device.
///
/// Clones share the device and its identity. The registry only keeps a weak
/// reference; dropping every `DeviceRef` while the device is still
/// registered is reported as a stale device on the next dispatch.
#[derive(Clone)]
pub struct DeviceRef {
    id: DeviceId,
    device: Arc<dyn LogDevice>,
}

impl DeviceRef {
    pub fn new<D: LogDevice + 'static>(device: D) -> Self {
        Self::from_arc(Arc::new(device))
    }

    /// Wrap an already shared device. Each call mints a new identity.
    pub fn from_arc(device: Arc<dyn LogDevice>) -> Self {
        Self {
            id: DeviceId::next(),
            device,
        }
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn device(&self) -> &Arc<dyn LogDevice> {
        &self.device
    }

    pub fn name(&self) -> &str {
        self.device.name()
    }

    pub(crate) fn downgrade(&self) -> Weak<dyn LogDevice> {
        Arc::downgrade(&self.device)
    }
}

impl PartialEq for DeviceRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DeviceRef {}

impl PartialOrd for DeviceRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeviceRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for DeviceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRef")
            .field("id", &self.id)
            .field("name", &self.device.name())
            .finish()
    }
}

impl<D: LogDevice + 'static> From<D> for DeviceRef {
    fn from(device: D) -> Self {
        DeviceRef::new(device)
    }
}
