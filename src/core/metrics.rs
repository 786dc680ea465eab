//! Dispatch metrics for observability
//!
//! Counters describing what the registry did with each message: delivered,
//! suppressed by a disabled level, or cut short by a failing device.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a [`Registry`](super::Registry)
///
/// # Example
///
/// ```
/// use device_logger::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Messages at an enabled level that reached the device loop
    dispatched: AtomicU64,

    /// Messages dropped because their level was disabled
    suppressed: AtomicU64,

    /// Individual device calls that returned `Ok`
    deliveries: AtomicU64,

    /// Device calls that returned an error
    device_failures: AtomicU64,

    /// Registered devices found dropped during dispatch
    stale_devices: AtomicU64,
}

impl DispatchMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            device_failures: AtomicU64::new(0),
            stale_devices: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn device_failures(&self) -> u64 {
        self.device_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stale_devices(&self) -> u64 {
        self.stale_devices.load(Ordering::Relaxed)
    }

    /// Record a dispatched message, returning the previous count
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivery(&self) -> u64 {
        self.deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_device_failure(&self) -> u64 {
        self.device_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_stale_device(&self) -> u64 {
        self.stale_devices.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage (0.0 - 100.0) of messages dropped by disabled levels
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.suppressed() as f64;
        let total = self.dispatched() as f64 + suppressed;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.device_failures.store(0, Ordering::Relaxed);
        self.stale_devices.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            suppressed: AtomicU64::new(self.suppressed()),
            deliveries: AtomicU64::new(self.deliveries()),
            device_failures: AtomicU64::new(self.device_failures()),
            stale_devices: AtomicU64::new(self.stale_devices()),
        }
    }
}
