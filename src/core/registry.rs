//! Device registry and message dispatcher

use super::{
    config::LevelConfig,
    device::{DeviceId, DeviceRef, LogDevice},
    error::{LoggerError, Result},
    log_level::{LevelTable, LogLevel},
    metrics::DispatchMetrics,
    timestamp::{Clock, SystemClock},
};
use crate::devices::factory;
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// Context used when the caller does not name one
pub const DEFAULT_CONTEXT: &str = "Log Message";

struct RegistryState {
    enabled: [bool; LogLevel::COUNT],
    devices: BTreeMap<DeviceId, Weak<dyn LogDevice>>,
}

impl RegistryState {
    fn new(levels: &LevelConfig) -> Self {
        let mut enabled = [false; LogLevel::COUNT];
        for level in LogLevel::ALL {
            enabled[level.index()] = levels.is_enabled(level);
        }
        Self {
            enabled,
            devices: BTreeMap::new(),
        }
    }
}

/// Fans messages out to every registered device.
///
/// One reentrant lock serializes level changes, registration and the whole
/// dispatch loop. The interior `RefCell` is only borrowed for short
/// sections and never across a device call, so a device may use the
/// registry again from inside [`LogDevice::log`] on the same thread.
pub struct Registry {
    state: ReentrantMutex<RefCell<RegistryState>>,
    names: LevelTable,
    clock: Arc<dyn Clock>,
    metrics: DispatchMetrics,
}

impl Registry {
    /// Registry with the default level policy and the `clog` device registered
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register(&factory::clog());
        registry
    }

    /// Registry with the default level policy and no devices
    #[must_use]
    pub fn empty() -> Self {
        Self::with_parts(&LevelConfig::defaults(), Arc::new(SystemClock))
    }

    fn with_parts(levels: &LevelConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: ReentrantMutex::new(RefCell::new(RegistryState::new(levels))),
            names: LevelTable::new(),
            clock,
            metrics: DispatchMetrics::new(),
        }
    }

    /// Add a device. Registering an identity that is already present does
    /// nothing; returns whether the device was newly added.
    pub fn register(&self, device: &DeviceRef) -> bool {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        if state.devices.contains_key(&device.id()) {
            return false;
        }
        state.devices.insert(device.id(), device.downgrade());
        true
    }

    /// Remove a device; removing a device that is not registered does nothing.
    pub fn remove(&self, device: &DeviceRef) -> bool {
        self.remove_id(device.id())
    }

    pub fn remove_id(&self, id: DeviceId) -> bool {
        let guard = self.state.lock();
        let removed = guard.borrow_mut().devices.remove(&id).is_some();
        removed
    }

    pub fn contains(&self, device: &DeviceRef) -> bool {
        let guard = self.state.lock();
        let found = guard.borrow().devices.contains_key(&device.id());
        found
    }

    /// Registered identities in dispatch order
    pub fn device_ids(&self) -> Vec<DeviceId> {
        let guard = self.state.lock();
        let ids: Vec<DeviceId> = guard.borrow().devices.keys().copied().collect();
        ids
    }

    pub fn device_count(&self) -> usize {
        let guard = self.state.lock();
        let count = guard.borrow().devices.len();
        count
    }

    pub fn log_enabled(&self, level: LogLevel) -> bool {
        let guard = self.state.lock();
        let on = guard.borrow().enabled[level.index()];
        on
    }

    /// Switch a level on or off, returning the new value
    pub fn set_log_enabled(&self, level: LogLevel, on: bool) -> bool {
        let guard = self.state.lock();
        guard.borrow_mut().enabled[level.index()] = on;
        on
    }

    /// Replace every level flag at once
    pub fn apply_levels(&self, levels: &LevelConfig) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        for level in LogLevel::ALL {
            state.enabled[level.index()] = levels.is_enabled(level);
        }
    }

    /// Snapshot of the current level flags
    pub fn levels(&self) -> LevelConfig {
        let guard = self.state.lock();
        let state = guard.borrow();
        let levels: LevelConfig = LogLevel::ALL
            .iter()
            .copied()
            .filter(|level| state.enabled[level.index()])
            .collect();
        levels
    }

    /// Display name of a level
    pub fn name(&self, level: LogLevel) -> &'static str {
        self.names.name(level)
    }

    /// Level with exactly this display name
    pub fn value(&self, name: &str) -> Result<LogLevel> {
        self.names.value(name)
    }

    /// Deliver a message to every registered device.
    ///
    /// A disabled level returns at once without reading the clock. Otherwise
    /// one timestamp is taken and devices are called in identity order while
    /// the registry lock is held. The first device error is returned and the
    /// remaining devices are skipped for this message.
    ///
    /// A device dropped while still registered is removed and reported as
    /// [`LoggerError::StaleDevice`].
    pub fn log_message(&self, message: &str, level: LogLevel, context: &str) -> Result<()> {
        let guard = self.state.lock();
        if !guard.borrow().enabled[level.index()] {
            self.metrics.record_suppressed();
            return Ok(());
        }

        let time = self.clock.now();
        self.metrics.record_dispatched();

        let snapshot: Vec<(DeviceId, Weak<dyn LogDevice>)> = guard
            .borrow()
            .devices
            .iter()
            .map(|(id, device)| (*id, Weak::clone(device)))
            .collect();

        for (id, weak) in snapshot {
            // A nested call on this thread may have removed it meanwhile.
            if !guard.borrow().devices.contains_key(&id) {
                continue;
            }

            let Some(device) = weak.upgrade() else {
                guard.borrow_mut().devices.remove(&id);
                self.metrics.record_stale_device();
                eprintln!(
                    "[LOGGER WARNING] Device {} was dropped while registered and has been removed",
                    id
                );
                return Err(LoggerError::stale_device(id.get()));
            };

            if let Err(e) = device.log(message, context, &time, level) {
                self.metrics.record_device_failure();
                return Err(e);
            }
            self.metrics.record_delivery();
        }

        Ok(())
    }

    /// Dispatch with the default context
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) -> Result<()> {
        self.log_message(message.as_ref(), level, DEFAULT_CONTEXT)
    }

    pub fn overview(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Overview, message)
    }

    pub fn warning(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    pub fn verbose(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Verbose, message)
    }

    /// Flush every live device.
    ///
    /// All devices are flushed even if one fails; the first failure is
    /// returned.
    pub fn flush(&self) -> Result<()> {
        let guard = self.state.lock();
        let live: Vec<(DeviceId, Arc<dyn LogDevice>)> = guard
            .borrow()
            .devices
            .iter()
            .filter_map(|(id, device)| device.upgrade().map(|device| (*id, device)))
            .collect();

        let mut first_error = None;
        for (id, device) in live {
            if let Err(e) = device.flush() {
                eprintln!("[LOGGER ERROR] Device {} flush failed: {}", id, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("levels", &self.levels())
            .field("devices", &self.device_ids())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Registry`]
///
/// Devices passed to the builder stay owned by the caller; the registry
/// only remembers them.
pub struct RegistryBuilder {
    levels: LevelConfig,
    clock: Arc<dyn Clock>,
    default_devices: bool,
    devices: Vec<DeviceRef>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            levels: LevelConfig::defaults(),
            clock: Arc::new(SystemClock),
            default_devices: true,
            devices: Vec::new(),
        }
    }

    /// Start from this set of enabled levels
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: LevelConfig) -> Self {
        self.levels = levels;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enable(mut self, level: LogLevel) -> Self {
        self.levels = self.levels.with(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable(mut self, level: LogLevel) -> Self {
        self.levels = self.levels.without(level);
        self
    }

    /// Enable exactly these levels
    #[must_use = "builder methods return a new value"]
    pub fn enable_only<I: IntoIterator<Item = LogLevel>>(mut self, levels: I) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    /// Use another timestamp source
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Whether to register the `clog` device. On by default.
    #[must_use = "builder methods return a new value"]
    pub fn default_devices(mut self, on: bool) -> Self {
        self.default_devices = on;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn device(mut self, device: &DeviceRef) -> Self {
        self.devices.push(device.clone());
        self
    }

    pub fn build(self) -> Registry {
        let registry = Registry::with_parts(&self.levels, self.clock);
        if self.default_devices {
            registry.register(&factory::clog());
        }
        for device in &self.devices {
            registry.register(device);
        }
        registry
    }

    /// Build and wrap for sharing between threads
    pub fn build_shared(self) -> Arc<Registry> {
        Arc::new(self.build())
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a builder for Registry
    ///
    /// # Example
    /// ```
    /// use device_logger::prelude::*;
    ///
    /// let registry = Registry::builder()
    ///     .enable(LogLevel::Verbose)
    ///     .default_devices(false)
    ///     .build();
    /// assert!(registry.log_enabled(LogLevel::Verbose));
    /// assert_eq!(registry.device_count(), 0);
    /// ```
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timestamp::Timestamp;
    use crate::devices::MemoryDevice;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records the order devices were called in
    struct Tracer {
        label: &'static str,
        trace: Arc<Mutex<Vec<&'static str>>>,
    }

    impl LogDevice for Tracer {
        fn log(&self, _: &str, _: &str, _: &Timestamp, _: LogLevel) -> Result<()> {
            self.trace.lock().push(self.label);
            Ok(())
        }

        fn name(&self) -> &str {
            self.label
        }
    }

    struct Failing;

    impl LogDevice for Failing {
        fn log(&self, _: &str, _: &str, _: &Timestamp, _: LogLevel) -> Result<()> {
            Err(LoggerError::device("failing", "disk full"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[derive(Default)]
    struct CountingClock {
        reads: AtomicUsize,
    }

    impl Clock for CountingClock {
        fn now(&self) -> Timestamp {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Timestamp::now()
        }
    }

    fn quiet() -> Registry {
        Registry::builder().default_devices(false).build()
    }

    #[test]
    fn test_new_registers_clog() {
        let registry = Registry::new();
        assert!(registry.contains(&factory::clog()));
        assert_eq!(registry.device_count(), 1);
    }

    #[test]
    fn test_builder_without_defaults() {
        let registry = quiet();
        assert_eq!(registry.device_count(), 0);
        assert!(!registry.contains(&factory::clog()));
    }

    #[test]
    fn test_level_toggle() {
        let registry = quiet();
        for level in LogLevel::ALL {
            assert!(registry.set_log_enabled(level, true));
            assert!(registry.log_enabled(level));
            assert!(!registry.set_log_enabled(level, false));
            assert!(!registry.log_enabled(level));
        }
    }

    #[test]
    fn test_default_levels() {
        let registry = quiet();
        for level in LogLevel::ALL {
            assert_eq!(registry.log_enabled(level), level.enabled_by_default());
        }
    }

    #[test]
    fn test_duplicate_register_is_noop() {
        let registry = quiet();
        let memory = MemoryDevice::new();
        let device = DeviceRef::from_arc(memory.clone());

        assert!(registry.register(&device));
        assert!(!registry.register(&device));
        assert!(!registry.register(&device.clone()));
        assert_eq!(registry.device_count(), 1);

        registry.error("once").unwrap();
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let registry = quiet();
        let device = DeviceRef::new(MemoryDevice::default());
        assert!(!registry.remove(&device));
        registry.register(&device);
        assert!(registry.remove(&device));
        assert!(!registry.remove(&device));
    }

    #[test]
    fn test_dispatch_in_identity_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let a = DeviceRef::new(Tracer {
            label: "a",
            trace: Arc::clone(&trace),
        });
        let b = DeviceRef::new(Tracer {
            label: "b",
            trace: Arc::clone(&trace),
        });

        let registry = quiet();
        // Registration order does not matter, identity does.
        registry.register(&b);
        registry.register(&a);

        registry.log_message("Hello", LogLevel::Overview, "ctx").unwrap();
        registry.log_message("Again", LogLevel::Overview, "ctx").unwrap();

        assert_eq!(*trace.lock(), vec!["a", "b", "a", "b"]);
        assert_eq!(registry.device_ids(), vec![a.id(), b.id()]);
    }

    #[test]
    fn test_disabled_level_skips_clock_and_devices() {
        let clock = Arc::new(CountingClock::default());
        let registry = Registry::builder()
            .default_devices(false)
            .clock(clock.clone())
            .build();
        let memory = MemoryDevice::new();
        let device = DeviceRef::from_arc(memory.clone());
        registry.register(&device);

        registry.set_log_enabled(LogLevel::Verbose, false);
        registry.verbose("hidden").unwrap();
        assert_eq!(clock.reads.load(Ordering::SeqCst), 0);
        assert!(memory.is_empty());
        assert_eq!(registry.metrics().suppressed(), 1);

        registry.set_log_enabled(LogLevel::Verbose, true);
        registry.verbose("shown").unwrap();
        assert_eq!(clock.reads.load(Ordering::SeqCst), 1);
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_one_timestamp_per_dispatch() {
        let memory_a = MemoryDevice::new();
        let memory_b = MemoryDevice::new();
        let a = DeviceRef::from_arc(memory_a.clone());
        let b = DeviceRef::from_arc(memory_b.clone());
        let registry = quiet();
        registry.register(&a);
        registry.register(&b);

        registry.log_message("tick", LogLevel::Error, "clock").unwrap();

        let ra = &memory_a.records()[0];
        let rb = &memory_b.records()[0];
        assert_eq!(ra.time, rb.time);
        assert_eq!(ra.context, "clock");
        assert_eq!(ra.level, LogLevel::Error);
    }

    #[test]
    fn test_device_error_aborts_rest() {
        let failing = DeviceRef::new(Failing);
        let memory = MemoryDevice::new();
        let later = DeviceRef::from_arc(memory.clone());
        let registry = quiet();
        registry.register(&failing);
        registry.register(&later);

        let err = registry.error("boom").unwrap_err();
        assert!(matches!(err, LoggerError::DeviceFailure { .. }));
        assert!(memory.is_empty());
        assert_eq!(registry.metrics().device_failures(), 1);
    }

    #[test]
    fn test_stale_device_is_reported_and_pruned() {
        let registry = quiet();
        let device = DeviceRef::new(MemoryDevice::default());
        let id = device.id();
        registry.register(&device);
        drop(device);

        let err = registry.error("after drop").unwrap_err();
        assert!(matches!(err, LoggerError::StaleDevice { id: stale } if stale == id.get()));
        assert_eq!(registry.device_count(), 0);
        assert_eq!(registry.metrics().stale_devices(), 1);

        registry.error("clean again").unwrap();
    }

    #[test]
    fn test_name_value_roundtrip() {
        let registry = quiet();
        for level in LogLevel::ALL {
            assert_eq!(registry.value(registry.name(level)).unwrap(), level);
        }
        assert!(matches!(
            registry.value("not-a-real-level"),
            Err(LoggerError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn test_apply_levels() {
        let registry = quiet();
        registry.apply_levels(&LevelConfig::none().with(LogLevel::Locks));
        assert!(registry.log_enabled(LogLevel::Locks));
        assert!(!registry.log_enabled(LogLevel::Error));
        assert_eq!(registry.levels(), LevelConfig::none().with(LogLevel::Locks));
    }

    /// Logs through the registry it is registered with
    struct Echo {
        registry: Weak<Registry>,
        depth: AtomicUsize,
    }

    impl LogDevice for Echo {
        fn log(&self, message: &str, _: &str, _: &Timestamp, level: LogLevel) -> Result<()> {
            if level == LogLevel::Error && self.depth.fetch_add(1, Ordering::SeqCst) == 0 {
                if let Some(registry) = self.registry.upgrade() {
                    registry.log_message(&format!("echo: {}", message), LogLevel::Warning, "echo")?;
                }
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_reentrant_dispatch() {
        let registry = Arc::new(quiet());
        // The echo gets the lower id, so it runs first and its nested
        // message reaches the sink before the outer one does.
        let echo = DeviceRef::new(Echo {
            registry: Arc::downgrade(&registry),
            depth: AtomicUsize::new(0),
        });
        let memory = MemoryDevice::new();
        let sink = DeviceRef::from_arc(memory.clone());
        registry.register(&sink);
        registry.register(&echo);

        registry.error("outer").unwrap();

        let lines: Vec<String> = memory.records().into_iter().map(|r| r.message).collect();
        assert_eq!(lines, vec!["echo: outer".to_string(), "outer".to_string()]);
    }

    #[test]
    fn test_reentrant_dispatch_after_lower_id_sink() {
        let registry = Arc::new(quiet());
        let memory = MemoryDevice::new();
        let sink = DeviceRef::from_arc(memory.clone());
        let echo = DeviceRef::new(Echo {
            registry: Arc::downgrade(&registry),
            depth: AtomicUsize::new(0),
        });
        registry.register(&echo);
        registry.register(&sink);

        registry.error("outer").unwrap();

        let lines: Vec<String> = memory.records().into_iter().map(|r| r.message).collect();
        assert_eq!(lines, vec!["outer".to_string(), "echo: outer".to_string()]);
    }

    /// Removes another device the first time it is called
    struct Remover {
        registry: Weak<Registry>,
        target: Mutex<Option<DeviceRef>>,
    }

    impl LogDevice for Remover {
        fn log(&self, _: &str, _: &str, _: &Timestamp, _: LogLevel) -> Result<()> {
            let target = self.target.lock().take();
            if let (Some(registry), Some(target)) = (self.registry.upgrade(), target) {
                registry.remove(&target);
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "remover"
        }
    }

    #[test]
    fn test_reentrant_remove_skips_removed_device() {
        let registry = Arc::new(quiet());
        let remover = Arc::new(Remover {
            registry: Arc::downgrade(&registry),
            target: Mutex::new(None),
        });
        // The remover gets the lower id, so it runs first.
        let remover_ref = DeviceRef::from_arc(remover.clone());
        let memory = MemoryDevice::new();
        let victim = DeviceRef::from_arc(memory.clone());
        *remover.target.lock() = Some(victim.clone());

        registry.register(&victim);
        registry.register(&remover_ref);

        registry.error("first").unwrap();
        assert!(memory.is_empty());
        assert!(!registry.contains(&victim));
        assert_eq!(registry.device_count(), 1);
    }

    #[test]
    fn test_reentrant_register_from_device() {
        struct Adder {
            registry: Weak<Registry>,
            pending: Mutex<Option<DeviceRef>>,
        }

        impl LogDevice for Adder {
            fn log(&self, _: &str, _: &str, _: &Timestamp, _: LogLevel) -> Result<()> {
                let pending = self.pending.lock().take();
                if let (Some(registry), Some(device)) = (self.registry.upgrade(), pending) {
                    registry.register(&device);
                }
                Ok(())
            }

            fn name(&self) -> &str {
                "adder"
            }
        }

        let registry = Arc::new(quiet());
        let memory = MemoryDevice::new();
        let late = DeviceRef::from_arc(memory.clone());
        let adder = DeviceRef::new(Adder {
            registry: Arc::downgrade(&registry),
            pending: Mutex::new(Some(late.clone())),
        });
        registry.register(&adder);

        // Joins during the first dispatch, receives from the next one.
        registry.error("first").unwrap();
        assert!(memory.is_empty());
        registry.error("second").unwrap();
        assert_eq!(memory.len(), 1);
    }
}
