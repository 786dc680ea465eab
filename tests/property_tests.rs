//! Property-based tests for device_logger using proptest

use device_logger::devices::MemoryDevice;
use device_logger::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    (0..LogLevel::COUNT).prop_map(|i| LogLevel::ALL[i])
}

fn quiet_registry() -> Registry {
    Registry::builder().default_devices(false).build()
}

// ============================================================================
// Level Metadata
// ============================================================================

proptest! {
    /// GetValue(GetName(L)) == L
    #[test]
    fn test_name_value_roundtrip(level in any_level()) {
        let registry = quiet_registry();
        prop_assert_eq!(registry.value(registry.name(level)).unwrap(), level);
        prop_assert_eq!(level.name().parse::<LogLevel>().unwrap(), level);
    }

    /// Any string that is not a level name is rejected
    #[test]
    fn test_unknown_names_rejected(name in "[a-zA-Z_-]{0,16}") {
        let is_level = LogLevel::ALL.iter().any(|level| level.name() == name);
        let registry = quiet_registry();
        match registry.value(&name) {
            Ok(level) => {
                prop_assert!(is_level);
                prop_assert_eq!(level.name(), name.as_str());
            }
            Err(err) => {
                prop_assert!(!is_level);
                let is_unknown = matches!(err, LoggerError::UnknownLevel { .. });
                prop_assert!(is_unknown);
            }
        }
    }

    /// LogEnabled(L, on) followed by LogEnabled(L) returns on
    #[test]
    fn test_toggle_then_query(level in any_level(), on in any::<bool>()) {
        let registry = quiet_registry();
        prop_assert_eq!(registry.set_log_enabled(level, on), on);
        prop_assert_eq!(registry.log_enabled(level), on);
    }

    /// A level config survives printing and parsing
    #[test]
    fn test_level_config_string_roundtrip(levels in proptest::collection::vec(any_level(), 0..12)) {
        let config: LevelConfig = levels.into_iter().collect();
        let parsed: LevelConfig = config.to_string().parse().unwrap();
        prop_assert_eq!(parsed, config);
    }
}

// ============================================================================
// Dispatch
// ============================================================================

proptest! {
    /// Each registered device gets exactly one call per dispatch at an
    /// enabled level and none at a disabled one
    #[test]
    fn test_delivery_matches_level_flag(
        device_count in 0usize..6,
        level in any_level(),
        enabled in any::<bool>(),
        message in ".{0,40}",
        context in "[a-z]{0,10}",
    ) {
        let registry = quiet_registry();
        let devices: Vec<(Arc<MemoryDevice>, DeviceRef)> = (0..device_count)
            .map(|_| {
                let memory = MemoryDevice::new();
                let device = DeviceRef::from_arc(memory.clone());
                (memory, device)
            })
            .collect();
        for (_, device) in &devices {
            registry.register(device);
        }
        registry.set_log_enabled(level, enabled);

        registry.log_message(&message, level, &context).unwrap();

        for (memory, _) in &devices {
            let records = memory.records();
            if enabled {
                prop_assert_eq!(records.len(), 1);
                prop_assert_eq!(&records[0].message, &message);
                prop_assert_eq!(&records[0].context, &context);
                prop_assert_eq!(records[0].level, level);
            } else {
                prop_assert!(records.is_empty());
            }
        }
    }

    /// Registration order never changes dispatch order
    #[test]
    fn test_order_follows_identity(order in Just((0usize..5).collect::<Vec<_>>()).prop_shuffle()) {
        let registry = quiet_registry();
        let devices: Vec<DeviceRef> = (0..5).map(|_| DeviceRef::new(MemoryDevice::default())).collect();
        for &i in &order {
            registry.register(&devices[i]);
        }

        let expected: Vec<DeviceId> = devices.iter().map(DeviceRef::id).collect();
        prop_assert_eq!(registry.device_ids(), expected);
    }

    /// Repeated register/remove ends in the state of the last operation
    #[test]
    fn test_membership_follows_last_operation(ops in proptest::collection::vec(any::<bool>(), 1..20)) {
        let registry = quiet_registry();
        let device = DeviceRef::new(MemoryDevice::default());
        for &add in &ops {
            if add {
                registry.register(&device);
            } else {
                registry.remove(&device);
            }
        }
        prop_assert_eq!(registry.contains(&device), *ops.last().unwrap());
        prop_assert!(registry.device_count() <= 1);
    }
}
