//! File logging example
//!
//! Demonstrates logging to both the console and a file device simultaneously.
//!
//! Run with: cargo run --example file_logging

use device_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Device Logger - File Logging Example ===\n");

    // The caller owns the devices; the registry only refers to them.
    let console = DeviceRef::new(ConsoleDevice::stdout().with_colors(true));
    let file = DeviceRef::new(FileDevice::new("application.log")?);

    let registry = Registry::builder()
        .default_devices(false)
        .enable(LogLevel::Scheduler)
        .device(&console)
        .device(&file)
        .build();

    println!("1. Logging to both console and file:");
    registry.log_message("Application started", LogLevel::Overview, "main")?;
    registry.log_message("Loading configuration...", LogLevel::Verbose, "config")?;
    registry.log_message("Using default settings", LogLevel::Warning, "config")?;
    registry.log_message("Failed to load optional plugin", LogLevel::Error, "plugins")?;

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        registry.log_message(&format!("Processing item {}/5", i), LogLevel::Scheduler, "worker")?;
    }

    // Flush to ensure all logs are written
    registry.flush()?;

    // Remove devices before they go away.
    registry.remove(&file);
    registry.remove(&console);

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
