//! Basic registry usage example
//!
//! Demonstrates level switches, the default clog device and custom contexts.
//!
//! Run with: cargo run --example basic_usage

use device_logger::prelude::*;
use device_logger::{log_ctx, overview, verbose};

fn main() -> Result<()> {
    println!("=== Device Logger - Basic Usage Example ===\n");

    // The default registry writes to clog (stderr).
    let registry = Registry::new();

    println!("1. Logging at the levels enabled by default:");
    registry.overview("This is an overview message")?;
    registry.warning("This is a warning message")?;
    registry.error("This is an error message")?;
    registry.verbose("Verbose is off by default (hidden)")?;

    println!("\n2. Switching levels at runtime:");
    registry.set_log_enabled(LogLevel::Verbose, true);
    verbose!(registry, "Verbose enabled, value = {}", 42)?;
    registry.set_log_enabled(LogLevel::Overview, false);
    overview!(registry, "Overview disabled (hidden)")?;

    println!("\n3. Moving output from clog to stdout:");
    registry.remove(&factory::clog());
    registry.register(&factory::cout());
    log_ctx!(registry, LogLevel::Warning, "main", "now on stdout")?;

    println!("\n4. Level names:");
    for level in LogLevel::ALL {
        println!("   {:<12} enabled={}", registry.name(level), registry.log_enabled(level));
    }
    match registry.value("LOUD") {
        Ok(level) => println!("   LOUD is {}", level),
        Err(e) => println!("   lookup failed: {}", e),
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
