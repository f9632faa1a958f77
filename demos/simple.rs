//! Basic usage example
//!
//! Demonstrates events, fields, errors and collection rendering.
//!
//! Run with: cargo run --example simple

use rust_event_logger::prelude::*;
use rust_event_logger::{info, kv};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Event Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .writer(PrettyWriter::stdout())
        .min_level(Level::Trace)
        .build();

    println!("1. One event per level:");
    logger.trace().msg("entering main")?;
    logger.debug().msg("configuration loaded")?;
    logger.info().msg("service starting")?;
    logger.warn().msg("cache is cold")?;
    logger.error().msg("upstream returned 503")?;

    println!("\n2. Fields, tags and errors:");
    logger
        .info()
        .tag("http")
        .fields(kv!["method", "GET", "path", "/users", "status", 200])
        .field("elapsed", Duration::from_millis(42))
        .msg("request served")?;

    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only filesystem");
    logger
        .error()
        .tag("store")
        .err(err)
        .field("path", "/var/lib/app")
        .msg("snapshot failed")?;

    println!("\n3. Collections render as blocks:");
    logger
        .info()
        .fields(kv!["name", "Bob", "hobbies", vec!["biking", "gaming"], "age", 24])
        .field("limits", Value::map([("cpu", 2), ("mem", 512)]))
        .msg("profile")?;

    println!("\n4. Caller capture and format macros:");
    logger.set_caller(true);
    info!(logger, "listening on port {}", 8080)?;

    println!("\n5. Termination is reported, not enforced:");
    let outcome = logger.fatal().msg("disk gone")?;
    println!("   fatal event requested: {:?}", outcome.termination());

    println!("\n=== Example completed successfully ===");
    Ok(())
}
