//! `log` facade bridge example
//!
//! Routes `log` macros, including structured key/values, into the logger.
//!
//! Run with: cargo run --example log_bridge

use rust_event_logger::prelude::*;
use rust_event_logger::LogBridge;

fn main() -> Result<()> {
    println!("=== Rust Event Logger - log Bridge Example ===\n");

    let logger = Logger::builder()
        .writer(PrettyWriter::stdout())
        .min_level(Level::Debug)
        .caller(true)
        .build();

    LogBridge::new(logger)
        .with_target_tags(true)
        .init(log::LevelFilter::Trace)?;

    log::info!("bridge installed");
    log::debug!(user = "bob", attempts = 3; "login");
    log::error!(error = "connection reset"; "sync aborted");
    log::trace!("never shown: trace has no counterpart level");
    log::logger().flush();

    Ok(())
}
