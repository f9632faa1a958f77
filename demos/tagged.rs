//! Tagged views and copies example
//!
//! Demonstrates live tagged views, independent copies and fan-out writers.
//!
//! Run with: cargo run --example tagged

use rust_event_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Event Logger - Tagged Loggers Example ===\n");

    let log_path = std::env::temp_dir().join("rust_event_logger_tagged.jsonl");
    let logger = Logger::builder()
        .writer(PrettyWriter::stdout())
        .writer(JsonWriter::file(&log_path)?)
        .build();

    println!("1. Views share the parent's settings:");
    let db = logger.tagged("db");
    let cache = logger.tagged("cache");
    db.info().field("pool", 8).msg("connected")?;
    logger.set_level(Level::Debug);
    cache.debug().msg("visible after the parent lowered its level")?;

    println!("\n2. Copies are independent:");
    let quiet = logger.copy();
    quiet.set_level(Level::Error);
    quiet.info().msg("filtered by the copy")?;
    logger.info().msg("still visible on the parent")?;

    println!("\n3. Views from many threads:");
    let logger = Arc::new(logger);
    let handles: Vec<_> = (0..4)
        .map(|id| {
            let worker = logger.tagged(format!("worker-{}", id));
            thread::spawn(move || {
                for job in 0..3 {
                    if let Err(e) = worker.info().field("job", job).msg("done") {
                        eprintln!("worker {} failed to log: {}", id, e.source);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    logger.close()?;
    println!("\nJSON lines written to {}", log_path.display());
    println!("written={} suppressed={}", logger.metrics().written(), logger.metrics().suppressed());
    Ok(())
}
