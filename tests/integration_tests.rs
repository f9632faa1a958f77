//! Integration tests for the event logger
//!
//! These tests verify:
//! - End-to-end pretty rendering and the level gate
//! - Tagged views versus independent copies
//! - Retry after a failed commit
//! - Fan-out failure semantics
//! - JSON file output and caller capture
//! - Termination requests

use rust_event_logger::core::error::LoggerError;
use rust_event_logger::kv;
use rust_event_logger::prelude::*;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf8 output")
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn pretty_logger() -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = PrettyWriter::new(buffer.clone()).with_time_format(None);
    (Logger::with_writer(writer), buffer)
}

/// Fails the first `failures` writes, recording every attempt.
struct FlakyWriter {
    failures: usize,
    attempts: Mutex<Vec<CapturedAttempt>>,
}

#[derive(Debug, Clone, PartialEq)]
struct CapturedAttempt {
    message: String,
    tag: Option<String>,
    fields: Vec<Field>,
    error: Option<String>,
}

impl FlakyWriter {
    fn new(failures: usize) -> Self {
        Self {
            failures,
            attempts: Mutex::new(Vec::new()),
        }
    }
}

impl Writer for FlakyWriter {
    fn write(&self, record: &Record<'_>) -> rust_event_logger::Result<()> {
        let mut attempts = self.attempts.lock().unwrap();
        attempts.push(CapturedAttempt {
            message: record.message.to_string(),
            tag: record.tag.map(str::to_string),
            fields: record.fields.to_vec(),
            error: record.error.map(|e| e.to_string()),
        });
        if attempts.len() <= self.failures {
            return Err(LoggerError::writer("temporarily unavailable"));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

struct CountingWriter {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingWriter {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }
}

impl Writer for CountingWriter {
    fn write(&self, _record: &Record<'_>) -> rust_event_logger::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LoggerError::writer("counting writer failed"));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_end_to_end_pretty_line() {
    let (logger, buffer) = pretty_logger();

    let outcome = logger.info().tag("svc").field("n", 5).msg("hello").unwrap();
    assert_eq!(outcome, Outcome::Written);
    assert_eq!(buffer.contents(), "INFO  svc        hello n=5\n");

    let line = buffer.contents();
    let level = line.find("INFO").unwrap();
    let tag = line.find("svc").unwrap();
    let message = line.find("hello").unwrap();
    let field = line.find("n=5").unwrap();
    assert!(level < tag && tag < message && message < field);
}

#[test]
fn test_gated_commit_writes_nothing() {
    let (logger, buffer) = pretty_logger();
    logger.set_level(Level::Error);

    let outcome = logger.info().tag("svc").field("n", 5).msg("hello").unwrap();
    assert_eq!(outcome, Outcome::Suppressed);
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_collection_fields_render_as_blocks() {
    let (logger, buffer) = pretty_logger();

    logger
        .info()
        .fields(kv![
            "name",
            "Bob",
            "hobbies",
            vec!["biking", "gaming"],
            "age",
            24
        ])
        .msg("profile")
        .unwrap();

    assert_eq!(
        buffer.contents(),
        "INFO  profile name=\"Bob\" age=24\n     hobbies=\n     │ [00] \"biking\"\n     │ [01] \"gaming\"\n"
    );
}

#[test]
fn test_error_and_odd_fields() {
    let (logger, buffer) = pretty_logger();
    let err = io::Error::new(io::ErrorKind::NotFound, "config.toml missing");

    logger
        .error()
        .err(err)
        .fields(kv!["path", "/etc/app", "retry"])
        .msg("startup failed")
        .unwrap();

    assert_eq!(
        buffer.contents(),
        "ERROR startup failed error=\"config.toml missing\" path=\"/etc/app\" retry=<nil>\n"
    );
}

#[test]
fn test_tagged_view_is_live_and_copy_is_not() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::with_writer(Arc::clone(&memory));
    logger.set_tag("root");

    let view = logger.tagged("X");
    let copy = logger.copy();

    logger.set_level(Level::Trace);
    assert_eq!(view.level(), Level::Trace);
    assert_eq!(copy.level(), Level::Info);

    copy.set_level(Level::Error);
    assert_eq!(logger.level(), Level::Trace);

    view.trace().msg("from view").unwrap();
    copy.warn().msg("from copy").unwrap();

    let entries = memory.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tag.as_deref(), Some("X"));
    assert_eq!(logger.default_tag().as_deref(), Some("root"));
}

#[test]
fn test_view_sees_new_writers() {
    let logger = Logger::new();
    let view = logger.tagged("late");
    assert_eq!(view.info().msg("nowhere").unwrap(), Outcome::Suppressed);

    let memory = Arc::new(MemoryWriter::new());
    logger.set_writer(Arc::clone(&memory));
    view.info().msg("somewhere").unwrap();
    assert_eq!(memory.entries()[0].message, "somewhere");
}

#[test]
fn test_retry_reproduces_identical_attempt() {
    let writer = Arc::new(FlakyWriter::new(1));
    let logger = Logger::with_writer(Arc::clone(&writer));

    let mut event = logger
        .warn()
        .tag("db")
        .fields(kv!["table", "users", "rows", 3])
        .err("lock timeout");

    let err = event.msg("slow write").unwrap_err();
    assert!(matches!(err.source, LoggerError::Writer(_)));
    assert!(err.termination.is_none());

    assert_eq!(event.msg("slow write").unwrap(), Outcome::Written);

    let attempts = writer.attempts.lock().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0], attempts[1]);
    assert_eq!(attempts[0].fields.len(), 2);
    assert_eq!(attempts[0].error.as_deref(), Some("lock timeout"));

    assert_eq!(logger.metrics().failed(), 1);
    assert_eq!(logger.metrics().written(), 1);
}

#[test]
fn test_commit_error_converts_for_question_mark() {
    fn run(logger: &Logger) -> rust_event_logger::Result<()> {
        logger.error().msg("will fail")?;
        Ok(())
    }

    let logger = Logger::with_writer(FlakyWriter::new(usize::MAX));
    assert!(matches!(run(&logger), Err(LoggerError::Writer(_))));
}

#[test]
fn test_fan_out_stops_at_first_failure() {
    let w1 = CountingWriter::new(false);
    let w2 = CountingWriter::new(true);
    let w3 = CountingWriter::new(false);

    let logger = Logger::builder()
        .shared_writer(w1.clone())
        .shared_writer(w2.clone())
        .shared_writer(w3.clone())
        .build();

    let err = logger.info().msg("broadcast").unwrap_err();
    assert_eq!(err.source.to_string(), "Writer error: counting writer failed");

    assert_eq!(w1.calls.load(Ordering::SeqCst), 1);
    assert_eq!(w2.calls.load(Ordering::SeqCst), 1);
    assert_eq!(w3.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_discard_writes_nothing() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::with_writer(Arc::clone(&memory));

    logger.info().field("k", "v").discard();
    assert!(memory.is_empty());
}

#[test]
fn test_json_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("events.jsonl");

    let writer = JsonWriter::file(&log_file)
        .expect("Failed to create writer")
        .with_time_format(None);
    let logger = Logger::with_writer(writer);
    logger.set_level(Level::Debug);

    logger
        .debug()
        .tag("jobs")
        .field("id", 42u64)
        .field("queue", vec!["a", "b"])
        .msg("scheduled")
        .unwrap();
    logger.close().expect("Failed to close");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let value: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
    assert_eq!(value["level"], 6);
    assert_eq!(value["level_string"], "debug");
    assert_eq!(value["tag"], "jobs");
    assert_eq!(value["message"], "scheduled");
    assert_eq!(value["fields"][0]["key"], "id");
    assert_eq!(value["fields"][0]["value"], 42);
    assert_eq!(value["fields"][1]["value"][1], "b");
    assert!(value.get("caller").is_none());
}

#[test]
fn test_write_after_close_fails() {
    let (logger, _buffer) = pretty_logger();
    logger.close().unwrap();

    let err = logger.info().msg("too late").unwrap_err();
    assert!(matches!(err.source, LoggerError::WriterClosed { .. }));
}

#[test]
fn test_caller_capture() {
    let (logger, buffer) = pretty_logger();

    let mut event = logger.info().caller().field("k", 1);
    let line = line!() + 1;
    event.msg("located").unwrap();

    let expected = format!("tests.rs:{}>", line);
    let output = buffer.contents();
    assert!(output.contains(&expected), "missing {} in {}", expected, output);
    assert!(output.contains("<…"));
}

#[test]
fn test_fatal_and_panic_report_termination() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::with_writer(Arc::clone(&memory));

    let outcome = logger.fatal().msg("unrecoverable").unwrap();
    assert_eq!(outcome.termination(), Some(&Termination::Exit { code: 1 }));

    let outcome = logger.panic().msg("invariant broken").unwrap();
    assert_eq!(
        outcome,
        Outcome::Terminate(Termination::Panic {
            message: "invariant broken".to_string()
        })
    );
    assert_eq!(memory.len(), 2);
    assert_eq!(logger.metrics().terminations(), 2);
}

#[test]
fn test_termination_without_writer() {
    let logger = Logger::new();
    let outcome = logger.fatal().msg("no writer").unwrap();
    assert_eq!(outcome, Outcome::Terminate(Termination::Exit { code: 1 }));
}

#[test]
#[should_panic(expected = "invariant broken")]
fn test_outcome_enforce_panics() {
    let logger = Logger::with_writer(MemoryWriter::new());
    let _ = logger.panic().msg("invariant broken").unwrap().enforce();
}

#[test]
fn test_options_build_pretty_file_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let json = format!(
        r#"{{"level": "w", "tag": "api", "timestamp": null, "target": {{"file": {:?}}}}}"#,
        log_file
    );
    let logger = LoggerOptions::from_json(&json).unwrap().build().unwrap();

    logger.info().msg("filtered").unwrap();
    logger.warn().field("status", 503).msg("upstream down").unwrap();
    logger.close().unwrap();

    let content = std::fs::read_to_string(&log_file).unwrap();
    assert_eq!(content, "WARN  api        upstream down status=503\n");
}
