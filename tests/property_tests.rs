//! Property-based tests for rust_event_logger using proptest

use proptest::prelude::*;
use rust_event_logger::prelude::*;
use rust_event_logger::writers::PrettyFormatter;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Off),
        Just(Level::Panic),
        Just(Level::Fatal),
        Just(Level::Error),
        Just(Level::Warn),
        Just(Level::Info),
        Just(Level::Debug),
        Just(Level::Trace),
        Just(Level::All),
    ]
}

fn severity() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::SEVERITIES.to_vec())
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Names parse back to the same level regardless of case
    #[test]
    fn test_level_name_roundtrip(level in any_level(), upper in any::<bool>()) {
        let name = if upper { level.name().to_uppercase() } else { level.name().to_string() };
        let parsed: Level = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Digits parse to the level with that rank
    #[test]
    fn test_level_digit_roundtrip(level in severity()) {
        let parsed: Level = level.as_u8().to_string().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// The gate lets an event through iff it is at least as severe as the minimum
    #[test]
    fn test_gate_matches_rank(min in any_level(), event in severity()) {
        prop_assert_eq!(min.allows(event), event.as_u8() <= min.as_u8());
    }

    /// Raising the minimum never hides an event that was visible before
    #[test]
    fn test_gate_is_monotonic(a in any_level(), b in any_level(), event in severity()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if low.allows(event) {
            prop_assert!(high.allows(event));
        }
    }

    /// Committed events reach the writer exactly when the gate allows them
    #[test]
    fn test_commit_follows_gate(min in any_level(), event in severity()) {
        let memory = Arc::new(MemoryWriter::new());
        let logger = Logger::with_writer(Arc::clone(&memory));
        logger.set_level(min);

        let outcome = logger.with_level(event).msg("probe").unwrap();
        if min.allows(event) {
            prop_assert_eq!(memory.len(), 1);
            prop_assert_ne!(outcome, Outcome::Suppressed);
        } else {
            prop_assert!(memory.is_empty());
            prop_assert_eq!(outcome, Outcome::Suppressed);
        }
    }
}

// ============================================================================
// Field Tests
// ============================================================================

proptest! {
    /// Alternating items pair up, an odd tail gets a Null value
    #[test]
    fn test_fields_pairing(items in prop::collection::vec(any::<i64>(), 0..32)) {
        let logger = Logger::new();
        let event = logger.info().fields(items.clone());

        prop_assert_eq!(event.field_count(), (items.len() + 1) / 2);
        for (i, field) in event.fields_ref().iter().enumerate() {
            prop_assert_eq!(field.key(), &Value::Int(items[2 * i]));
            match items.get(2 * i + 1) {
                Some(v) => prop_assert_eq!(field.value(), &Value::Int(*v)),
                None => prop_assert!(field.value().is_null()),
            }
        }
        event.discard();
    }

    /// Scalars render before lists, lists before maps, each in attachment order
    #[test]
    fn test_render_passes_keep_order(shapes in prop::collection::vec(0u8..3, 1..12)) {
        let fields: Vec<Field> = shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| {
                let key = format!("f{:02}", i);
                match shape {
                    0 => Field::new(key, i),
                    1 => Field::new(key, vec![i, i + 1]),
                    _ => Field::new(key, Value::map([("k", i)])),
                }
            })
            .collect();

        let record = Record::new(Level::Info, "m").with_fields(&fields);
        let line = PrettyFormatter::new()
            .with_time_format(None)
            .format(&record, chrono::Utc::now());

        let mut expected: Vec<usize> = Vec::new();
        for pass in 0u8..3 {
            expected.extend(
                shapes.iter().enumerate().filter(|(_, s)| **s == pass).map(|(i, _)| i),
            );
        }

        let mut positions: Vec<(usize, usize)> = (0..shapes.len())
            .map(|i| (line.find(&format!("f{:02}=", i)).unwrap(), i))
            .collect();
        positions.sort();
        let rendered: Vec<usize> = positions.into_iter().map(|(_, i)| i).collect();
        prop_assert_eq!(rendered, expected);
    }

    /// Every committed event carries exactly the fields it was given
    #[test]
    fn test_pooled_events_start_clean(counts in prop::collection::vec(0usize..6, 1..8)) {
        let memory = Arc::new(MemoryWriter::new());
        let logger = Logger::with_writer(Arc::clone(&memory));

        for count in &counts {
            let mut event = logger.info();
            prop_assert_eq!(event.field_count(), 0);
            prop_assert_eq!(event.tag_ref(), None);
            for i in 0..*count {
                event = event.field(i, i);
            }
            event.msg("x").unwrap();
        }

        let seen: Vec<usize> = memory.entries().iter().map(|e| e.fields.len()).collect();
        prop_assert_eq!(seen, counts);
    }
}
