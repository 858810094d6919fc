use std::collections::HashMap;

use super::{PersistedState, StateStore, STORE_SCHEMA_VERSION};
use crate::error::CoreError;
use crate::logic::axes::vector::AxisVector;
use crate::logic::baseline::EntityBaseline;

fn sample_state() -> PersistedState {
    let mut baselines = HashMap::new();
    let mut b = EntityBaseline::new("gw-1", 100);
    b.samples = 42;
    b.mean = [0.9, 0.2, 0.8, 0.9];
    baselines.insert("gw-1".to_string(), b);

    PersistedState::new(baselines, HashMap::new(), HashMap::new(), 100)
}

#[test]
fn test_missing_file_is_no_prior_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state_v1.json"));
    assert!(store.load_all().unwrap().is_none());
}

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state_v1.json"));

    store.save_all(&sample_state()).unwrap();
    let loaded = store.load_all().unwrap().expect("state present");

    assert_eq!(loaded.schema_version, STORE_SCHEMA_VERSION);
    let b = loaded.baselines.get("gw-1").expect("baseline kept");
    assert_eq!(b.samples, 42);
    assert_eq!(b.mean, [0.9, 0.2, 0.8, 0.9]);
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("nested").join("deep").join("state_v1.json"));
    store.save_all(&sample_state()).unwrap();
    assert!(store.load_all().unwrap().is_some());
}

#[test]
fn test_overwrite_replaces_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state_v1.json"));

    store.save_all(&sample_state()).unwrap();

    let mut second = sample_state();
    second.saved_at = 200;
    second.patterns.insert(
        "abcd1234".to_string(),
        crate::logic::patterns::Pattern {
            id: "abcd1234".to_string(),
            signature: AxisVector::from_values([0.2, 0.2, 0.2, 0.2]),
            kind: crate::logic::patterns::PatternKind::Drift,
            confidence: 0.5,
            frequency: 1,
            first_seen: 150,
            last_seen: 150,
            context: HashMap::new(),
            description: String::new(),
        },
    );
    store.save_all(&second).unwrap();

    let loaded = store.load_all().unwrap().expect("state present");
    assert_eq!(loaded.saved_at, 200);
    assert_eq!(loaded.patterns.len(), 1);

    // No temp file left behind.
    assert!(!store.path().with_extension("tmp").exists());
}

#[test]
fn test_future_schema_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state_v1.json"));

    let mut state = sample_state();
    state.schema_version = STORE_SCHEMA_VERSION + 1;
    // Bypass save-side validation by writing the raw JSON.
    std::fs::write(store.path(), serde_json::to_vec(&state).unwrap()).unwrap();

    match store.load_all() {
        Err(CoreError::SchemaMismatch { expected, actual, .. }) => {
            assert_eq!(expected, STORE_SCHEMA_VERSION);
            assert_eq!(actual, STORE_SCHEMA_VERSION + 1);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_layout_mismatch_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state_v1.json"));

    let mut state = sample_state();
    state.layout_hash = !state.layout_hash;
    std::fs::write(store.path(), serde_json::to_vec(&state).unwrap()).unwrap();

    assert!(matches!(
        store.load_all(),
        Err(CoreError::SchemaMismatch { .. })
    ));
}

#[test]
fn test_corrupt_file_is_error_not_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state_v1.json"));
    std::fs::write(store.path(), b"{ not json").unwrap();

    assert!(matches!(
        store.load_all(),
        Err(CoreError::Persistence(_))
    ));
}
