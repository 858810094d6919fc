use chrono::{TimeZone, Utc};

use super::BaselineLearner;
use crate::logic::axes::vector::AxisVector;

fn ts(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

#[test]
fn test_first_observation_creates_baseline() {
    let learner = BaselineLearner::new(100);
    assert!(learner.get("gw-1").is_none());

    let v = AxisVector::from_values([0.9, 0.2, 0.8, 0.9]);
    let b = learner.update("gw-1", &v, ts(1_700_000_000));

    assert_eq!(b.samples, 1);
    assert_eq!(b.mean, v.values);
    assert_eq!(b.variance, [0.0; 4]);
    assert!(learner.get("gw-1").is_some());
}

#[test]
fn test_constant_stream_converges() {
    let learner = BaselineLearner::new(2000);
    let v = AxisVector::from_values([0.9, 0.2, 0.8, 0.9]);

    for i in 0..1000 {
        learner.update("gw-1", &v, ts(1_700_000_000 + i * 60));
    }

    let b = learner.get("gw-1").expect("baseline exists");
    assert_eq!(b.samples, 1000);
    for i in 0..4 {
        assert!(
            (b.mean[i] - v.get(i)).abs() < 1e-6,
            "axis {} mean {} != {}",
            i,
            b.mean[i],
            v.get(i)
        );
        assert!(b.stddev()[i] < 1e-6);
    }
}

#[test]
fn test_welford_two_point_variance() {
    let learner = BaselineLearner::new(100);
    learner.update("e", &AxisVector::from_values([0.0, 0.0, 0.0, 0.0]), ts(0));
    learner.update("e", &AxisVector::from_values([1.0, 0.0, 0.0, 0.0]), ts(60));

    let b = learner.get("e").expect("baseline exists");
    // Population variance of {0, 1} is 0.25.
    assert!((b.mean[0] - 0.5).abs() < 1e-6);
    assert!((b.variance[0] - 0.25).abs() < 1e-6);
    assert_eq!(b.variance[1], 0.0);
}

#[test]
fn test_variance_invariant_holds() {
    let learner = BaselineLearner::new(100);
    let samples = [
        [0.1, 0.9, 0.3, 0.7],
        [0.2, 0.8, 0.4, 0.6],
        [0.15, 0.85, 0.35, 0.65],
        [0.3, 0.7, 0.5, 0.5],
    ];
    for (i, s) in samples.iter().enumerate() {
        learner.update("e", &AxisVector::from_values(*s), ts(i as i64 * 60));
    }

    let b = learner.get("e").expect("baseline exists");
    for i in 0..4 {
        assert!(b.variance[i] >= 0.0);
        assert!((0.0..=1.0).contains(&b.mean[i]));
    }
}

#[test]
fn test_seasonal_buckets() {
    let learner = BaselineLearner::new(100);
    // 1970-01-01 03:00 and 04:00 UTC.
    learner.update(
        "e",
        &AxisVector::from_values([1.0, 0.0, 0.0, 0.0]),
        ts(3 * 3600),
    );
    learner.update(
        "e",
        &AxisVector::from_values([0.0, 1.0, 0.0, 0.0]),
        ts(4 * 3600),
    );
    learner.update(
        "e",
        &AxisVector::from_values([0.0, 0.0, 1.0, 0.0]),
        ts(4 * 3600 + 60),
    );

    let b = learner.get("e").expect("baseline exists");
    assert_eq!(b.seasonal.len(), 2);

    let three = b.seasonal.get(&3).expect("bucket 3");
    assert_eq!(three.samples, 1);
    assert_eq!(three.mean[0], 1.0);

    let four = b.seasonal.get(&4).expect("bucket 4");
    assert_eq!(four.samples, 2);
    assert!((four.mean[1] - 0.5).abs() < 1e-6);
    assert!((four.mean[2] - 0.5).abs() < 1e-6);
}

#[test]
fn test_history_ring_cap() {
    let learner = BaselineLearner::new(5);
    for i in 0..12 {
        let v = AxisVector::from_values([i as f32 / 20.0, 0.0, 0.0, 0.0]);
        learner.update("e", &v, ts(i * 60));
    }

    let history = learner.history("e", 100);
    assert_eq!(history.len(), 5);
    // Oldest entries were dropped; the ring holds the 5 most recent.
    assert_eq!(history.first().map(|r| r.timestamp), Some(7 * 60));
    assert_eq!(history.last().map(|r| r.timestamp), Some(11 * 60));

    let tail = learner.history("e", 2);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0].timestamp, 10 * 60);
}

#[test]
fn test_reset() {
    let learner = BaselineLearner::new(100);
    let v = AxisVector::from_values([0.5, 0.5, 0.5, 0.5]);
    for i in 0..10 {
        learner.update("e", &v, ts(i * 60));
    }

    assert!(learner.reset("e"));
    let b = learner.get("e").expect("entity survives reset");
    assert_eq!(b.samples, 0);
    assert_eq!(b.mean, [0.0; 4]);
    assert!(learner.history("e", 100).is_empty());

    assert!(!learner.reset("unknown"));
}

#[test]
fn test_entities_are_independent() {
    let learner = BaselineLearner::new(100);
    learner.update("a", &AxisVector::from_values([1.0, 0.0, 0.0, 0.0]), ts(0));
    learner.update("b", &AxisVector::from_values([0.0, 1.0, 0.0, 0.0]), ts(0));

    assert_eq!(learner.entity_count(), 2);
    assert_eq!(learner.get("a").map(|b| b.mean[0]), Some(1.0));
    assert_eq!(learner.get("b").map(|b| b.mean[1]), Some(1.0));
}
