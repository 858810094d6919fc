use super::{project, TrendClass};
use crate::logic::baseline::ObservationRecord;

fn record(timestamp: i64, values: [f32; 4]) -> ObservationRecord {
    ObservationRecord { timestamp, values }
}

/// Evenly spaced ramp on one axis, 60s apart
fn ramp(n: usize, start: f32, step: f32) -> Vec<ObservationRecord> {
    (0..n)
        .map(|i| {
            record(
                i as i64 * 60,
                [(start + step * i as f32).clamp(0.0, 1.0), 0.5, 0.5, 0.5],
            )
        })
        .collect()
}

#[test]
fn test_too_little_history() {
    assert!(project("e", &[], 600).is_none());
    assert!(project("e", &ramp(2, 0.5, 0.0), 600).is_none());
}

#[test]
fn test_flat_history_is_stable() {
    let history = ramp(10, 0.5, 0.0);
    let p = project("e", &history, 600).expect("prediction");

    assert_eq!(p.trend, TrendClass::Stable);
    assert!((p.predicted.get(0) - 0.5).abs() < 1e-6);
    assert!(p.risk_factors.is_empty());
}

#[test]
fn test_linear_ramp_extrapolates() {
    // 0.30, 0.32, ... 0.48: slope 0.02 per minute.
    let history = ramp(10, 0.3, 0.02);
    // Horizon of 5 intervals.
    let p = project("e", &history, 300).expect("prediction");

    assert!((p.predicted.get(0) - 0.58).abs() < 1e-4);
    assert_eq!(p.entity, "e");
    assert_eq!(p.horizon_secs, 300);
}

#[test]
fn test_prediction_clamped_to_domain() {
    let history = ramp(10, 0.8, 0.02);
    // Far horizon would overshoot 1.0 without the clamp.
    let p = project("e", &history, 60 * 60).expect("prediction");
    assert!(p.predicted.get(0) <= 1.0);
}

#[test]
fn test_degrading_trend_and_risks() {
    // Connectivity collapsing 0.9 -> 0.45 over 10 observations.
    let history = ramp(10, 0.9, -0.05);
    let p = project("e", &history, 600).expect("prediction");

    assert_eq!(p.trend, TrendClass::Degrading);
    assert!(p
        .risk_factors
        .iter()
        .any(|r| r.contains("connectivity trending down")));
}

#[test]
fn test_floor_risk() {
    let history = ramp(10, 0.3, -0.02);
    let p = project("e", &history, 1200).expect("prediction");
    assert!(p
        .risk_factors
        .iter()
        .any(|r| r.contains("projected near floor")));
}

#[test]
fn test_consistent_trend_scores_higher_confidence() {
    let steady = ramp(10, 0.3, 0.02);
    let mut noisy = ramp(10, 0.3, 0.02);
    // Same endpoints, jittered interior.
    for (i, r) in noisy.iter_mut().enumerate() {
        if i % 2 == 1 && i < 9 {
            r.values[0] -= 0.05;
        }
    }

    let a = project("e", &steady, 300).expect("prediction");
    let b = project("e", &noisy, 300).expect("prediction");
    assert!(a.confidence > b.confidence);
    assert!(a.confidence <= 1.0 && b.confidence > 0.0);
}
