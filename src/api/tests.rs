use chrono::{TimeZone, Utc};

use super::{CoreConfig, MonitorCore};
use crate::error::CoreError;
use crate::logic::drift::DriftKind;
use crate::logic::resonance::TrajectoryClass;

fn core_at(dir: &tempfile::TempDir) -> MonitorCore {
    let _ = env_logger::builder().is_test(true).try_init();
    MonitorCore::new(CoreConfig {
        store_path: dir.path().join("state_v1.json"),
        ..CoreConfig::default()
    })
}

fn ts(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

#[test]
fn test_observe_requires_input() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    assert!(matches!(
        core.observe("edge-fw", None, None, ts(0)),
        Err(CoreError::InvalidInput(_))
    ));
    assert!(matches!(
        core.observe("edge-fw", None, Some([0.5, 0.5, 0.5, 1.5]), ts(0)),
        Err(CoreError::InvalidInput(_))
    ));
    assert!(matches!(
        core.observe("", None, Some([0.5, 0.5, 0.5, 0.5]), ts(0)),
        Err(CoreError::InvalidInput(_))
    ));

    // Rejected input is never partially applied.
    assert_eq!(core.status().entities, 0);
    assert_eq!(core.status().patterns, 0);
}

#[test]
fn test_observe_text_goes_through_mapper() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    let outcome = core
        .observe(
            "edge-fw",
            Some("host unreachable, fw blocked the route"),
            None,
            ts(60),
        )
        .expect("observation accepted");

    // host, unreachable, route -> connectivity; fw, blocked -> policy.
    assert_eq!(outcome.matched, Some(5));
    assert!((outcome.vector.get(0) - 0.6).abs() < 1e-6);
    assert!((outcome.vector.get(1) - 0.4).abs() < 1e-6);
    assert_eq!(outcome.baseline_samples, 1);
    assert_eq!(core.status().entities, 1);
    assert_eq!(core.status().patterns, 1);
}

#[test]
fn test_repeated_observation_reinforces_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    let text = "latency spike, congestion on uplink";
    core.observe("edge-fw", Some(text), None, ts(60)).unwrap();
    let second = core.observe("edge-fw", Some(text), None, ts(120)).unwrap();

    assert_eq!(second.pattern.frequency, 2);
    assert_eq!(core.status().patterns, 1);
}

#[test]
fn test_healthy_baseline_no_anomaly() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    for i in 0..20 {
        core.observe("edge-fw", None, Some([0.9, 0.2, 0.8, 0.9]), ts(i * 60))
            .unwrap();
    }

    let report = core.query_anomaly("edge-fw", [0.9, 0.2, 0.8, 0.9]).unwrap();
    assert!(report.is_none());
}

#[test]
fn test_critical_anomaly_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    for i in 0..20 {
        core.observe("edge-fw", None, Some([0.9, 0.2, 0.8, 0.9]), ts(i * 60))
            .unwrap();
    }

    let report = core
        .query_anomaly("edge-fw", [0.1, 0.9, 0.1, 0.9])
        .unwrap()
        .expect("anomaly reported");

    assert_eq!(report.severity, crate::logic::anomaly::Severity::Critical);
    for axis in ["connectivity", "policy", "capacity"] {
        assert!(report.affected_axes.iter().any(|a| a == axis));
    }
    assert_eq!(core.status().anomalies_detected, 1);
}

#[test]
fn test_query_anomaly_without_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);
    let report = core.query_anomaly("ghost", [0.5, 0.5, 0.5, 0.5]).unwrap();
    assert!(report.is_none());
}

#[test]
fn test_feedback_and_diagnosis() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    core.feedback(
        [0.1, 0.9, 0.2, 0.8],
        "everything filtered upstream",
        "firewall change",
        Some("roll back the acl push"),
    )
    .unwrap();

    let diagnoses = core.query_diagnosis([0.1, 0.9, 0.2, 0.8]).unwrap();
    assert_eq!(diagnoses.len(), 1);
    assert_eq!(diagnoses[0].cause, "firewall change");
    assert_eq!(diagnoses[0].resolutions, vec!["roll back the acl push".to_string()]);

    assert!(matches!(
        core.feedback([0.1, 0.9, 0.2, 1.8], "d", "c", None),
        Err(CoreError::InvalidInput(_))
    ));
    assert!(matches!(
        core.feedback([0.1, 0.9, 0.2, 0.8], "d", "", None),
        Err(CoreError::InvalidInput(_))
    ));
}

#[test]
fn test_snapshot_and_drift() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    for i in 0..5 {
        core.observe("edge-fw", None, Some([0.9, 0.5, 0.5, 0.5]), ts(i * 60))
            .unwrap();
    }
    let before = core.snapshot("edge-fw").expect("snapshot available");
    assert_eq!(before.dominant_axis, "connectivity");

    for i in 5..50 {
        core.observe("edge-fw", None, Some([0.1, 0.5, 0.5, 0.5]), ts(i * 60))
            .unwrap();
    }
    let after = core.snapshot("edge-fw").expect("snapshot available");

    let report = core.query_drift(&before, &after);
    assert_eq!(report.kind, DriftKind::DimensionShift);
    assert!(report.magnitude > 0.5);

    let live = core.query_drift_from("edge-fw", &before).unwrap();
    assert_eq!(live.magnitude, report.magnitude);

    assert!(matches!(
        core.query_drift_from("ghost", &before),
        Err(CoreError::NotFound(_))
    ));
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let core = core_at(&dir);
        for i in 0..20 {
            core.observe("edge-fw", None, Some([0.9, 0.2, 0.8, 0.9]), ts(i * 60))
                .unwrap();
        }
        core.feedback([0.1, 0.9, 0.2, 0.8], "filtered", "firewall change", None)
            .unwrap();
    }

    let core = core_at(&dir);
    core.load();

    assert_eq!(core.status().entities, 1);
    assert_eq!(core.status().correlations, 1);

    // The restored baseline still powers detection.
    let report = core
        .query_anomaly("edge-fw", [0.1, 0.9, 0.1, 0.9])
        .unwrap()
        .expect("anomaly reported from restored baseline");
    assert_eq!(report.severity, crate::logic::anomaly::Severity::Critical);
}

#[test]
fn test_simulate_through_facade() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    let trajectory = core
        .simulate(crate::constants::REFERENCE_STATE, 100, None)
        .unwrap();
    assert_eq!(trajectory.classification, TrajectoryClass::Stable);
    assert_eq!(trajectory.points.len(), 100);

    assert!(matches!(
        core.simulate([1.5, 0.0, 0.0, 0.0], 10, None),
        Err(CoreError::InvalidInput(_))
    ));

    let bad_bounds = crate::logic::resonance::AxisBounds {
        lower: [0.5; 4],
        upper: [0.5; 4],
    };
    assert!(matches!(
        core.simulate([0.5, 0.5, 0.5, 0.5], 10, Some(bad_bounds)),
        Err(CoreError::InvalidInput(_))
    ));
}

#[test]
fn test_project_through_facade() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    assert!(core.project("edge-fw", 600).is_none());

    for i in 0..6 {
        let level = 0.9 - i as f32 * 0.05;
        core.observe("edge-fw", None, Some([level, 0.5, 0.5, 0.5]), ts(i * 60))
            .unwrap();
    }

    let prediction = core.project("edge-fw", 600).expect("prediction");
    assert_eq!(prediction.entity, "edge-fw");
    assert!(prediction.predicted.get(0) < 0.65);
}

#[test]
fn test_reset_entity() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    for i in 0..5 {
        core.observe("edge-fw", None, Some([0.9, 0.2, 0.8, 0.9]), ts(i * 60))
            .unwrap();
    }
    assert!(core.snapshot("edge-fw").is_some());

    assert!(core.reset_entity("edge-fw"));
    assert!(core.snapshot("edge-fw").is_none());
    assert!(!core.reset_entity("ghost"));
}

#[test]
fn test_status_reports_durability() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_at(&dir);

    core.observe("edge-fw", None, Some([0.5, 0.5, 0.5, 0.5]), ts(0))
        .unwrap();

    let status = core.status();
    assert!(status.durable);
    assert_eq!(status.schema_version, 1);
    assert_eq!(status.entities, 1);
}
