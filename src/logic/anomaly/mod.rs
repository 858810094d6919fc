//! Anomaly Detector - Z-Score Deviation Scoring
//!
//! Scores an observation against the entity's learned baseline. Stateless:
//! every detection is derived from the baseline snapshot and the vector at
//! hand. The correlator is consulted read-only to attach probable causes.

pub mod types;

use crate::constants::{ANOMALY_TRIGGER_Z, STD_EPSILON, ZERO_STD_SCALE};
use crate::logic::axes::layout::{axis_name, AXIS_COUNT};
use crate::logic::axes::vector::AxisVector;
use crate::logic::baseline::EntityBaseline;
use crate::logic::correlator::CauseCorrelator;

pub use types::{AnomalyReport, Severity};

#[derive(Debug, Clone, Copy)]
pub struct AnomalyConfig {
    /// Per-axis z below this is never reported
    pub trigger_z: f32,
    /// z substitution for zero-variance baselines: |delta| * scale
    pub zero_std_scale: f32,
    /// Floor for the stddev denominator
    pub std_epsilon: f32,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            trigger_z: ANOMALY_TRIGGER_Z,
            zero_std_scale: ZERO_STD_SCALE,
            std_epsilon: STD_EPSILON,
        }
    }
}

pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl AnomalyDetector {
    pub fn new(config: AnomalyConfig) -> Self {
        Self { config }
    }

    /// Score `current` against `baseline`. Returns `None` when every axis
    /// stays under the trigger threshold.
    pub fn detect(
        &self,
        baseline: &EntityBaseline,
        current: &AxisVector,
        correlator: &CauseCorrelator,
        now: i64,
    ) -> Option<AnomalyReport> {
        let expected = baseline.mean_vector();
        let stddev = baseline.stddev();

        let mut z = [0.0f32; AXIS_COUNT];
        for i in 0..AXIS_COUNT {
            let delta = (current.get(i) - expected.get(i)).abs();
            z[i] = if stddev[i] == 0.0 {
                // Zero-variance substitution: treat the baseline as very
                // tight rather than dividing by the epsilon floor.
                delta * self.config.zero_std_scale
            } else {
                delta / stddev[i].max(self.config.std_epsilon)
            };
        }

        let max_z = z.iter().copied().fold(0.0f32, f32::max);
        let avg_z = z.iter().sum::<f32>() / AXIS_COUNT as f32;

        if max_z < self.config.trigger_z {
            return None;
        }

        let affected: Vec<usize> = (0..AXIS_COUNT)
            .filter(|&i| z[i] > self.config.trigger_z)
            .collect();
        let affected_axes = affected
            .iter()
            .filter_map(|&i| axis_name(i))
            .map(str::to_string)
            .collect();

        let probable_causes = correlator
            .diagnose(current)
            .into_iter()
            .map(|d| d.cause)
            .collect();

        let report = AnomalyReport {
            entity: baseline.entity.clone(),
            detected_at: now,
            severity: severity_for(max_z, avg_z),
            current: *current,
            expected,
            max_z,
            avg_z,
            affected_axes,
            probable_causes,
            recommended_actions: actions_for(&affected, current, &expected),
        };

        log::warn!(
            "Anomaly on '{}': severity={} max_z={:.2} avg_z={:.2}",
            report.entity,
            report.severity,
            report.max_z,
            report.avg_z
        );

        Some(report)
    }
}

fn severity_for(max_z: f32, avg_z: f32) -> Severity {
    if max_z > 4.0 || avg_z > 3.0 {
        Severity::Critical
    } else if max_z > 3.0 || avg_z > 2.0 {
        Severity::High
    } else if max_z > 2.5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Fixed, direction-aware remediation table
fn actions_for(affected: &[usize], current: &AxisVector, expected: &AxisVector) -> Vec<String> {
    let mut actions = Vec::new();
    for &i in affected {
        let decreased = current.get(i) < expected.get(i);
        let action = match (i, decreased) {
            (0, true) => "Verify reachability of the target (ping, traceroute)",
            (0, false) => "Confirm newly appearing links or routes are intended",
            (1, true) => "Audit recent firewall and ACL changes",
            (1, false) => "Confirm tightened filtering is intended",
            (2, true) => "Check for congestion, saturation or overload",
            (2, false) => "Validate reported performance gains against capacity plans",
            (3, true) => "Check monitoring agents and probe coverage",
            (3, false) => "Review newly exposed services and open ports",
            _ => continue,
        };
        actions.push(action.to_string());
    }
    actions
}
