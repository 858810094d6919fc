//! Drift Analyzer - Snapshot Comparison
//!
//! Pure function over two fully-materialized profile snapshots; never
//! consults live state. Classification precedence is fixed: dominant-axis
//! change, then archetype change, then harmony degradation, then the
//! per-axis change counts.

pub mod types;

use crate::constants::{AXIS_CHANGE_THRESHOLD, HARMONY_DROP_THRESHOLD};
use crate::logic::axes::layout::{axis_name, AXIS_COUNT};

pub use types::{AxisChange, DriftKind, DriftReport, DriftSeverity, PolicyPosture, ProfileSnapshot};

/// Compare two snapshots of the same or related entities
pub fn compare(old: &ProfileSnapshot, new: &ProfileSnapshot) -> DriftReport {
    let magnitude = old.vector.distance(&new.vector);
    let percentage = magnitude / 2.0 * 100.0;

    let mut affected: Vec<AxisChange> = (0..AXIS_COUNT)
        .filter_map(|i| {
            let old_value = old.vector.get(i);
            let new_value = new.vector.get(i);
            if (new_value - old_value).abs() >= AXIS_CHANGE_THRESHOLD {
                Some(AxisChange {
                    axis: axis_name(i).unwrap_or("?").to_string(),
                    old_value,
                    new_value,
                })
            } else {
                None
            }
        })
        .collect();
    affected.sort_by(|a, b| {
        b.delta()
            .abs()
            .partial_cmp(&a.delta().abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let harmony_shift = new.harmony - old.harmony;

    DriftReport {
        entity: new.entity.clone(),
        from_snapshot: old.taken_at,
        to_snapshot: new.taken_at,
        magnitude,
        percentage,
        severity: severity_for(magnitude),
        kind: classify(old, new, &affected, harmony_shift),
        affected_axes: affected,
        harmony_shift,
        security_degraded: new.posture.rank() < old.posture.rank(),
    }
}

fn severity_for(magnitude: f32) -> DriftSeverity {
    if magnitude < 0.1 {
        DriftSeverity::Low
    } else if magnitude < 0.2 {
        DriftSeverity::Medium
    } else if magnitude < 0.5 {
        DriftSeverity::High
    } else {
        DriftSeverity::Critical
    }
}

fn classify(
    old: &ProfileSnapshot,
    new: &ProfileSnapshot,
    affected: &[AxisChange],
    harmony_shift: f32,
) -> DriftKind {
    if old.dominant_axis != new.dominant_axis {
        return DriftKind::DimensionShift;
    }
    if old.archetype != new.archetype {
        return DriftKind::ArchetypeChange;
    }
    if harmony_shift < -HARMONY_DROP_THRESHOLD {
        return DriftKind::HarmonyDegradation;
    }
    if affected.len() >= 3 {
        return DriftKind::MajorReconfiguration;
    }
    if affected.len() == 1 {
        return DriftKind::AxisDrift {
            axis: affected[0].axis.clone(),
        };
    }
    DriftKind::GradualDrift
}
