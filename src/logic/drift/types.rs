use serde::{Deserialize, Serialize};

use crate::logic::axes::vector::AxisVector;

/// Ordinal policy posture derived from the policy axis. Moving down this
/// scale between snapshots flags `security_degraded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyPosture {
    Open,
    Mixed,
    Filtered,
    Hardened,
}

impl PolicyPosture {
    /// Posture from the policy-axis level
    pub fn from_level(level: f32) -> Self {
        if level >= 0.75 {
            PolicyPosture::Hardened
        } else if level >= 0.5 {
            PolicyPosture::Filtered
        } else if level >= 0.25 {
            PolicyPosture::Mixed
        } else {
            PolicyPosture::Open
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            PolicyPosture::Open => 0,
            PolicyPosture::Mixed => 1,
            PolicyPosture::Filtered => 2,
            PolicyPosture::Hardened => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyPosture::Open => "open",
            PolicyPosture::Mixed => "mixed",
            PolicyPosture::Filtered => "filtered",
            PolicyPosture::Hardened => "hardened",
        }
    }
}

/// Point-in-time profile of an entity: the vector plus the structural
/// labels drift classification depends on. This is the one canonical
/// profile shape; drift, reporting and forecasting all consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub entity: String,
    pub taken_at: i64,
    pub vector: AxisVector,
    pub dominant_axis: String,
    pub archetype: String,
    pub posture: PolicyPosture,
    pub samples: u64,
    pub harmony: f32,
}

/// Severity of a snapshot-to-snapshot change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DriftSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftSeverity::Low => "low",
            DriftSeverity::Medium => "medium",
            DriftSeverity::High => "high",
            DriftSeverity::Critical => "critical",
        }
    }
}

/// Structural classification of a change, first matching rule wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriftKind {
    DimensionShift,
    ArchetypeChange,
    HarmonyDegradation,
    MajorReconfiguration,
    AxisDrift { axis: String },
    GradualDrift,
}

impl DriftKind {
    pub fn label(&self) -> String {
        match self {
            DriftKind::DimensionShift => "dimension-shift".to_string(),
            DriftKind::ArchetypeChange => "archetype-change".to_string(),
            DriftKind::HarmonyDegradation => "harmony-degradation".to_string(),
            DriftKind::MajorReconfiguration => "major-reconfiguration".to_string(),
            DriftKind::AxisDrift { axis } => format!("{}-drift", axis),
            DriftKind::GradualDrift => "gradual-drift".to_string(),
        }
    }
}

/// One axis that moved by at least the change threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisChange {
    pub axis: String,
    pub old_value: f32,
    pub new_value: f32,
}

impl AxisChange {
    pub fn delta(&self) -> f32 {
        self.new_value - self.old_value
    }
}

/// Derived comparison of two snapshots; never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    pub entity: String,
    pub from_snapshot: i64,
    pub to_snapshot: i64,
    pub magnitude: f32,
    pub percentage: f32,
    pub severity: DriftSeverity,
    pub kind: DriftKind,
    pub affected_axes: Vec<AxisChange>,
    pub harmony_shift: f32,
    pub security_degraded: bool,
}
