use serde::{Deserialize, Serialize};

use crate::logic::axes::vector::AxisVector;

/// Severity ladder for detections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detection. Derived from a baseline plus the observation that
/// triggered it; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub entity: String,
    pub detected_at: i64,
    pub severity: Severity,
    pub current: AxisVector,
    pub expected: AxisVector,
    pub max_z: f32,
    pub avg_z: f32,
    pub affected_axes: Vec<String>,
    pub probable_causes: Vec<String>,
    pub recommended_actions: Vec<String>,
}
