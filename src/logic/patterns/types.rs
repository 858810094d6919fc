use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::logic::axes::vector::AxisVector;

/// Classified nature of a recurring signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Normal,
    Anomaly,
    Drift,
    Spike,
    Degradation,
    Recovery,
    Cycle,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Normal => "normal",
            PatternKind::Anomaly => "anomaly",
            PatternKind::Drift => "drift",
            PatternKind::Spike => "spike",
            PatternKind::Degradation => "degradation",
            PatternKind::Recovery => "recovery",
            PatternKind::Cycle => "cycle",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A learned recurring signature.
///
/// The id is derived from the quantized signature, so re-learning the same
/// region of the space always lands on the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub signature: AxisVector,
    pub kind: PatternKind,
    pub confidence: f32,
    pub frequency: u64,
    pub first_seen: i64,
    pub last_seen: i64,
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    pub description: String,
}
