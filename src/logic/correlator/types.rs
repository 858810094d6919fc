use serde::{Deserialize, Serialize};

use crate::logic::axes::vector::AxisVector;

/// One cause hypothesis attached to a symptom signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseLink {
    pub name: String,
    pub probability: f32,
}

/// Symptom-signature to cause-probability record.
///
/// The id is derived from the quantized symptom signature, so feedback for
/// the same region of the space accumulates on one record. `causes` is kept
/// sorted by probability descending (name ascending on ties) so readers and
/// persisted state always see the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correlation {
    pub id: String,
    pub signature: AxisVector,
    pub description: String,
    pub causes: Vec<CauseLink>,
    pub resolutions: Vec<String>,
    pub times_seen: u64,
    pub last_updated: i64,
}

/// One ranked diagnosis entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub cause: String,
    pub probability: f32,
    pub resolutions: Vec<String>,
}
