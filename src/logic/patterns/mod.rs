//! Pattern Memory - Recurring Signature Recognition
//!
//! Match-or-learn over quantized vector signatures. Recognition is a linear
//! scan; the pattern set is bounded in practice and the scan keeps the
//! tie-break rules exact: nearest pattern wins, and on equal distance the
//! most recently updated one.

pub mod types;

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::constants::{
    ANOMALY_SPREAD_THRESHOLD, INITIAL_PATTERN_CONFIDENCE, PATTERN_CONFIDENCE_STEP,
};
use crate::logic::axes::vector::AxisVector;

pub use types::{Pattern, PatternKind};

pub struct PatternMemory {
    recognition_threshold: f32,
    reference: AxisVector,
    patterns: RwLock<HashMap<String, Pattern>>,
}

impl PatternMemory {
    pub fn new(recognition_threshold: f32, reference: AxisVector) -> Self {
        Self {
            recognition_threshold,
            reference,
            patterns: RwLock::new(HashMap::new()),
        }
    }

    /// Record a signature: bump an existing pattern at the same quantized
    /// id, or classify and store a new one.
    pub fn learn(
        &self,
        vector: &AxisVector,
        context: HashMap<String, serde_json::Value>,
        description: Option<&str>,
        now: i64,
    ) -> Pattern {
        let id = vector.signature_id();
        let mut patterns = self.patterns.write();

        if let Some(existing) = patterns.get_mut(&id) {
            existing.frequency += 1;
            existing.confidence = (existing.confidence + PATTERN_CONFIDENCE_STEP).min(1.0);
            existing.last_seen = now;
            existing.context.extend(context);
            if let Some(description) = description {
                if existing.description.is_empty() {
                    existing.description = description.to_string();
                }
            }
            return existing.clone();
        }

        let kind = self.classify(vector, &context);
        let pattern = Pattern {
            id: id.clone(),
            signature: *vector,
            kind,
            confidence: INITIAL_PATTERN_CONFIDENCE,
            frequency: 1,
            first_seen: now,
            last_seen: now,
            context,
            description: description.unwrap_or_default().to_string(),
        };

        log::debug!("Learned new {} pattern {}", kind, id);
        patterns.insert(id, pattern.clone());
        pattern
    }

    /// Nearest stored pattern within the default threshold
    pub fn recognize(&self, vector: &AxisVector) -> Option<Pattern> {
        self.recognize_within(vector, self.recognition_threshold)
    }

    /// Nearest stored pattern within `threshold`, tie-broken by recency
    pub fn recognize_within(&self, vector: &AxisVector, threshold: f32) -> Option<Pattern> {
        let patterns = self.patterns.read();

        let mut best: Option<(&Pattern, f32)> = None;
        for pattern in patterns.values() {
            let d = vector.distance(&pattern.signature);
            if d > threshold {
                continue;
            }
            best = match best {
                None => Some((pattern, d)),
                Some((b, bd)) => {
                    if d < bd || (d == bd && pattern.last_seen > b.last_seen) {
                        Some((pattern, d))
                    } else {
                        Some((b, bd))
                    }
                }
            };
        }

        best.map(|(p, _)| p.clone())
    }

    pub fn count(&self) -> usize {
        self.patterns.read().len()
    }

    pub fn snapshot_all(&self) -> HashMap<String, Pattern> {
        self.patterns.read().clone()
    }

    /// Replace in-memory patterns with restored state (startup only)
    pub fn restore(&self, patterns: HashMap<String, Pattern>) {
        *self.patterns.write() = patterns;
    }

    fn classify(
        &self,
        vector: &AxisVector,
        context: &HashMap<String, serde_json::Value>,
    ) -> PatternKind {
        if vector.distance(&self.reference) < self.recognition_threshold {
            return PatternKind::Normal;
        }
        if vector.spread() > ANOMALY_SPREAD_THRESHOLD {
            return PatternKind::Anomaly;
        }
        match context.get("trend").and_then(|v| v.as_str()) {
            Some("up") => PatternKind::Recovery,
            Some("down") => PatternKind::Degradation,
            Some("sudden") => PatternKind::Spike,
            _ => PatternKind::Drift,
        }
    }
}
