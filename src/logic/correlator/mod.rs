//! Root-Cause Correlator - Symptom/Cause Probability Tables
//!
//! Learns from explicit feedback: a confirmed cause for a symptom signature
//! reinforces toward 1 without ever reaching it, and every other cause on
//! that signature decays. Diagnosis weights stored probabilities by how
//! closely the query matches the signature, and its output order is fully
//! deterministic for identical state.

pub mod types;

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::constants::{
    CAUSE_DECAY, CAUSE_REINFORCEMENT, DIAGNOSIS_RADIUS, INITIAL_CAUSE_PROBABILITY, MAX_DIAGNOSES,
    PROBABILITY_FLOOR,
};
use crate::logic::axes::vector::AxisVector;

pub use types::{CauseLink, Correlation, Diagnosis};

#[derive(Debug, Clone, Copy)]
pub struct CorrelatorConfig {
    /// Maximum signature distance for a correlation to join a diagnosis
    pub match_radius: f32,
    /// Diagnoses below this probability are dropped
    pub probability_floor: f32,
    /// Result cap
    pub max_results: usize,
    /// Matched cause update: p += (1 - p) * reinforcement
    pub reinforcement: f32,
    /// Non-matched cause update: p *= decay
    pub decay: f32,
    /// Probability assigned on first feedback
    pub initial_probability: f32,
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            match_radius: DIAGNOSIS_RADIUS,
            probability_floor: PROBABILITY_FLOOR,
            max_results: MAX_DIAGNOSES,
            reinforcement: CAUSE_REINFORCEMENT,
            decay: CAUSE_DECAY,
            initial_probability: INITIAL_CAUSE_PROBABILITY,
        }
    }
}

pub struct CauseCorrelator {
    config: CorrelatorConfig,
    correlations: RwLock<HashMap<String, Correlation>>,
}

impl CauseCorrelator {
    pub fn new(config: CorrelatorConfig) -> Self {
        Self {
            config,
            correlations: RwLock::new(HashMap::new()),
        }
    }

    /// Record confirmed feedback for a symptom signature
    pub fn feedback(
        &self,
        symptom: &AxisVector,
        description: &str,
        cause: &str,
        resolution: Option<&str>,
        now: i64,
    ) -> Correlation {
        let id = symptom.signature_id();
        let mut correlations = self.correlations.write();

        let correlation = correlations.entry(id.clone()).or_insert_with(|| {
            log::debug!("New correlation {} for cause '{}'", id, cause);
            Correlation {
                id,
                signature: *symptom,
                description: description.to_string(),
                causes: Vec::new(),
                resolutions: Vec::new(),
                times_seen: 0,
                last_updated: now,
            }
        });

        correlation.times_seen += 1;
        correlation.last_updated = now;

        let mut found = false;
        for link in correlation.causes.iter_mut() {
            if link.name == cause {
                link.probability += (1.0 - link.probability) * self.config.reinforcement;
                found = true;
            } else {
                link.probability *= self.config.decay;
            }
        }
        if !found {
            correlation.causes.push(CauseLink {
                name: cause.to_string(),
                probability: self.config.initial_probability,
            });
        }

        correlation.causes.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        if let Some(resolution) = resolution {
            if !correlation.resolutions.iter().any(|r| r == resolution) {
                correlation.resolutions.push(resolution.to_string());
            }
        }

        correlation.clone()
    }

    /// Ranked causes for a symptom vector.
    ///
    /// probability = (1 - distance / radius) * stored probability, floored,
    /// deduplicated by cause name (best entry wins), capped to the top N.
    /// Identical state and query always produce identical ordered output.
    pub fn diagnose(&self, symptom: &AxisVector) -> Vec<Diagnosis> {
        let correlations = self.correlations.read();

        let mut candidates: Vec<(Diagnosis, String)> = Vec::new();
        for correlation in correlations.values() {
            let distance = symptom.distance(&correlation.signature);
            if distance > self.config.match_radius {
                continue;
            }
            let closeness = 1.0 - distance / self.config.match_radius;
            for link in &correlation.causes {
                let probability = closeness * link.probability;
                if probability < self.config.probability_floor {
                    continue;
                }
                candidates.push((
                    Diagnosis {
                        cause: link.name.clone(),
                        probability,
                        resolutions: correlation.resolutions.clone(),
                    },
                    correlation.id.clone(),
                ));
            }
        }

        candidates.sort_by(|(a, aid), (b, bid)| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cause.cmp(&b.cause))
                .then_with(|| aid.cmp(bid))
        });

        let mut out: Vec<Diagnosis> = Vec::new();
        for (diagnosis, _) in candidates {
            if out.iter().any(|d| d.cause == diagnosis.cause) {
                continue;
            }
            out.push(diagnosis);
            if out.len() >= self.config.max_results {
                break;
            }
        }
        out
    }

    pub fn count(&self) -> usize {
        self.correlations.read().len()
    }

    pub fn snapshot_all(&self) -> HashMap<String, Correlation> {
        self.correlations.read().clone()
    }

    /// Replace in-memory correlations with restored state (startup only)
    pub fn restore(&self, correlations: HashMap<String, Correlation>) {
        *self.correlations.write() = correlations;
    }
}
