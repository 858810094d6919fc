//! Core Facade - Inbound Interface
//!
//! `MonitorCore` wires the engines together and owns the only mutable
//! state in the crate. Collaborators feed observations and feedback in and
//! query detections, diagnoses, drift, forecasts and simulations out.
//!
//! Durability is write-behind: every mutating call persists best-effort,
//! and a failed save flips the core into a degraded (non-durable) mode
//! that retries on the next mutation instead of failing the caller.

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::constants;
use crate::error::{CoreError, CoreResult};
use crate::logic::anomaly::{AnomalyConfig, AnomalyDetector, AnomalyReport};
use crate::logic::axes::layout::AXIS_COUNT;
use crate::logic::axes::{AxisMapper, AxisVector, EmbedCache};
use crate::logic::baseline::{BaselineLearner, EntityBaseline};
use crate::logic::correlator::{CauseCorrelator, CorrelatorConfig, Diagnosis};
use crate::logic::drift::{self, DriftReport, PolicyPosture, ProfileSnapshot};
use crate::logic::forecast::{self, Prediction};
use crate::logic::patterns::{Pattern, PatternMemory};
use crate::logic::resonance::{AxisBounds, ResonanceConfig, ResonanceSimulator, Trajectory};
use crate::logic::store::{PersistedState, StateStore, STORE_SCHEMA_VERSION};

/// Harmony shift below which a step carries no up/down trend hint
const TREND_HINT_EPSILON: f32 = 0.02;

/// Everything tunable on the core, seeded from `constants`
pub struct CoreConfig {
    pub history_cap: usize,
    pub recognition_threshold: f32,
    pub embed_cache_capacity: usize,
    pub embed_cache_ttl: Duration,
    pub store_path: PathBuf,
    pub anomaly: AnomalyConfig,
    pub correlator: CorrelatorConfig,
    pub resonance: ResonanceConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            history_cap: constants::get_history_cap(),
            recognition_threshold: constants::DEFAULT_RECOGNITION_THRESHOLD,
            embed_cache_capacity: constants::get_embed_cache_capacity(),
            embed_cache_ttl: Duration::from_secs(constants::get_embed_cache_ttl_secs()),
            store_path: constants::get_store_dir().join(constants::STORE_FILE_NAME),
            anomaly: AnomalyConfig::default(),
            correlator: CorrelatorConfig::default(),
            resonance: ResonanceConfig::default(),
        }
    }
}

/// Result of one accepted observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationOutcome {
    pub entity: String,
    pub vector: AxisVector,
    /// Lexicon hits when the observation came in as text
    pub matched: Option<u32>,
    pub pattern: Pattern,
    pub baseline_samples: u64,
}

/// Aggregate health summary for reporting collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreStatus {
    pub entities: usize,
    pub patterns: usize,
    pub correlations: usize,
    pub anomalies_detected: u64,
    pub durable: bool,
    pub schema_version: u32,
    pub version: String,
}

pub struct MonitorCore {
    mapper: AxisMapper,
    baselines: BaselineLearner,
    patterns: PatternMemory,
    correlator: CauseCorrelator,
    detector: AnomalyDetector,
    simulator: ResonanceSimulator,
    store: StateStore,
    degraded: AtomicBool,
    anomaly_count: AtomicU64,
}

impl MonitorCore {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            mapper: AxisMapper::new(EmbedCache::new(
                config.embed_cache_capacity,
                config.embed_cache_ttl,
            )),
            baselines: BaselineLearner::new(config.history_cap),
            patterns: PatternMemory::new(
                config.recognition_threshold,
                AxisVector::from_values(config.resonance.equilibrium),
            ),
            correlator: CauseCorrelator::new(config.correlator),
            detector: AnomalyDetector::new(config.anomaly),
            simulator: ResonanceSimulator::new(config.resonance),
            store: StateStore::new(config.store_path),
            degraded: AtomicBool::new(false),
            anomaly_count: AtomicU64::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CoreConfig::default())
    }

    /// Restore persisted state. Called once at startup; an incompatible or
    /// corrupt store is logged and the core starts fresh, in-memory state
    /// staying authoritative from then on.
    pub fn load(&self) {
        match self.store.load_all() {
            Ok(Some(state)) => {
                log::info!(
                    "Restored {} baselines, {} patterns, {} correlations (saved at {})",
                    state.baselines.len(),
                    state.patterns.len(),
                    state.correlations.len(),
                    state.saved_at
                );
                self.baselines.restore(state.baselines);
                self.patterns.restore(state.patterns);
                self.correlator.restore(state.correlations);
            }
            Ok(None) => {
                log::info!("No prior state at {}", self.store.path().display());
            }
            Err(e) => {
                log::warn!("State load failed/invalid: {}. Starting fresh.", e);
            }
        }
    }

    /// Ingest one observation for an entity. At least one of `text` and
    /// `values` is required; explicit numeric telemetry wins when both are
    /// present and the text only describes the resulting pattern.
    pub fn observe(
        &self,
        entity: &str,
        text: Option<&str>,
        values: Option<[f32; AXIS_COUNT]>,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<ObservationOutcome> {
        if entity.is_empty() {
            return Err(CoreError::InvalidInput("entity key is empty".to_string()));
        }

        let (vector, matched) = match (values, text) {
            (Some(values), _) => (AxisVector::new(values)?, None),
            (None, Some(text)) => {
                let embedding = self.mapper.embed(text);
                (embedding.vector, Some(embedding.matched))
            }
            (None, None) => {
                return Err(CoreError::InvalidInput(
                    "observe needs text or a numeric vector".to_string(),
                ));
            }
        };

        let trend = self.trend_hint(entity, &vector);
        let baseline = self.baselines.update(entity, &vector, timestamp);

        let mut context = HashMap::new();
        context.insert("entity".to_string(), serde_json::json!(entity));
        if let Some(trend) = trend {
            context.insert("trend".to_string(), serde_json::json!(trend));
        }
        if let Some(matched) = matched {
            context.insert("lexicon_hits".to_string(), serde_json::json!(matched));
        }

        let pattern = self
            .patterns
            .learn(&vector, context, text, timestamp.timestamp());

        self.persist();

        Ok(ObservationOutcome {
            entity: entity.to_string(),
            vector,
            matched,
            pattern,
            baseline_samples: baseline.samples,
        })
    }

    /// Record confirmed root-cause feedback for a symptom vector
    pub fn feedback(
        &self,
        symptom: [f32; AXIS_COUNT],
        description: &str,
        cause: &str,
        resolution: Option<&str>,
    ) -> CoreResult<()> {
        if cause.is_empty() {
            return Err(CoreError::InvalidInput("cause is empty".to_string()));
        }
        let symptom = AxisVector::new(symptom)?;
        self.correlator
            .feedback(&symptom, description, cause, resolution, Utc::now().timestamp());
        self.persist();
        Ok(())
    }

    /// Score a vector against the entity's baseline. No baseline means no
    /// verdict, reported as an explicit absent result.
    pub fn query_anomaly(
        &self,
        entity: &str,
        values: [f32; AXIS_COUNT],
    ) -> CoreResult<Option<AnomalyReport>> {
        let vector = AxisVector::new(values)?;
        let baseline = match self.baselines.get(entity) {
            Some(b) if b.samples > 0 => b,
            _ => return Ok(None),
        };

        let report =
            self.detector
                .detect(&baseline, &vector, &self.correlator, Utc::now().timestamp());
        if report.is_some() {
            self.anomaly_count.fetch_add(1, Ordering::Relaxed);
        }
        Ok(report)
    }

    /// Ranked probable causes for a symptom vector
    pub fn query_diagnosis(&self, values: [f32; AXIS_COUNT]) -> CoreResult<Vec<Diagnosis>> {
        let vector = AxisVector::new(values)?;
        Ok(self.correlator.diagnose(&vector))
    }

    /// Materialize the entity's current profile
    pub fn snapshot(&self, entity: &str) -> Option<ProfileSnapshot> {
        let baseline = self.baselines.get(entity)?;
        if baseline.samples == 0 {
            return None;
        }
        Some(Self::snapshot_of(&baseline))
    }

    /// Compare two materialized snapshots
    pub fn query_drift(&self, old: &ProfileSnapshot, new: &ProfileSnapshot) -> DriftReport {
        drift::compare(old, new)
    }

    /// Compare a past snapshot against the entity's current profile
    pub fn query_drift_from(
        &self,
        entity: &str,
        past: &ProfileSnapshot,
    ) -> CoreResult<DriftReport> {
        let current = self
            .snapshot(entity)
            .ok_or_else(|| CoreError::NotFound(format!("no baseline for '{}'", entity)))?;
        Ok(drift::compare(past, &current))
    }

    /// Project the entity's trailing window forward
    pub fn project(&self, entity: &str, horizon_secs: u64) -> Option<Prediction> {
        let history = self
            .baselines
            .history(entity, constants::DEFAULT_TREND_WINDOW);
        forecast::project(entity, &history, horizon_secs)
    }

    /// Run the coupled-dynamics simulation from a seed vector
    pub fn simulate(
        &self,
        seed: [f32; AXIS_COUNT],
        cycles: u32,
        bounds: Option<AxisBounds>,
    ) -> CoreResult<Trajectory> {
        let seed = AxisVector::new(seed)?;
        let bounds = bounds.unwrap_or_default();
        for i in 0..AXIS_COUNT {
            if bounds.upper[i] <= bounds.lower[i] {
                return Err(CoreError::InvalidInput(format!(
                    "bounds for axis {} are empty",
                    i
                )));
            }
        }
        Ok(self.simulator.simulate(&seed, cycles, &bounds))
    }

    /// Explicit baseline reset for one entity
    pub fn reset_entity(&self, entity: &str) -> bool {
        let reset = self.baselines.reset(entity);
        if reset {
            self.persist();
        }
        reset
    }

    pub fn status(&self) -> CoreStatus {
        CoreStatus {
            entities: self.baselines.entity_count(),
            patterns: self.patterns.count(),
            correlations: self.correlator.count(),
            anomalies_detected: self.anomaly_count.load(Ordering::Relaxed),
            durable: !self.degraded.load(Ordering::Relaxed),
            schema_version: STORE_SCHEMA_VERSION,
            version: constants::APP_VERSION.to_string(),
        }
    }

    fn snapshot_of(baseline: &EntityBaseline) -> ProfileSnapshot {
        let vector = baseline.mean_vector();
        ProfileSnapshot {
            entity: baseline.entity.clone(),
            taken_at: baseline.last_updated,
            dominant_axis: vector.dominant_axis_name().to_string(),
            archetype: Self::archetype_of(&vector).to_string(),
            posture: PolicyPosture::from_level(vector.get(1)),
            samples: baseline.samples,
            harmony: vector.harmony(),
            vector,
        }
    }

    /// Coarse structural tag for drift classification
    fn archetype_of(vector: &AxisVector) -> &'static str {
        if vector.is_zero() {
            return "dormant";
        }
        if vector.harmony() >= 0.8 {
            return "balanced";
        }
        match vector.dominant_axis() {
            0 => "conduit",
            1 => "bastion",
            2 => "workhorse",
            _ => "beacon",
        }
    }

    /// Direction hint for pattern classification, from the last recorded
    /// step to the incoming vector
    fn trend_hint(&self, entity: &str, vector: &AxisVector) -> Option<&'static str> {
        let last = self.baselines.history(entity, 1).pop()?;
        let last = last.vector();

        if last.distance(vector) > constants::SUDDEN_STEP_DISTANCE {
            return Some("sudden");
        }
        let shift = vector.harmony() - last.harmony();
        if shift > TREND_HINT_EPSILON {
            Some("up")
        } else if shift < -TREND_HINT_EPSILON {
            Some("down")
        } else {
            None
        }
    }

    /// Write-behind persistence with retry-on-next-mutation
    fn persist(&self) {
        let state = PersistedState::new(
            self.baselines.snapshot_all(),
            self.patterns.snapshot_all(),
            self.correlator.snapshot_all(),
            Utc::now().timestamp(),
        );

        match self.store.save_all(&state) {
            Ok(()) => {
                if self.degraded.swap(false, Ordering::Relaxed) {
                    log::info!("Persistence recovered; state is durable again");
                }
            }
            Err(e) => {
                if !self.degraded.swap(true, Ordering::Relaxed) {
                    log::error!(
                        "Persistence failed ({}); continuing in non-durable mode",
                        e
                    );
                }
            }
        }
    }
}
