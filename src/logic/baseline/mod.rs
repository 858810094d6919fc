//! Baseline Module - Per-Entity Behavioral Learning
//!
//! Maintains one `EntityBaseline` per monitored entity with Welford-style
//! incremental mean/variance, a seasonal hour-of-day average, and a bounded
//! observation history ring.
//!
//! # Concurrency
//! Observations for different entities update independently; observations
//! for the same entity serialize on that entity's mutex. The incremental
//! update is not commutative, so the per-entity single-writer ordering is
//! load-bearing, not an optimization.

pub mod types;
#[cfg(test)]
mod tests;

use chrono::{DateTime, Timelike, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::logic::axes::layout::AXIS_COUNT;
use crate::logic::axes::vector::AxisVector;

pub use types::{EntityBaseline, ObservationRecord, SeasonalSlot};

struct EntityState {
    baseline: EntityBaseline,
    history: VecDeque<ObservationRecord>,
}

pub struct BaselineLearner {
    history_cap: usize,
    entities: RwLock<HashMap<String, Arc<Mutex<EntityState>>>>,
}

impl BaselineLearner {
    pub fn new(history_cap: usize) -> Self {
        Self {
            history_cap: history_cap.max(1),
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Fold one observation into the entity's baseline, creating it on
    /// first contact. Returns a snapshot of the updated baseline.
    pub fn update(
        &self,
        entity: &str,
        vector: &AxisVector,
        timestamp: DateTime<Utc>,
    ) -> EntityBaseline {
        let state = self.entity_state(entity, timestamp.timestamp());
        let mut state = state.lock();

        let now = timestamp.timestamp();
        let baseline = &mut state.baseline;

        baseline.samples += 1;
        let n = baseline.samples as f32;

        for i in 0..AXIS_COUNT {
            let x = vector.get(i);
            // Welford: stable for unboundedly long streams.
            let delta = x - baseline.mean[i];
            baseline.mean[i] += delta / n;
            let delta2 = x - baseline.mean[i];
            baseline.variance[i] = (((n - 1.0) * baseline.variance[i]) + delta * delta2) / n;
            baseline.variance[i] = baseline.variance[i].max(0.0);
            baseline.mean[i] = baseline.mean[i].clamp(0.0, 1.0);
        }

        baseline.last_updated = now;

        let hour = timestamp.hour() as u8;
        let slot = baseline.seasonal.entry(hour).or_default();
        slot.samples += 1;
        let m = slot.samples as f32;
        for i in 0..AXIS_COUNT {
            slot.mean[i] += (vector.get(i) - slot.mean[i]) / m;
        }

        let snapshot = baseline.clone();

        state.history.push_back(ObservationRecord {
            timestamp: now,
            values: vector.values,
        });
        while state.history.len() > self.history_cap {
            state.history.pop_front();
        }

        snapshot
    }

    pub fn get(&self, entity: &str) -> Option<EntityBaseline> {
        let entities = self.entities.read();
        entities.get(entity).map(|s| s.lock().baseline.clone())
    }

    /// Trailing observations, oldest first, at most `limit`
    pub fn history(&self, entity: &str, limit: usize) -> Vec<ObservationRecord> {
        let entities = self.entities.read();
        match entities.get(entity) {
            Some(state) => {
                let state = state.lock();
                let skip = state.history.len().saturating_sub(limit);
                state.history.iter().skip(skip).copied().collect()
            }
            None => Vec::new(),
        }
    }

    /// Explicit reset: statistics and history are dropped, identity stays
    pub fn reset(&self, entity: &str) -> bool {
        let entities = self.entities.read();
        match entities.get(entity) {
            Some(state) => {
                let mut state = state.lock();
                let now = Utc::now().timestamp();
                state.baseline.reset_stats(now);
                state.history.clear();
                log::info!("Baseline for '{}' reset", entity);
                true
            }
            None => false,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.read().len()
    }

    pub fn snapshot_all(&self) -> HashMap<String, EntityBaseline> {
        let entities = self.entities.read();
        entities
            .iter()
            .map(|(k, v)| (k.clone(), v.lock().baseline.clone()))
            .collect()
    }

    /// Replace in-memory baselines with restored state (startup only)
    pub fn restore(&self, baselines: HashMap<String, EntityBaseline>) {
        let mut entities = self.entities.write();
        entities.clear();
        for (entity, baseline) in baselines {
            entities.insert(
                entity,
                Arc::new(Mutex::new(EntityState {
                    baseline,
                    history: VecDeque::new(),
                })),
            );
        }
    }

    fn entity_state(&self, entity: &str, now: i64) -> Arc<Mutex<EntityState>> {
        {
            let entities = self.entities.read();
            if let Some(state) = entities.get(entity) {
                return Arc::clone(state);
            }
        }

        let mut entities = self.entities.write();
        Arc::clone(entities.entry(entity.to_string()).or_insert_with(|| {
            log::debug!("Creating baseline for new entity '{}'", entity);
            Arc::new(Mutex::new(EntityState {
                baseline: EntityBaseline::new(entity, now),
                history: VecDeque::new(),
            }))
        }))
    }
}
