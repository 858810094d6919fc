use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::logic::axes::layout::{layout_hash, AXIS_COUNT, AXIS_VERSION};
use crate::logic::axes::vector::AxisVector;

// ============================================================================
// ENTITY BASELINE
// ============================================================================

/// Learned expected state for one monitored entity.
///
/// Mean and variance are maintained with Welford's single-pass update, so
/// the struct never needs to revisit history and stays O(1) per sample.
/// Invariant: `samples >= 1` implies every variance is non-negative and
/// every mean component lies in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityBaseline {
    pub axis_version: u8,
    pub layout_hash: u32,

    pub id: String,
    pub entity: String,
    pub samples: u64,

    pub mean: [f32; AXIS_COUNT],
    pub variance: [f32; AXIS_COUNT],

    pub created_at: i64,
    pub last_updated: i64,

    /// Running mean per hour-of-day bucket (0..=23)
    #[serde(default)]
    pub seasonal: BTreeMap<u8, SeasonalSlot>,
}

impl EntityBaseline {
    pub fn new(entity: &str, now: i64) -> Self {
        Self {
            axis_version: AXIS_VERSION,
            layout_hash: layout_hash(),
            id: uuid::Uuid::new_v4().to_string(),
            entity: entity.to_string(),
            samples: 0,
            mean: [0.0; AXIS_COUNT],
            variance: [0.0; AXIS_COUNT],
            created_at: now,
            last_updated: now,
            seasonal: BTreeMap::new(),
        }
    }

    /// Reset stats while keeping the entity identity and record id
    pub fn reset_stats(&mut self, now: i64) {
        self.axis_version = AXIS_VERSION;
        self.layout_hash = layout_hash();
        self.samples = 0;
        self.mean = [0.0; AXIS_COUNT];
        self.variance = [0.0; AXIS_COUNT];
        self.seasonal.clear();
        self.last_updated = now;
    }

    pub fn mean_vector(&self) -> AxisVector {
        let mut values = [0.0f32; AXIS_COUNT];
        for i in 0..AXIS_COUNT {
            values[i] = self.mean[i].clamp(0.0, 1.0);
        }
        AxisVector::from_values(values)
    }

    pub fn stddev(&self) -> [f32; AXIS_COUNT] {
        let mut std = [0.0f32; AXIS_COUNT];
        for i in 0..AXIS_COUNT {
            std[i] = self.variance[i].max(0.0).sqrt();
        }
        std
    }
}

/// Running average for one seasonal bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalSlot {
    pub samples: u64,
    pub mean: [f32; AXIS_COUNT],
}

impl SeasonalSlot {
    pub fn new() -> Self {
        Self {
            samples: 0,
            mean: [0.0; AXIS_COUNT],
        }
    }
}

impl Default for SeasonalSlot {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// OBSERVATION HISTORY
// ============================================================================

/// One observed vector, kept in the bounded per-entity ring buffer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub timestamp: i64,
    pub values: [f32; AXIS_COUNT],
}

impl ObservationRecord {
    pub fn vector(&self) -> AxisVector {
        AxisVector::from_values(self.values)
    }
}
