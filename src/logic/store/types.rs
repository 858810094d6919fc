use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::logic::axes::layout::{layout_hash, AXIS_VERSION};
use crate::logic::baseline::EntityBaseline;
use crate::logic::correlator::Correlation;
use crate::logic::patterns::Pattern;

/// Current on-disk schema version
pub const STORE_SCHEMA_VERSION: u32 = 1;

/// Everything durable, as one atomic unit: baselines keyed by entity,
/// patterns and correlations keyed by signature id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    pub schema_version: u32,
    pub axis_version: u8,
    pub layout_hash: u32,
    pub saved_at: i64,

    pub baselines: HashMap<String, EntityBaseline>,
    pub patterns: HashMap<String, Pattern>,
    pub correlations: HashMap<String, Correlation>,
}

impl PersistedState {
    pub fn new(
        baselines: HashMap<String, EntityBaseline>,
        patterns: HashMap<String, Pattern>,
        correlations: HashMap<String, Correlation>,
        saved_at: i64,
    ) -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION,
            axis_version: AXIS_VERSION,
            layout_hash: layout_hash(),
            saved_at,
            baselines,
            patterns,
            correlations,
        }
    }

    /// Fail closed on any unknown schema or axis layout
    pub fn validate(&self) -> CoreResult<()> {
        if self.schema_version != STORE_SCHEMA_VERSION
            || self.axis_version != AXIS_VERSION
            || self.layout_hash != layout_hash()
        {
            return Err(CoreError::SchemaMismatch {
                expected: STORE_SCHEMA_VERSION,
                actual: self.schema_version,
                expected_hash: layout_hash(),
                actual_hash: self.layout_hash,
            });
        }
        Ok(())
    }
}
