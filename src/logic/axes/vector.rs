//! Semantic Axis Vector
//!
//! Immutable 4-component vector, each component in `[0, 1]`. Everything the
//! rest of the engine measures (distance, harmony, dominance, signature ids)
//! lives here so the geometry is defined in exactly one place.

use serde::{Deserialize, Serialize};

use super::layout::{axis_name, AXIS_COUNT};
use crate::error::{CoreError, CoreResult};

/// The anchor state used for harmony scoring
pub const ANCHOR: [f32; AXIS_COUNT] = [1.0; AXIS_COUNT];

/// Similarity classification thresholds on Euclidean distance
const VERY_SIMILAR: f32 = 0.2;
const SIMILAR: f32 = 0.5;
const DIFFERENT: f32 = 1.0;

/// Harmony of a raw state: 1 - distance-to-anchor / 2.
///
/// Defined on raw arrays because the simulator evaluates it on intermediate
/// RK4 states that are not constrained to `[0, 1]`.
pub fn harmony_of(values: &[f32; AXIS_COUNT]) -> f32 {
    let mut sum = 0.0f32;
    for i in 0..AXIS_COUNT {
        let d = values[i] - ANCHOR[i];
        sum += d * d;
    }
    1.0 - sum.sqrt() / 2.0
}

/// Dominant axis of a raw state (highest component, first on ties)
pub fn dominant_of(values: &[f32; AXIS_COUNT]) -> usize {
    let mut best = 0;
    for i in 1..AXIS_COUNT {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisVector {
    pub values: [f32; AXIS_COUNT],
}

impl AxisVector {
    /// Build from raw components, rejecting anything outside `[0, 1]`
    pub fn new(values: [f32; AXIS_COUNT]) -> CoreResult<Self> {
        for (i, v) in values.iter().enumerate() {
            if !v.is_finite() || *v < 0.0 || *v > 1.0 {
                return Err(CoreError::InvalidInput(format!(
                    "axis component {} out of range [0,1]: {}",
                    axis_name(i).unwrap_or("?"),
                    v
                )));
            }
        }
        Ok(Self { values })
    }

    /// Internal constructor for values already known to be in range
    pub(crate) fn from_values(values: [f32; AXIS_COUNT]) -> Self {
        Self { values }
    }

    pub fn zero() -> Self {
        Self {
            values: [0.0; AXIS_COUNT],
        }
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Euclidean distance, range `[0, 2]` for in-domain vectors
    pub fn distance(&self, other: &AxisVector) -> f32 {
        let mut sum = 0.0f32;
        for i in 0..AXIS_COUNT {
            let d = self.values[i] - other.values[i];
            sum += d * d;
        }
        sum.sqrt()
    }

    pub fn similarity(&self, other: &AxisVector) -> SimilarityClass {
        SimilarityClass::from_distance(self.distance(other))
    }

    /// 1 - distance-to-anchor / 2
    pub fn harmony(&self) -> f32 {
        harmony_of(&self.values)
    }

    /// Index of the highest component (first on ties)
    pub fn dominant_axis(&self) -> usize {
        dominant_of(&self.values)
    }

    pub fn dominant_axis_name(&self) -> &'static str {
        axis_name(self.dominant_axis()).unwrap_or("?")
    }

    /// max component - min component
    pub fn spread(&self) -> f32 {
        let mut min = self.values[0];
        let mut max = self.values[0];
        for v in &self.values[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }
        max - min
    }

    /// Components rounded to one decimal place
    pub fn quantize(&self) -> [f32; AXIS_COUNT] {
        let mut q = [0.0f32; AXIS_COUNT];
        for i in 0..AXIS_COUNT {
            q[i] = (self.values[i] * 10.0).round() / 10.0;
        }
        q
    }

    /// Deterministic id of the quantized vector. Vectors that quantize to
    /// the same components always share an id.
    pub fn signature_id(&self) -> String {
        let q = self.quantize();
        let mut hasher = crc32fast::Hasher::new();
        for v in &q {
            hasher.update(format!("{:.1}|", v).as_bytes());
        }
        format!("{:08x}", hasher.finalize())
    }
}

impl std::fmt::Display for AxisVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}, {:.2}]",
            self.values[0], self.values[1], self.values[2], self.values[3]
        )
    }
}

/// Distance buckets for comparing two vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityClass {
    VerySimilar,
    Similar,
    Different,
    VeryDifferent,
}

impl SimilarityClass {
    pub fn from_distance(distance: f32) -> Self {
        if distance < VERY_SIMILAR {
            SimilarityClass::VerySimilar
        } else if distance < SIMILAR {
            SimilarityClass::Similar
        } else if distance < DIFFERENT {
            SimilarityClass::Different
        } else {
            SimilarityClass::VeryDifferent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityClass::VerySimilar => "very-similar",
            SimilarityClass::Similar => "similar",
            SimilarityClass::Different => "different",
            SimilarityClass::VeryDifferent => "very-different",
        }
    }
}
