use serde::{Deserialize, Serialize};

use crate::constants::{
    COUPLING_MATRIX, REFERENCE_STATE, SIM_DT, SIM_PULL_STRENGTH, SIM_WALL_MARGIN,
    SIM_WALL_STRENGTH,
};
use crate::logic::axes::layout::AXIS_COUNT;
use crate::logic::axes::vector::AxisVector;

/// Numeric parameters of the coupled dynamics. Empirically tuned values,
/// carried as configuration rather than derived quantities.
#[derive(Debug, Clone, Copy)]
pub struct ResonanceConfig {
    /// Fixed RK4 step size
    pub dt: f32,
    /// Row i = contribution of every axis to d(axis_i)/dt
    pub coupling: [[f32; AXIS_COUNT]; AXIS_COUNT],
    /// Equilibrium the state is pulled toward
    pub equilibrium: [f32; AXIS_COUNT],
    pub pull_strength: f32,
    /// Fraction of each axis span, below the upper bound, where the soft
    /// wall activates
    pub wall_margin: f32,
    pub wall_strength: f32,
}

impl Default for ResonanceConfig {
    fn default() -> Self {
        Self {
            dt: SIM_DT,
            coupling: COUPLING_MATRIX,
            equilibrium: REFERENCE_STATE,
            pull_strength: SIM_PULL_STRENGTH,
            wall_margin: SIM_WALL_MARGIN,
            wall_strength: SIM_WALL_STRENGTH,
        }
    }
}

/// Per-axis integration bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AxisBounds {
    pub lower: [f32; AXIS_COUNT],
    pub upper: [f32; AXIS_COUNT],
}

impl AxisBounds {
    pub fn unit() -> Self {
        Self {
            lower: [0.0; AXIS_COUNT],
            upper: [1.0; AXIS_COUNT],
        }
    }

    pub fn span(&self, axis: usize) -> f32 {
        self.upper[axis] - self.lower[axis]
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self::unit()
    }
}

/// One recorded integration cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyclePoint {
    pub cycle: u32,
    pub state: [f32; AXIS_COUNT],
    pub harmony: f32,
    pub dominant_axis: String,
}

/// Overall shape of a projected trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryClass {
    Converging,
    Diverging,
    Oscillating,
    Stable,
}

impl TrajectoryClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrajectoryClass::Converging => "converging",
            TrajectoryClass::Diverging => "diverging",
            TrajectoryClass::Oscillating => "oscillating",
            TrajectoryClass::Stable => "stable",
        }
    }
}

/// Projected evolution of a seed vector under the coupled dynamics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub seed: AxisVector,
    pub cycles: u32,
    pub points: Vec<CyclePoint>,
    pub final_state: [f32; AXIS_COUNT],
    pub final_harmony: f32,
    pub mean_harmony: f32,
    /// Occurrences of each axis as the per-cycle dominant one
    pub dominant_counts: [u32; AXIS_COUNT],
    pub classification: TrajectoryClass,
}
