//! Resonance Simulator - Coupled Dynamics Projection
//!
//! Integrates the axis state under a fixed nonlinear system with classic
//! 4th-order Runge-Kutta. The coupling strength scales with the current
//! harmony, so near-anchor states couple more strongly than distant ones;
//! that state-dependence is the point of the model and must not be
//! linearized away. No side effects, no shared state: simulations are
//! freely parallel across requests.

pub mod types;

use crate::constants::{HARMONY_NOISE_FLOOR, OSCILLATION_RATE, TRAJECTORY_SHIFT_THRESHOLD};
use crate::logic::axes::layout::{axis_name, AXIS_COUNT};
use crate::logic::axes::vector::{dominant_of, harmony_of, AxisVector};

pub use types::{AxisBounds, CyclePoint, ResonanceConfig, Trajectory, TrajectoryClass};

pub struct ResonanceSimulator {
    config: ResonanceConfig,
}

impl ResonanceSimulator {
    pub fn new(config: ResonanceConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ResonanceConfig::default())
    }

    /// Project `seed` forward `cycles` steps inside `bounds`
    pub fn simulate(&self, seed: &AxisVector, cycles: u32, bounds: &AxisBounds) -> Trajectory {
        let mut state = seed.values;
        let mut points = Vec::with_capacity(cycles as usize);
        let mut dominant_counts = [0u32; AXIS_COUNT];
        let mut harmony_sum = 0.0f32;

        for cycle in 0..cycles {
            state = self.rk4_step(&state, bounds);

            // Post-integration safety clip; the soft wall does the real
            // containment.
            for i in 0..AXIS_COUNT {
                state[i] = state[i].clamp(bounds.lower[i], bounds.upper[i]);
            }

            let harmony = harmony_of(&state);
            let dominant = dominant_of(&state);
            dominant_counts[dominant] += 1;
            harmony_sum += harmony;

            points.push(CyclePoint {
                cycle,
                state,
                harmony,
                dominant_axis: axis_name(dominant).unwrap_or("?").to_string(),
            });
        }

        let mean_harmony = if points.is_empty() {
            seed.harmony()
        } else {
            harmony_sum / points.len() as f32
        };

        Trajectory {
            seed: *seed,
            cycles,
            final_state: state,
            final_harmony: harmony_of(&state),
            mean_harmony,
            dominant_counts,
            classification: classify(&points),
            points,
        }
    }

    fn rk4_step(&self, state: &[f32; AXIS_COUNT], bounds: &AxisBounds) -> [f32; AXIS_COUNT] {
        let dt = self.config.dt;

        let k1 = self.derivative(state, bounds);
        let k2 = self.derivative(&offset(state, &k1, dt / 2.0), bounds);
        let k3 = self.derivative(&offset(state, &k2, dt / 2.0), bounds);
        let k4 = self.derivative(&offset(state, &k3, dt), bounds);

        let mut next = *state;
        for i in 0..AXIS_COUNT {
            next[i] += dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
        next
    }

    fn derivative(&self, state: &[f32; AXIS_COUNT], bounds: &AxisBounds) -> [f32; AXIS_COUNT] {
        // Harmonious states couple more strongly.
        let coupling_gain = harmony_of(state);

        let mut deriv = [0.0f32; AXIS_COUNT];
        for i in 0..AXIS_COUNT {
            let mut coupled = 0.0f32;
            for j in 0..AXIS_COUNT {
                coupled += self.config.coupling[i][j] * state[j];
            }

            let pull = self.config.pull_strength * (self.config.equilibrium[i] - state[i]);

            deriv[i] = coupling_gain * coupled + pull + self.wall_term(i, state[i], bounds);
        }
        deriv
    }

    /// Soft repulsion inside the top `wall_margin` fraction of the axis
    /// span. A reflecting-wall approximation, not a clamp.
    fn wall_term(&self, axis: usize, value: f32, bounds: &AxisBounds) -> f32 {
        let span = bounds.span(axis);
        if span <= 0.0 {
            return 0.0;
        }
        let zone = self.config.wall_margin * span;
        let threshold = bounds.upper[axis] - zone;
        if value <= threshold || zone <= 0.0 {
            return 0.0;
        }
        let depth = ((value - threshold) / zone).min(1.0);
        -self.config.wall_strength * depth * depth
    }
}

fn offset(
    state: &[f32; AXIS_COUNT],
    k: &[f32; AXIS_COUNT],
    factor: f32,
) -> [f32; AXIS_COUNT] {
    let mut out = *state;
    for i in 0..AXIS_COUNT {
        out[i] += k[i] * factor;
    }
    out
}

/// First-third vs last-third mean harmony, then delta sign alternation
fn classify(points: &[CyclePoint]) -> TrajectoryClass {
    if points.len() < 3 {
        return TrajectoryClass::Stable;
    }

    let third = points.len() / 3;
    let early: f32 = points[..third].iter().map(|p| p.harmony).sum::<f32>() / third as f32;
    let late: f32 =
        points[points.len() - third..].iter().map(|p| p.harmony).sum::<f32>() / third as f32;

    let shift = late - early;
    if shift > TRAJECTORY_SHIFT_THRESHOLD {
        return TrajectoryClass::Converging;
    }
    if shift < -TRAJECTORY_SHIFT_THRESHOLD {
        return TrajectoryClass::Diverging;
    }

    let deltas: Vec<f32> = points
        .windows(2)
        .map(|w| w[1].harmony - w[0].harmony)
        .collect();

    let mut alternations = 0usize;
    let mut comparisons = 0usize;
    for pair in deltas.windows(2) {
        // Deltas below the noise floor carry no direction.
        if pair[0].abs() <= HARMONY_NOISE_FLOOR || pair[1].abs() <= HARMONY_NOISE_FLOOR {
            continue;
        }
        comparisons += 1;
        if pair[0] * pair[1] < 0.0 {
            alternations += 1;
        }
    }

    if comparisons > 0 && alternations as f32 / deltas.len() as f32 > OSCILLATION_RATE {
        return TrajectoryClass::Oscillating;
    }

    TrajectoryClass::Stable
}
