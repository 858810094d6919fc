//! Forecast - Trajectory Projection from Observation History
//!
//! Linear finite-difference projection over the entity's trailing window.
//! Derived output only; callers may cache it but nothing here is stored.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::logic::axes::layout::{axis_name, AXIS_COUNT};
use crate::logic::axes::vector::AxisVector;
use crate::logic::baseline::ObservationRecord;

/// Harmony slope (per projected step) that separates stable from moving
const TREND_EPSILON: f32 = 0.05;

/// Projected per-axis fall that registers as a risk factor
const RISK_DROP: f32 = 0.2;

/// Axis level below which a projected state reads as close to floor
const RISK_FLOOR: f32 = 0.1;

/// Cap on how many intervals ahead a projection will extrapolate
const MAX_PROJECTED_STEPS: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendClass {
    Stable,
    Improving,
    Degrading,
}

impl TrendClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendClass::Stable => "stable",
            TrendClass::Improving => "improving",
            TrendClass::Degrading => "degrading",
        }
    }
}

/// Projected state for one entity at a given horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub entity: String,
    pub predicted: AxisVector,
    pub confidence: f32,
    pub trend: TrendClass,
    pub horizon_secs: u64,
    pub risk_factors: Vec<String>,
}

/// Project the trailing window forward by `horizon_secs`.
///
/// Needs at least three observations; returns `None` below that.
pub fn project(entity: &str, history: &[ObservationRecord], horizon_secs: u64) -> Option<Prediction> {
    if history.len() < 3 {
        return None;
    }

    let first = &history[0];
    let last = &history[history.len() - 1];
    let spans = (history.len() - 1) as f32;

    let elapsed = (last.timestamp - first.timestamp).max(1) as f32;
    let avg_interval = elapsed / spans;
    let steps = (horizon_secs as f32 / avg_interval).clamp(1.0, MAX_PROJECTED_STEPS);

    // Mean finite difference per interval, per axis.
    let mut slope = [0.0f32; AXIS_COUNT];
    for i in 0..AXIS_COUNT {
        slope[i] = (last.values[i] - first.values[i]) / spans;
    }

    let mut predicted = [0.0f32; AXIS_COUNT];
    for i in 0..AXIS_COUNT {
        predicted[i] = (last.values[i] + slope[i] * steps).clamp(0.0, 1.0);
    }
    let predicted = AxisVector::from_values(predicted);

    let harmony_slope =
        (last.vector().harmony() - first.vector().harmony()) / spans;
    let projected_shift = harmony_slope * steps;
    let trend = if projected_shift > TREND_EPSILON {
        TrendClass::Improving
    } else if projected_shift < -TREND_EPSILON {
        TrendClass::Degrading
    } else {
        TrendClass::Stable
    };

    let mut risk_factors = Vec::new();
    for i in 0..AXIS_COUNT {
        let axis = axis_name(i).unwrap_or("?");
        if slope[i] * steps < -RISK_DROP {
            risk_factors.push(format!("{} trending down", axis));
        }
        if predicted.get(i) < RISK_FLOOR && last.values[i] >= RISK_FLOOR {
            risk_factors.push(format!("{} projected near floor", axis));
        }
    }

    Some(Prediction {
        entity: entity.to_string(),
        predicted,
        confidence: confidence_for(history, &slope, steps),
        trend,
        horizon_secs,
        risk_factors,
    })
}

/// Confidence from sample depth, trend consistency, and how far out the
/// projection reaches
fn confidence_for(history: &[ObservationRecord], slope: &[f32; AXIS_COUNT], steps: f32) -> f32 {
    // Fraction of consecutive steps that agree with the overall direction.
    let mut agree = 0usize;
    let mut total = 0usize;
    for window in history.windows(2) {
        for i in 0..AXIS_COUNT {
            if slope[i].abs() < f32::EPSILON {
                continue;
            }
            total += 1;
            let d = window[1].values[i] - window[0].values[i];
            if d * slope[i] >= 0.0 {
                agree += 1;
            }
        }
    }
    let consistency = if total == 0 {
        1.0
    } else {
        agree as f32 / total as f32
    };

    let depth = (history.len() as f32 / 10.0).min(1.0);
    let reach_penalty = 1.0 / (1.0 + steps / 20.0);

    (0.2 + 0.5 * consistency + 0.3 * depth) * reach_penalty
}
