//! Central Configuration Constants
//!
//! Single source of truth for all tunable defaults. Components take these
//! through their config structs; nothing reads them ad hoc at call sites.
//! The `get_*` helpers consult `NETSENSE_*` environment variables and fall
//! back to the defaults below.
//!
//! The resonance coupling matrix, the zero-variance z-score substitution
//! and the reference state are empirically chosen values carried for
//! compatibility; they are configuration, not derived quantities.

use crate::logic::axes::layout::AXIS_COUNT;

/// App name
pub const APP_NAME: &str = "NetSense";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Observation history
// ============================================

/// Per-entity observation ring buffer cap
pub const DEFAULT_HISTORY_CAP: usize = 1000;

/// Window of trailing observations used for trend hints and forecasting
pub const DEFAULT_TREND_WINDOW: usize = 10;

/// Step distance above which a single observation counts as "sudden"
pub const SUDDEN_STEP_DISTANCE: f32 = 0.3;

// ============================================
// Pattern memory
// ============================================

/// Recognition radius for matching a vector to a stored pattern
pub const DEFAULT_RECOGNITION_THRESHOLD: f32 = 0.2;

/// Confidence assigned to a freshly learned pattern
pub const INITIAL_PATTERN_CONFIDENCE: f32 = 0.5;

/// Confidence gained per repeated match, capped at 1.0
pub const PATTERN_CONFIDENCE_STEP: f32 = 0.1;

/// Axis spread (max - min) above which a new signature reads as an anomaly
pub const ANOMALY_SPREAD_THRESHOLD: f32 = 0.5;

// ============================================
// Anomaly detection
// ============================================

/// Minimum per-axis z-score before anything is reported
pub const ANOMALY_TRIGGER_Z: f32 = 2.0;

/// Substitution factor for zero-variance baselines: z = |delta| * scale
pub const ZERO_STD_SCALE: f32 = 10.0;

/// Floor for the stddev denominator when variance is tiny but non-zero
pub const STD_EPSILON: f32 = 1e-4;

// ============================================
// Root-cause correlation
// ============================================

/// Maximum symptom distance for a correlation to join a diagnosis
pub const DIAGNOSIS_RADIUS: f32 = 0.3;

/// Diagnoses below this probability are dropped
pub const PROBABILITY_FLOOR: f32 = 0.2;

/// Diagnosis result cap
pub const MAX_DIAGNOSES: usize = 5;

/// Matched cause update: p += (1 - p) * reinforcement
pub const CAUSE_REINFORCEMENT: f32 = 0.1;

/// Non-matched cause update: p *= decay
pub const CAUSE_DECAY: f32 = 0.95;

/// Probability assigned to a cause on first feedback
pub const INITIAL_CAUSE_PROBABILITY: f32 = 0.5;

// ============================================
// Drift analysis
// ============================================

/// Per-axis |delta| that counts as an affected axis
pub const AXIS_CHANGE_THRESHOLD: f32 = 0.1;

/// Harmony drop that classifies as harmony degradation
pub const HARMONY_DROP_THRESHOLD: f32 = 0.2;

// ============================================
// Resonance simulation
// ============================================

/// Fixed RK4 step size
pub const SIM_DT: f32 = 0.1;

/// Pull strength toward the reference equilibrium
pub const SIM_PULL_STRENGTH: f32 = 0.3;

/// Fraction of each axis span, below the upper bound, where the soft wall acts
pub const SIM_WALL_MARGIN: f32 = 0.2;

/// Soft wall repulsion strength
pub const SIM_WALL_STRENGTH: f32 = 0.5;

/// Reference equilibrium state, shared with pattern classification
pub const REFERENCE_STATE: [f32; AXIS_COUNT] = [0.75, 0.55, 0.70, 0.50];

/// Axis coupling matrix, row i = d(axis_i)/dt contributions
pub const COUPLING_MATRIX: [[f32; AXIS_COUNT]; AXIS_COUNT] = [
    [0.00, 0.04, -0.03, 0.02],
    [-0.03, 0.00, 0.02, -0.02],
    [0.03, -0.04, 0.00, 0.03],
    [0.02, 0.02, -0.03, 0.00],
];

/// Harmony deltas below this are treated as numerical noise when
/// classifying oscillation
pub const HARMONY_NOISE_FLOOR: f32 = 1e-6;

/// Fraction of delta sign alternations that classifies as oscillating
pub const OSCILLATION_RATE: f32 = 0.3;

/// Harmony shift between the first and last third that classifies
/// convergence or divergence
pub const TRAJECTORY_SHIFT_THRESHOLD: f32 = 0.1;

// ============================================
// Embedding cache
// ============================================

/// Embedding cache entry cap
pub const DEFAULT_EMBED_CACHE_CAPACITY: usize = 4096;

/// Embedding cache entry time-to-live (seconds)
pub const DEFAULT_EMBED_CACHE_TTL_SECS: u64 = 3600;

// ============================================
// Persistence
// ============================================

/// State file name under the data directory
pub const STORE_FILE_NAME: &str = "state_v1.json";

/// Data directory name
pub const STORE_DIR_NAME: &str = "netsense";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the per-entity history cap from environment or use default
pub fn get_history_cap() -> usize {
    std::env::var("NETSENSE_HISTORY_CAP")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_HISTORY_CAP)
}

/// Get the embedding cache capacity from environment or use default
pub fn get_embed_cache_capacity() -> usize {
    std::env::var("NETSENSE_EMBED_CACHE_CAPACITY")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_EMBED_CACHE_CAPACITY)
}

/// Get the embedding cache TTL (seconds) from environment or use default
pub fn get_embed_cache_ttl_secs() -> u64 {
    std::env::var("NETSENSE_EMBED_CACHE_TTL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_EMBED_CACHE_TTL_SECS)
}

/// Get the state store directory from environment or use the platform default
pub fn get_store_dir() -> std::path::PathBuf {
    std::env::var("NETSENSE_STORE_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(STORE_DIR_NAME)
        })
}
