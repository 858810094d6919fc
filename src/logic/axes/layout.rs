//! Axis Layout - Centralized Axis Definition
//!
//! The four semantic axes are the schema of every vector in the system.
//!
//! ## Rules (NEVER break these):
//! 1. Add axis -> increment AXIS_VERSION
//! 2. Change order -> increment AXIS_VERSION
//! 3. Rename axis -> increment AXIS_VERSION
//!
//! Persisted baselines, patterns and correlations embed the version and
//! layout hash; load refuses anything that does not match.

use crc32fast::Hasher;

/// Current axis layout version
pub const AXIS_VERSION: u8 = 1;

/// Axis names in exact vector order. SINGLE SOURCE OF TRUTH.
pub const AXIS_LAYOUT: &[&str] = &[
    "connectivity", // 0: reachability and path health
    "policy",       // 1: filtering and enforcement posture
    "capacity",     // 2: throughput and performance headroom
    "visibility",   // 3: exposure and observability of the target
];

/// Number of axes
/// IMPORTANT: Must match AXIS_LAYOUT.len()!
pub const AXIS_COUNT: usize = 4;

/// Compute CRC32 hash of the axis layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[AXIS_VERSION]);

    for name in AXIS_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash (inputs are const, so this is stable across calls)
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

/// Error when an axis layout does not match the current one
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Axis layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches the current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != AXIS_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: AXIS_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Get axis index by name
pub fn axis_index(name: &str) -> Option<usize> {
    AXIS_LAYOUT.iter().position(|&n| n == name)
}

/// Get axis name by index
pub fn axis_name(index: usize) -> Option<&'static str> {
    AXIS_LAYOUT.get(index).copied()
}
