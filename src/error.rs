//! Error handling
//!
//! One crate-wide taxonomy. Derived computations (drift, anomaly, forecast,
//! simulation) never fail past input validation; persistence failures leave
//! in-memory state authoritative.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Rejected synchronously, never partially applied.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Explicit absent result for lookups that name a missing entity.
    #[error("not found: {0}")]
    NotFound(String),

    /// Read or write of the state file failed; callers continue in
    /// degraded (non-durable) mode.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Stored state carries an unknown or future schema; load is refused.
    #[error("schema mismatch: expected v{expected} (layout {expected_hash:08x}), got v{actual} (layout {actual_hash:08x})")]
    SchemaMismatch {
        expected: u32,
        actual: u32,
        expected_hash: u32,
        actual_hash: u32,
    },
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Persistence(err.to_string())
    }
}
