//! Persistence Store - Atomic Versioned State File
//!
//! Write-to-temp-then-rename keeps the live file intact through any crash
//! mid-write. Loads validate schema version and axis layout and refuse
//! anything unknown; a missing file is the explicit "no prior state"
//! result, never an empty-but-valid one.
//!
//! Writes are serialized on an internal gate; persistence deliberately lags
//! in-memory state ("eventually durable").

pub mod types;
#[cfg(test)]
mod tests;

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

pub use types::{PersistedState, STORE_SCHEMA_VERSION};

pub struct StateStore {
    path: PathBuf,
    write_gate: Mutex<()>,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_gate: Mutex::new(()),
        }
    }

    pub fn with_default_path() -> Self {
        Self::new(crate::constants::get_store_dir().join(crate::constants::STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the full state atomically
    pub fn save_all(&self, state: &PersistedState) -> CoreResult<()> {
        let _gate = self.write_gate.lock();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        log::debug!(
            "Persisted {} baselines, {} patterns, {} correlations",
            state.baselines.len(),
            state.patterns.len(),
            state.correlations.len()
        );
        Ok(())
    }

    /// Load persisted state.
    ///
    /// `Ok(None)` means no prior state; any schema or layout mismatch is a
    /// hard error so a newer file is never silently truncated into an older
    /// engine.
    pub fn load_all(&self) -> CoreResult<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path)?;
        let state: PersistedState = serde_json::from_slice(&data).map_err(|e| {
            CoreError::Persistence(format!("corrupt state file {}: {}", self.path.display(), e))
        })?;

        state.validate()?;
        Ok(Some(state))
    }
}
