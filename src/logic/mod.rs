//! Logic Module - Monitoring Engines
//!
//! - `axes/` - vector space, lexicon embedding, cache
//! - `baseline/` - per-entity incremental learning
//! - `patterns/` - recurring signature memory
//! - `anomaly/` - z-score deviation scoring
//! - `drift/` - snapshot-to-snapshot change classification
//! - `correlator/` - symptom/cause probability tables
//! - `resonance/` - coupled-dynamics projection
//! - `forecast/` - history trend extrapolation
//! - `store/` - atomic versioned persistence

pub mod anomaly;
pub mod axes;
pub mod baseline;
pub mod correlator;
pub mod drift;
pub mod forecast;
pub mod patterns;
pub mod resonance;
pub mod store;
