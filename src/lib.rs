//! NetSense Core - Adaptive Semantic-State Monitoring
//!
//! Turns free-form operational descriptions and numeric telemetry into
//! points in a fixed four-axis vector space, learns per-entity baselines,
//! recognizes recurring patterns, scores anomalies, classifies drift
//! between profile snapshots, correlates symptoms with causes, and
//! projects trajectories under a coupled-dynamics simulation.
//!
//! The `MonitorCore` facade in [`api`] is the inbound surface; the engines
//! in [`logic`] are usable on their own.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use api::{CoreConfig, CoreStatus, MonitorCore, ObservationOutcome};
pub use error::{CoreError, CoreResult};
pub use logic::anomaly::{AnomalyReport, Severity};
pub use logic::axes::{AxisMapper, AxisVector, EmbedCache, Embedding, SimilarityClass};
pub use logic::baseline::EntityBaseline;
pub use logic::correlator::Diagnosis;
pub use logic::drift::{DriftKind, DriftReport, DriftSeverity, PolicyPosture, ProfileSnapshot};
pub use logic::forecast::{Prediction, TrendClass};
pub use logic::patterns::{Pattern, PatternKind};
pub use logic::resonance::{AxisBounds, Trajectory, TrajectoryClass};
