//! Axes Module - Vector Space & Text Embedding
//!
//! - `layout.rs`: the four axes, version, layout hash
//! - `vector.rs`: `AxisVector` geometry (distance, harmony, signatures)
//! - `lexicon.rs`: static term and abbreviation tables
//! - `mapper.rs`: deterministic embedding
//! - `cache.rs`: injected memoization with capacity + TTL

pub mod cache;
pub mod layout;
pub mod lexicon;
pub mod mapper;
pub mod vector;

pub use cache::EmbedCache;
pub use mapper::{AxisMapper, Embedding};
pub use vector::{AxisVector, SimilarityClass};
