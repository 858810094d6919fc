//! Axis Mapper - Deterministic Text Embedding
//!
//! Turns a free-form operational description into an axis vector: tokenize
//! on word boundaries, lower-case, expand known abbreviations, count
//! lexicon hits per axis, normalize by total hits. Identical input always
//! yields an identical embedding; pattern ids and test fixtures depend on
//! this, so nothing here may consult ambient state.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::cache::EmbedCache;
use super::layout::AXIS_COUNT;
use super::lexicon;
use super::vector::AxisVector;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").expect("token pattern"));

/// An embedded description: the normalized vector plus how many tokens hit
/// the lexicon. `matched == 0` iff the vector is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub vector: AxisVector,
    pub matched: u32,
}

pub struct AxisMapper {
    cache: EmbedCache,
}

impl AxisMapper {
    pub fn new(cache: EmbedCache) -> Self {
        Self { cache }
    }

    pub fn with_defaults() -> Self {
        Self::new(EmbedCache::new(
            crate::constants::get_embed_cache_capacity(),
            Duration::from_secs(crate::constants::get_embed_cache_ttl_secs()),
        ))
    }

    /// Embed a description, memoized by input string
    pub fn embed(&self, text: &str) -> Embedding {
        if let Some(hit) = self.cache.get(text) {
            return hit;
        }
        let embedding = embed_uncached(text);
        self.cache.put(text, embedding);
        embedding
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// The pure embedding function behind the cache
pub fn embed_uncached(text: &str) -> Embedding {
    let lowered = text.to_lowercase();
    let mut hits = [0u32; AXIS_COUNT];
    let mut matched = 0u32;

    for token in TOKEN_RE.find_iter(&lowered) {
        let token = token.as_str();
        // Expansion first, raw token as fallback.
        let axis = match lexicon::expand(token) {
            Some(full) => lexicon::lookup(full).or_else(|| lexicon::lookup(token)),
            None => lexicon::lookup(token),
        };
        if let Some(axis) = axis {
            hits[axis] += 1;
            matched += 1;
        }
    }

    if matched == 0 {
        return Embedding {
            vector: AxisVector::zero(),
            matched: 0,
        };
    }

    let mut values = [0.0f32; AXIS_COUNT];
    for i in 0..AXIS_COUNT {
        values[i] = hits[i] as f32 / matched as f32;
    }

    Embedding {
        vector: AxisVector::from_values(values),
        matched,
    }
}
