//! Embedding Cache
//!
//! Explicit memoization object injected into the mapper. Bounded capacity
//! with FIFO eviction and per-entry TTL; never a process-wide singleton, so
//! two cores in one process cannot observe each other's state.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use super::mapper::Embedding;

struct CacheSlot {
    embedding: Embedding,
    inserted_at: Instant,
}

struct CacheInner {
    map: HashMap<String, CacheSlot>,
    order: VecDeque<String>,
}

pub struct EmbedCache {
    capacity: usize,
    ttl: Duration,
    inner: Mutex<CacheInner>,
}

impl EmbedCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            inner: Mutex::new(CacheInner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn get(&self, text: &str) -> Option<Embedding> {
        let mut inner = self.inner.lock();
        match inner.map.get(text) {
            Some(slot) if slot.inserted_at.elapsed() <= self.ttl => {
                return Some(slot.embedding)
            }
            Some(_) => {}
            None => return None,
        }

        // Expired: drop the stale slot.
        inner.map.remove(text);
        inner.order.retain(|k| k != text);
        None
    }

    pub fn put(&self, text: &str, embedding: Embedding) {
        let mut inner = self.inner.lock();
        if inner.map.contains_key(text) {
            // Refresh in place; insertion order is unchanged.
            inner.map.insert(
                text.to_string(),
                CacheSlot {
                    embedding,
                    inserted_at: Instant::now(),
                },
            );
            return;
        }

        while inner.map.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                }
                None => break,
            }
        }

        inner.order.push_back(text.to_string());
        inner.map.insert(
            text.to_string(),
            CacheSlot {
                embedding,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.map.clear();
        inner.order.clear();
    }
}
