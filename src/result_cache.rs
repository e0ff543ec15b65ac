//! Short-lived memo of map responses, keyed by viewport.
//!
//! Panning and zooming fire many requests for the same extent in quick
//! succession; this absorbs them. Two requests racing on the same missing
//! key may both compute and both insert, the later insert wins.

use crate::map_features::MapFeature;
use crate::viewport::{Bounds, Viewport};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(|e| e.into_inner());
        self.origin + offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewportKey {
    pub zoom: i32,
    pub bounds_hash: u64,
}

impl ViewportKey {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        ViewportKey {
            zoom: viewport.zoom,
            bounds_hash: bounds_hash(viewport.bounds.as_ref()),
        }
    }
}

/// Hash of the canonical JSON form of the bounds (`null` when absent).
pub fn bounds_hash(bounds: Option<&Bounds>) -> u64 {
    let canonical = serde_json::to_vec(&bounds).unwrap_or_default();
    seahash::hash(&canonical)
}

struct CacheEntry {
    inserted_at: Instant,
    sequence: u64,
    features: Arc<Vec<MapFeature>>,
}

pub struct MapResultCache {
    entries: DashMap<ViewportKey, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
    next_sequence: AtomicU64,
}

impl MapResultCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        MapResultCache::with_clock(ttl, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        MapResultCache {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
            clock,
            next_sequence: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &ViewportKey) -> Option<Arc<Vec<MapFeature>>> {
        let now = self.clock.now();

        let hit = self.entries.get(key).and_then(|entry| {
            if now.duration_since(entry.inserted_at) < self.ttl {
                Some(Arc::clone(&entry.features))
            } else {
                None
            }
        });

        if hit.is_none() {
            // the Ref from get() has to be dropped before remove_if
            self.entries.remove_if(key, |_, entry| {
                now.duration_since(entry.inserted_at) >= self.ttl
            });
        }

        hit
    }

    pub fn insert(&self, key: ViewportKey, features: Arc<Vec<MapFeature>>) {
        let now = self.clock.now();
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);

        self.entries.insert(
            key,
            CacheEntry {
                inserted_at: now,
                sequence,
                features,
            },
        );

        if self.entries.len() > self.max_entries {
            self.evict(now);
        }
    }

    /// Drops expired entries, then the oldest ones until the cache fits.
    fn evict(&self, now: Instant) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);

        let overflow = self.entries.len().saturating_sub(self.max_entries);

        if overflow == 0 {
            return;
        }

        let mut by_age: Vec<(u64, ViewportKey)> = self
            .entries
            .iter()
            .map(|entry| (entry.value().sequence, *entry.key()))
            .collect();
        by_age.sort_unstable_by_key(|(sequence, _)| *sequence);

        for (_, key) in by_age.into_iter().take(overflow) {
            self.entries.remove(&key);
        }

        debug!(evicted = overflow, "map result cache over capacity");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
