//! Bounded, thread-safe cache of parsed field paths.
//!
//! Keyed by the exact input text. A hit returns a handle sharing the same
//! allocation as the cached instance, so repeated parsing of the same literal
//! is O(1) after the first parse and identity-stable. Eviction only removes
//! an entry from future lookups; paths already handed out stay valid.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::field_path::FieldPath;

/// Process-wide default cache used by [`FieldPath::parse`].
static GLOBAL_PATH_CACHE: Lazy<PathCache> = Lazy::new(PathCache::new);

pub(crate) fn global() -> &'static PathCache {
    &GLOBAL_PATH_CACHE
}

struct CacheEntry {
    path: FieldPath,
    last_used: AtomicU64,
}

/// Bounded LRU cache mapping path text to parsed [`FieldPath`] instances.
///
/// Safe for concurrent lookups and inserts from multiple threads. Lookups
/// take the read lock only; use-stamps are per-entry atomics so the fast
/// path never blocks other readers.
pub struct PathCache {
    capacity: usize,
    clock: AtomicU64,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl PathCache {
    /// Default number of cached paths.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create a cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache bounded to `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            clock: AtomicU64::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a previously parsed path by its exact source text.
    pub fn get(&self, text: &str) -> Option<FieldPath> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(text)?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Some(entry.path.clone())
    }

    /// Insert a parsed path, evicting the least recently used entry when at
    /// capacity.
    pub fn insert(&self, text: &str, path: FieldPath) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        if !entries.contains_key(text) && entries.len() >= self.capacity {
            let victim = entries
                .iter()
                .min_by_key(|(_, e)| e.last_used.load(Ordering::Relaxed))
                .map(|(k, _)| k.clone());
            if let Some(victim) = victim {
                log::debug!("path cache at capacity, evicting {victim:?}");
                entries.remove(&victim);
            }
        }
        let stamp = self.tick();
        entries.insert(
            text.to_string(),
            CacheEntry {
                path,
                last_used: AtomicU64::new(stamp),
            },
        );
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// `true` when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new()
    }
}
