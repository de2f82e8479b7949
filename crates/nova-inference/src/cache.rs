//! Injectable caches for the generation pipelines.
//!
//! Both caches are explicit objects constructed at startup and passed in,
//! with defined TTL and capacity bounds. Entries are process-local; two
//! concurrent misses for the same key may both reach the model (no
//! in-flight deduplication; a known gap, not a guarantee).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use nova_core::defaults::{
    AVAILABILITY_TTL_SECS, FLASHCARD_CACHE_CAPACITY, FLASHCARD_CACHE_TTL_SECS,
};
use nova_core::CardContent;

struct CacheEntry {
    cards: Vec<CardContent>,
    inserted_at: Instant,
}

/// TTL + capacity bounded cache of generated flashcards, keyed by a hash of
/// the note content.
pub struct FlashcardCache {
    inner: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for FlashcardCache {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(FLASHCARD_CACHE_TTL_SECS),
            FLASHCARD_CACHE_CAPACITY,
        )
    }
}

impl FlashcardCache {
    /// Create a cache with the given entry TTL and capacity.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl,
            capacity,
        }
    }

    /// Fetch cached cards for a content hash. Expired entries are dropped.
    pub fn get(&self, key: &str) -> Option<Vec<CardContent>> {
        let mut map = self.inner.lock().unwrap();
        match map.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.cards.clone()),
            Some(_) => {
                map.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store cards for a content hash. When full, the oldest entry is
    /// evicted first.
    pub fn insert(&self, key: String, cards: Vec<CardContent>) {
        let mut map = self.inner.lock().unwrap();
        if map.len() >= self.capacity && !map.contains_key(&key) {
            if let Some(oldest) = map
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(k, _)| k.clone())
            {
                map.remove(&oldest);
            }
        }
        map.insert(
            key,
            CacheEntry {
                cards,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of live entries (expired entries may still be counted until
    /// their next lookup).
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single-value TTL cache for the provider availability probe.
pub struct AvailabilityCache {
    inner: Mutex<Option<(Instant, bool)>>,
    ttl: Duration,
}

impl Default for AvailabilityCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(AVAILABILITY_TTL_SECS))
    }
}

impl AvailabilityCache {
    /// Create a cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(None),
            ttl,
        }
    }

    /// The cached probe result, if still fresh.
    pub fn get(&self) -> Option<bool> {
        let guard = self.inner.lock().unwrap();
        match *guard {
            Some((at, value)) if at.elapsed() < self.ttl => Some(value),
            _ => None,
        }
    }

    /// Record a probe result.
    pub fn set(&self, available: bool) {
        *self.inner.lock().unwrap() = Some((Instant::now(), available));
    }
}
