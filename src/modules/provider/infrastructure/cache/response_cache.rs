use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Cached value plus the moment it was stored
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub entries_count: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

struct CacheState<V> {
    entries: LruCache<String, CacheEntry<V>>,
    stats: CacheStats,
}

/// Bounded response cache with a fixed TTL and least-recently-used eviction.
///
/// Expiry is lazy: stale entries are only dropped when read or when they
/// reach the LRU end and get evicted. There is no background sweep.
pub struct ResponseCache<V> {
    name: &'static str,
    state: Mutex<CacheState<V>>,
    max_size: NonZeroUsize,
    ttl: Duration,
}

impl<V: Clone> ResponseCache<V> {
    /// A `max_size` of zero is treated as one.
    pub fn new(name: &'static str, max_size: usize, ttl: Duration) -> Self {
        let max_size = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);

        Self {
            name,
            state: Mutex::new(CacheState {
                // Capacity is enforced by `put`; the map itself is never asked to evict.
                entries: LruCache::unbounded(),
                stats: CacheStats::default(),
            }),
            max_size,
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let mut state = self.state.lock().await;

        let expired = match state.entries.peek(key) {
            Some(entry) => entry.is_expired(self.ttl),
            None => {
                state.stats.misses += 1;
                debug!("{} cache miss for key: {}", self.name, key);
                return None;
            }
        };

        if expired {
            state.entries.pop(key);
            state.stats.expirations += 1;
            state.stats.misses += 1;
            debug!("{} cache entry expired for key: {}", self.name, key);
            return None;
        }

        // `get` promotes the entry to most-recently-used
        let value = state.entries.get(key).map(|entry| entry.value.clone());
        state.stats.hits += 1;
        debug!("{} cache hit for key: {}", self.name, key);
        value
    }

    pub async fn put(&self, key: String, value: V) {
        let mut state = self.state.lock().await;

        if !state.entries.contains(&key) && state.entries.len() >= self.max_size.get() {
            if let Some((evicted, _)) = state.entries.pop_lru() {
                state.stats.evictions += 1;
                debug!("{} cache evicted least recently used key: {}", self.name, evicted);
            }
        }

        // Re-inserting an existing key resets its age and recency
        state.entries.pop(&key);
        state.entries.put(key, CacheEntry::new(value));
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.stats = CacheStats::default();
        debug!("{} cache cleared", self.name);
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            entries_count: state.entries.len(),
            ..state.stats.clone()
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size.get()
    }
}
