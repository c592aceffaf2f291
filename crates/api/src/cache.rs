//! Response cache for backend reads.
//!
//! Each read declares a [`QueryKey`] and a fetch function. [`QueryCache::ensure`]
//! returns a fresh cached value or runs the fetch and stores its result.
//! Writes call [`QueryCache::invalidate_all`]; there is no finer-grained
//! invalidation.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

/// Ordered tuple of strings identifying one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// `["profiles"]` -- the directory listing.
    pub fn profiles() -> Self {
        Self::new(["profiles"])
    }

    /// `["profiles", id]` -- one profile in the editor.
    pub fn profile(user_id: &str) -> Self {
        Self::new(["profiles", user_id])
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

struct Entry {
    value: serde_json::Value,
    stored_at: Instant,
}

#[derive(Default)]
struct Entries {
    /// Bumped by every invalidation. A fetch that started under an older
    /// generation must not store its result.
    generation: u64,
    map: HashMap<QueryKey, Entry>,
}

/// Shared cache of JSON-encoded read results.
pub struct QueryCache {
    ttl: Duration,
    entries: RwLock<Entries>,
}

impl QueryCache {
    /// A zero `ttl` disables caching: every `ensure` fetches.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Return the cached value for `key` if fresh, otherwise fetch and store it.
    ///
    /// Fetch errors are returned as-is and leave the cache untouched. A result
    /// whose fetch overlapped [`invalidate_all`](Self::invalidate_all) is
    /// returned to the caller but not stored.
    pub async fn ensure<T, E, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let (cached, generation) = self.lookup(&key).await;
        if let Some(value) = cached {
            match serde_json::from_value::<T>(value) {
                Ok(hit) => {
                    tracing::debug!(%key, "Query cache hit");
                    return Ok(hit);
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "Cached value has unexpected shape");
                }
            }
        }

        let fresh = fetch().await?;
        if !self.ttl.is_zero() {
            match serde_json::to_value(&fresh) {
                Ok(value) => self.store(key, value, generation).await,
                Err(e) => tracing::warn!(%key, error = %e, "Could not cache query result"),
            }
        }
        Ok(fresh)
    }

    /// Drop every cached entry and discard results of fetches in flight.
    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.map.len();
        entries.map.clear();
        entries.generation += 1;
        tracing::debug!(dropped, "Query cache invalidated");
    }

    /// Number of entries that would still be served.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .map
            .values()
            .filter(|entry| self.is_fresh(entry))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }

    /// Fresh value for `key`, if any, and the generation it was read under.
    async fn lookup(&self, key: &QueryKey) -> (Option<serde_json::Value>, u64) {
        let entries = self.entries.read().await;
        let value = entries
            .map
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.value.clone());
        (value, entries.generation)
    }

    async fn store(&self, key: QueryKey, value: serde_json::Value, generation: u64) {
        let mut entries = self.entries.write().await;
        if entries.generation != generation {
            tracing::debug!(%key, "Cache invalidated during fetch, result not stored");
            return;
        }
        entries.map.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.map.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}
