//! Populate-once cache for process-lifetime reference data.
//!
//! Holds a single value that is computed on first use and never
//! invalidated. Owned by the composition root and injected, so tests can
//! hand in a preloaded value without touching process-wide state.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

/// A thread-safe cell filled by the first caller that needs it.
///
/// Concurrent first callers wait on the same initialization; every caller
/// observes the same value afterwards.
pub struct OnceCache<V> {
    cell: OnceCell<Arc<V>>,
}

impl<V> OnceCache<V>
where
    V: Send + Sync,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Create a cache that already holds `value`; the populate closure never runs.
    pub fn preloaded(value: V) -> Self {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(value))),
        }
    }

    /// Get the cached value, computing it with `populate` on first use.
    pub async fn get_or_populate<F, Fut>(&self, populate: F) -> Arc<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        self.cell
            .get_or_init(|| async move { Arc::new(populate().await) })
            .await
            .clone()
    }

    /// Check if the cache has been populated.
    pub fn is_populated(&self) -> bool {
        self.cell.initialized()
    }
}

impl<V> Default for OnceCache<V>
where
    V: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
