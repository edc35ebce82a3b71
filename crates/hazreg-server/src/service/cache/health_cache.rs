//! Health monitoring with a short-lived cached result.
//!
//! The record store is probed at most once per cache window; between
//! probes the last result is served.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::service::store::RecordStore;
use crate::utility::tracing_targets::TRACING_TARGET_HEALTH_CACHE;

const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct HealthCacheEntry {
    is_healthy: AtomicBool,
    last_check: RwLock<Option<Instant>>,
    cache_duration: Duration,
}

impl HealthCacheEntry {
    fn new(cache_duration: Duration) -> Self {
        Self {
            is_healthy: AtomicBool::new(false),
            last_check: RwLock::new(None),
            cache_duration,
        }
    }

    async fn get_or_update<F, Fut>(&self, check_fn: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let now = Instant::now();
        let last_check = { *self.last_check.read().await };

        if let Some(last_check) = last_check
            && now.duration_since(last_check) < self.cache_duration
        {
            return self.is_healthy.load(Ordering::Relaxed);
        }

        let healthy = check_fn().await;

        self.is_healthy.store(healthy, Ordering::Relaxed);
        *self.last_check.write().await = Some(now);

        healthy
    }
}

/// Cached record-store health.
#[derive(Debug, Clone)]
pub struct HealthCache {
    cache: Arc<HealthCacheEntry>,
}

impl HealthCache {
    /// Creates a cache with a 30 second window.
    pub fn new() -> Self {
        Self::with_cache_duration(DEFAULT_CACHE_DURATION)
    }

    pub fn with_cache_duration(cache_duration: Duration) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_HEALTH_CACHE,
            cache_duration_secs = cache_duration.as_secs(),
            "health cache initialized"
        );

        Self {
            cache: Arc::new(HealthCacheEntry::new(cache_duration)),
        }
    }

    /// Returns the store health, probing it if the cached result is stale.
    pub async fn is_healthy(&self, store: &dyn RecordStore) -> bool {
        self.cache.get_or_update(|| Self::check_store(store)).await
    }

    async fn check_store(store: &dyn RecordStore) -> bool {
        let start = Instant::now();
        let healthy = match store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET_HEALTH_CACHE,
                    error = %e,
                    "record store health check failed"
                );
                false
            }
        };

        tracing::info!(
            target: TRACING_TARGET_HEALTH_CACHE,
            duration_ms = start.elapsed().as_millis(),
            healthy,
            "health check completed"
        );

        healthy
    }
}

impl Default for HealthCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::store::memory::MemoryStore;

    #[tokio::test]
    async fn cached_result_is_reused() {
        let entry = HealthCacheEntry::new(Duration::from_secs(60));
        assert!(entry.get_or_update(|| async { true }).await);
        assert!(entry.get_or_update(|| async { false }).await);
    }

    #[tokio::test]
    async fn expired_result_is_refreshed() {
        let entry = HealthCacheEntry::new(Duration::from_millis(10));
        assert!(entry.get_or_update(|| async { true }).await);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!entry.get_or_update(|| async { false }).await);
    }

    #[tokio::test]
    async fn probes_record_store() {
        let store = MemoryStore::new();
        let cache = HealthCache::with_cache_duration(Duration::ZERO);
        assert!(cache.is_healthy(&store).await);

        store.set_failing(true);
        assert!(!cache.is_healthy(&store).await);
    }
}
