//! Caching layer for plan responses.
//!
//! Planning is deterministic, so identical requests always get identical
//! answers. We cache whole responses keyed by the full request (every
//! schedule, the trip plan and the preferred time) so that any difference
//! in input misses the cache.
//!
//! This cache sits outside the planner. The planner's own memo table
//! lives for a single search and is never shared.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::planner::SearchError;
use crate::web::{PlanRequest, PlanResponse};

/// Cached plan entry.
type PlanEntry = Arc<PlanResponse>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache for plan responses.
///
/// Keys are shared with the search that computes them, so a request's
/// schedules are never copied.
pub struct PlanCache {
    plans: MokaCache<Arc<PlanRequest>, PlanEntry>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Get a cached response.
    pub async fn get(&self, request: &PlanRequest) -> Option<PlanEntry> {
        self.plans.get(request).await
    }

    /// Return the cached response for `request`, or run `compute` and cache
    /// its result.
    ///
    /// Concurrent callers with the same request wait for a single
    /// computation. Errors are returned to every waiter but not cached.
    pub async fn get_or_compute<F>(
        &self,
        request: Arc<PlanRequest>,
        compute: F,
    ) -> Result<PlanEntry, SearchError>
    where
        F: Future<Output = Result<PlanResponse, SearchError>>,
    {
        self.plans
            .try_get_with(request, async move { compute.await.map(Arc::new) })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}
