//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::PlanCache;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// Nothing in here is mutated by a search: each request builds its own
/// route map and memo table.
#[derive(Clone)]
pub struct AppState {
    /// Whole-response cache
    pub cache: Arc<PlanCache>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,

    /// Deadline for one search
    pub search_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(cache: PlanCache, config: SearchConfig, search_timeout: Duration) -> Self {
        Self {
            cache: Arc::new(cache),
            config: Arc::new(config),
            search_timeout,
        }
    }
}
