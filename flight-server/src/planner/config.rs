//! Search configuration for the route planner.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown memo scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid memo scope {0:?}: expected \"shared\" or \"per-path\"")]
pub struct InvalidMemoScope(String);

/// How sub-results are shared between branches of one search.
///
/// The memo table always lives for a single search. The scope decides
/// which recursive calls are considered "the same question".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoScope {
    /// Key on `(city, destination, timestamp)` only.
    ///
    /// A result computed on one path is reused on every other path that
    /// reaches the same city at the same time, even if that path has
    /// already visited cities the cached route goes through. Fast, and
    /// matches the historical behaviour of the service.
    #[default]
    Shared,

    /// Key additionally on the set of cities visited so far.
    ///
    /// Results are exact over simple paths, at the cost of far fewer
    /// cache hits on dense schedules.
    PerPath,
}

impl FromStr for MemoScope {
    type Err = InvalidMemoScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(MemoScope::Shared),
            "per-path" | "per_path" | "perpath" => Ok(MemoScope::PerPath),
            _ => Err(InvalidMemoScope(s.to_string())),
        }
    }
}

impl fmt::Display for MemoScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoScope::Shared => f.write_str("shared"),
            MemoScope::PerPath => f.write_str("per-path"),
        }
    }
}

/// Configuration parameters for route search.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Which calls share memoised sub-results.
    pub memo_scope: MemoScope,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(memo_scope: MemoScope) -> Self {
        Self { memo_scope }
    }
}
