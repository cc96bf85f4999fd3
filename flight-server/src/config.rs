//! Server configuration.
//!
//! Read from environment variables at startup. Every variable is optional;
//! an unset variable takes its default, a set but unparsable one is an error.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::planner::{MemoScope, SearchConfig};

/// Address to listen on, e.g. `0.0.0.0:3000`.
pub const ADDR_VAR: &str = "FLIGHT_PLANNER_ADDR";
/// Lifetime of a cached response, in seconds.
pub const CACHE_TTL_VAR: &str = "FLIGHT_PLANNER_CACHE_TTL_SECS";
/// Maximum number of cached responses.
pub const CACHE_CAPACITY_VAR: &str = "FLIGHT_PLANNER_CACHE_CAPACITY";
/// Deadline for one search, in seconds.
pub const SEARCH_TIMEOUT_VAR: &str = "FLIGHT_PLANNER_SEARCH_TIMEOUT_SECS";
/// `shared` or `per-path`.
pub const MEMO_SCOPE_VAR: &str = "FLIGHT_PLANNER_MEMO_SCOPE";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub http_address: SocketAddr,

    /// Response cache settings
    pub cache: CacheConfig,

    /// Route planner settings
    pub search: SearchConfig,

    /// How long a request waits for its search before giving up
    pub search_timeout: Duration,
}

pub fn default_http_address() -> SocketAddr {
    // 0.0.0.0 so the server is reachable from outside a container
    ([0, 0, 0, 0], 3000).into()
}

pub fn default_search_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_address: default_http_address(),
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
            search_timeout: default_search_timeout(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let http_address = parse_var(&lookup, ADDR_VAR)?.unwrap_or(defaults.http_address);

        let ttl = parse_var::<u64, _>(&lookup, CACHE_TTL_VAR)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache.ttl);

        let max_capacity =
            parse_var(&lookup, CACHE_CAPACITY_VAR)?.unwrap_or(defaults.cache.max_capacity);

        let search_timeout = parse_var::<u64, _>(&lookup, SEARCH_TIMEOUT_VAR)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.search_timeout);
        if search_timeout.is_zero() {
            return Err(ConfigError {
                var: SEARCH_TIMEOUT_VAR,
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let memo_scope: MemoScope =
            parse_var(&lookup, MEMO_SCOPE_VAR)?.unwrap_or(defaults.search.memo_scope);

        Ok(Self {
            http_address,
            cache: CacheConfig { ttl, max_capacity },
            search: SearchConfig::new(memo_scope),
            search_timeout,
        })
    }
}

/// Parse `var` if it is set.
fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
