//! Route planner using depth-first search.
//!
//! This module implements the core planning algorithm that answers:
//! "given these flights, leaving no earlier than this time, what is the
//! earliest I can reach my destination?"
//!
//! Schedules are first indexed by departure city ([`RouteMap`]); the
//! [`Planner`] then explores every time-respecting, cycle-free sequence
//! of flights, memoising sub-results for the duration of one search.

mod config;
mod route_map;
mod search;


pub use config::{InvalidMemoScope, MemoScope, SearchConfig};
pub use route_map::{Edge, RouteMap};
pub use search::{Planner, SearchError, SearchOutcome, SearchRequest};
