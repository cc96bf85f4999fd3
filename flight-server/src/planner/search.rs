//! Depth-first best-route search.
//!
//! Finds the itinerary that reaches the destination earliest, exploring
//! every flight that leaves each city no earlier than the traveller is
//! there. Cycles are cut per path, and sub-results are memoised for the
//! duration of one search.
//!
//! The search is depth-first over an explicit stack, so a route through
//! thousands of cities needs no more than the heap to hold it.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::iter;
use std::slice;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::domain::{City, Itinerary, Stop, Timestamp};

use super::config::{MemoScope, SearchConfig};
use super::route_map::{Edge, RouteMap};

/// Error from running a search.
///
/// The search itself cannot fail; these come from the code that runs it
/// under a deadline on a worker thread.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Search did not finish before its deadline
    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    /// Search task ended without producing a result
    #[error("search aborted: {0}")]
    Aborted(String),
}

/// Request for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Where the traveller starts.
    pub origin: City,

    /// Where the traveller wants to end up.
    pub destination: City,

    /// Earliest time the traveller can leave the origin.
    pub preferred_time: Timestamp,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        origin: impl Into<City>,
        destination: impl Into<City>,
        preferred_time: impl Into<Timestamp>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            preferred_time: preferred_time.into(),
        }
    }
}

/// Result of route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Earliest-arriving itinerary, or `None` if the destination is
    /// unreachable.
    pub itinerary: Option<Itinerary>,

    /// Number of calls that missed the memo table.
    pub routes_explored: usize,

    /// Number of calls answered from the memo table.
    pub cache_hits: usize,
}

/// Cities already on the current path.
///
/// A persistent list linked towards the origin. Forking it for a child
/// branch is O(1) and shares every city above the fork, so sibling
/// branches never see each other's visits.
#[derive(Clone, Default)]
struct VisitedSet {
    head: Option<Arc<PathNode>>,
}

struct PathNode {
    city: City,
    parent: Option<Arc<PathNode>>,
}

impl Drop for PathNode {
    // Unlink iteratively; the default drop recurses once per city.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Arc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl VisitedSet {
    fn iter(&self) -> impl Iterator<Item = &City> + '_ {
        iter::successors(self.head.as_deref(), |node| node.parent.as_deref()).map(|n| &n.city)
    }

    fn contains(&self, city: &City) -> bool {
        self.iter().any(|c| c == city)
    }

    /// Returns a set that also contains `city`, sharing this one.
    fn with(&self, city: &City) -> Self {
        Self {
            head: Some(Arc::new(PathNode {
                city: city.clone(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Canonical form of the set, independent of visit order.
    fn cities(&self) -> BTreeSet<City> {
        self.iter().cloned().collect()
    }
}

impl fmt::Debug for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Memo key. `path` is only set under [`MemoScope::PerPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    city: City,
    destination: City,
    timestamp: Timestamp,
    path: Option<BTreeSet<City>>,
}

/// Write-once memo table for one search.
#[derive(Debug, Default)]
struct RouteCache {
    entries: HashMap<RouteKey, Option<Itinerary>>,
}

impl RouteCache {
    fn get(&self, key: &RouteKey) -> Option<&Option<Itinerary>> {
        self.entries.get(key)
    }

    /// Record the answer for `key`. An existing answer is never replaced.
    fn record(&mut self, key: RouteKey, route: Option<Itinerary>) {
        self.entries.entry(key).or_insert(route);
    }
}

/// Per-search mutable state.
#[derive(Debug, Default)]
struct SearchRun {
    cache: RouteCache,
    routes_explored: usize,
    cache_hits: usize,
}

/// A city whose departures are being explored.
struct Frame<'a> {
    key: RouteKey,
    city: City,
    timestamp: Timestamp,
    /// Visited set handed to every child: this frame's set plus `city`
    onward: VisitedSet,
    edges: slice::Iter<'a, Edge>,
    /// Departure time of the edge whose child is being explored
    departure: Timestamp,
    best: Option<Itinerary>,
}

impl Frame<'_> {
    /// Fold in the answer from the child reached by the current edge.
    fn offer(&mut self, route: Option<Itinerary>) {
        let Some(route) = route else {
            return;
        };

        // Strict comparison: the first edge to reach the best arrival wins
        let improves = self
            .best
            .as_ref()
            .is_none_or(|b| route.arrival().timestamp < b.arrival().timestamp);
        if improves {
            self.best = Some(route.prepend(Stop::new(self.city.clone(), self.departure)));
        }
    }
}

/// Outcome of arriving at a city.
enum Visit<'a> {
    /// Answered without exploring: memo hit, arrival or cycle
    Resolved(Option<Itinerary>),
    Explore(Frame<'a>),
}

/// Route planner over one schedule set.
///
/// The planner borrows an immutable [`RouteMap`] and holds no mutable
/// state of its own: every call to [`Planner::search`] builds and drops
/// its own memo table, so searches never affect each other.
pub struct Planner<'a> {
    routes: &'a RouteMap,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(routes: &'a RouteMap, config: &'a SearchConfig) -> Self {
        Self { routes, config }
    }

    /// Find the earliest-arriving itinerary for `request`.
    ///
    /// Ties on arrival time go to the flight listed first in the input.
    pub fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let mut run = SearchRun::default();

        let itinerary = self.best_route(request, &mut run);

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            preferred_time = %request.preferred_time,
            memo_scope = %self.config.memo_scope,
            found = itinerary.is_some(),
            routes_explored = run.routes_explored,
            cache_hits = run.cache_hits,
            "route search finished"
        );

        SearchOutcome {
            itinerary,
            routes_explored: run.routes_explored,
            cache_hits: run.cache_hits,
        }
    }

    /// Depth-first search from the request's origin.
    ///
    /// Runs on an explicit stack of [`Frame`]s, so path length is bounded
    /// by memory rather than by the thread's stack.
    fn best_route(&self, request: &SearchRequest, run: &mut SearchRun) -> Option<Itinerary> {
        let destination = &request.destination;
        let origin = self.visit(
            &request.origin,
            request.preferred_time,
            destination,
            &VisitedSet::default(),
            run,
        );

        let mut stack = match origin {
            Visit::Resolved(route) => return route,
            Visit::Explore(frame) => vec![frame],
        };
        // Answer from the child the top frame is waiting on
        let mut returned: Option<Option<Itinerary>> = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(route) = returned.take() {
                frame.offer(route);
            }

            // Skip flights that have already departed
            let timestamp = frame.timestamp;
            match frame.edges.find(|edge| edge.departure >= timestamp) {
                Some(edge) => {
                    frame.departure = edge.departure;
                    let next = &edge.destination;
                    match self.visit(&next.city, next.timestamp, destination, &frame.onward, run) {
                        Visit::Resolved(route) => returned = Some(route),
                        Visit::Explore(child) => stack.push(child),
                    }
                }
                None => {
                    let Some(done) = stack.pop() else { break };
                    run.cache.record(done.key, done.best.clone());
                    returned = Some(done.best);
                }
            }
        }

        returned.flatten()
    }

    /// Arrive at `city` at `timestamp` having come through `visited`.
    fn visit(
        &self,
        city: &City,
        timestamp: Timestamp,
        destination: &City,
        visited: &VisitedSet,
        run: &mut SearchRun,
    ) -> Visit<'a> {
        let key = self.route_key(city, destination, timestamp, visited);

        if let Some(cached) = run.cache.get(&key) {
            run.cache_hits += 1;
            return Visit::Resolved(cached.clone());
        }
        run.routes_explored += 1;

        if city == destination {
            let arrived = Itinerary::arrived(Stop::new(city.clone(), timestamp));
            return Visit::Resolved(Some(arrived));
        }

        if visited.contains(city) {
            trace!(%city, %timestamp, "cycle rejected");
            return Visit::Resolved(None);
        }

        Visit::Explore(Frame {
            key,
            city: city.clone(),
            timestamp,
            onward: visited.with(city),
            edges: self.routes.departures_from(city).iter(),
            departure: timestamp,
            best: None,
        })
    }

    fn route_key(
        &self,
        city: &City,
        destination: &City,
        timestamp: Timestamp,
        visited: &VisitedSet,
    ) -> RouteKey {
        let path = match self.config.memo_scope {
            MemoScope::Shared => None,
            MemoScope::PerPath => Some(visited.cities()),
        };

        RouteKey {
            city: city.clone(),
            destination: destination.clone(),
            timestamp,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_set_branches_are_independent() {
        let root = VisitedSet::default();
        let left = root.with(&City::new("A"));
        let right = root.with(&City::new("B"));

        assert!(!root.contains(&City::new("A")));
        assert!(left.contains(&City::new("A")));
        assert!(!left.contains(&City::new("B")));
        assert!(right.contains(&City::new("B")));
        assert!(!right.contains(&City::new("A")));
    }

    #[test]
    fn visited_set_is_order_independent() {
        let ab = VisitedSet::default()
            .with(&City::new("A"))
            .with(&City::new("B"));
        let ba = VisitedSet::default()
            .with(&City::new("B"))
            .with(&City::new("A"));
        assert_eq!(ab.cities(), ba.cities());
    }

    #[test]
    fn visited_set_shares_parent() {
        let root = VisitedSet::default().with(&City::new("A"));
        let left = root.with(&City::new("B"));
        let right = root.with(&City::new("C"));

        let parent = |set: &VisitedSet| set.head.as_ref().unwrap().parent.clone().unwrap();
        assert!(Arc::ptr_eq(&parent(&left), root.head.as_ref().unwrap()));
        assert!(Arc::ptr_eq(&parent(&right), root.head.as_ref().unwrap()));
        assert_eq!(left.iter().count(), 2);
        assert_eq!(right.iter().count(), 2);
    }

    #[test]
    fn route_cache_is_write_once() {
        let key = RouteKey {
            city: City::new("A"),
            destination: City::new("B"),
            timestamp: Timestamp::new(0),
            path: None,
        };
        let mut cache = RouteCache::default();

        cache.record(key.clone(), None);
        cache.record(key.clone(), Some(Itinerary::arrived(Stop::new("A", 0))));

        assert_eq!(cache.get(&key), Some(&None));
    }

    #[test]
    fn shared_key_ignores_path() {
        let routes = RouteMap::default();
        let config = SearchConfig::new(MemoScope::Shared);
        let planner = Planner::new(&routes, &config);

        let a = City::new("A");
        let d = City::new("D");
        let empty = VisitedSet::default();
        let visited = empty.with(&City::new("X"));

        assert_eq!(
            planner.route_key(&a, &d, Timestamp::new(1), &empty),
            planner.route_key(&a, &d, Timestamp::new(1), &visited)
        );
        assert_ne!(
            planner.route_key(&a, &d, Timestamp::new(1), &empty),
            planner.route_key(&a, &d, Timestamp::new(2), &empty)
        );
    }

    #[test]
    fn per_path_key_includes_path() {
        let routes = RouteMap::default();
        let config = SearchConfig::new(MemoScope::PerPath);
        let planner = Planner::new(&routes, &config);

        let a = City::new("A");
        let d = City::new("D");
        let empty = VisitedSet::default();
        let visited = empty.with(&City::new("X"));

        assert_ne!(
            planner.route_key(&a, &d, Timestamp::new(1), &empty),
            planner.route_key(&a, &d, Timestamp::new(1), &visited)
        );
    }

    #[test]
    fn search_error_display() {
        let err = SearchError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "search timed out after 10s");

        let err = SearchError::Aborted("worker panicked".into());
        assert_eq!(err.to_string(), "search aborted: worker panicked");
    }
}
