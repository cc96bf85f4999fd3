//! Departure index built from flat schedule records.
//!
//! The search only ever asks "which flights leave this city?", so the
//! schedules are grouped once by departure city before searching.

use std::collections::HashMap;

use crate::domain::{City, FlightSchedule, Stop, Timestamp};

/// A flight as seen from its departure city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// When the flight leaves.
    pub departure: Timestamp,

    /// Where and when it lands.
    pub destination: Stop,
}

/// Flights grouped by departure city.
///
/// Edges under a city keep the order their schedules had in the input.
/// The planner's tie-break depends on that order, so nothing here sorts,
/// deduplicates or drops schedules.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    routes: HashMap<City, Vec<Edge>>,
}

impl RouteMap {
    /// Index `schedules` by departure city.
    pub fn from_schedules(schedules: &[FlightSchedule]) -> Self {
        let mut routes: HashMap<City, Vec<Edge>> = HashMap::new();

        for schedule in schedules {
            routes
                .entry(schedule.departure.city.clone())
                .or_default()
                .push(Edge {
                    departure: schedule.departure.timestamp,
                    destination: schedule.arrival.clone(),
                });
        }

        Self { routes }
    }

    /// Returns the flights leaving `city`, in input order.
    ///
    /// A city with no departures yields an empty slice.
    pub fn departures_from(&self, city: &City) -> &[Edge] {
        self.routes.get(city).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of cities with at least one departure.
    pub fn city_count(&self) -> usize {
        self.routes.len()
    }

    /// Total number of flights indexed.
    pub fn edge_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn schedule() -> impl Strategy<Value = FlightSchedule> {
        ("[A-D]", 0i64..50, "[A-D]", 0i64..50).prop_map(|(from, dep, to, arr)| {
            FlightSchedule::new(Stop::new(from, dep), Stop::new(to, arr))
        })
    }

    proptest! {
        /// Every schedule becomes exactly one edge
        #[test]
        fn edge_count_matches_input(schedules in prop::collection::vec(schedule(), 0..30)) {
            let map = RouteMap::from_schedules(&schedules);
            prop_assert_eq!(map.edge_count(), schedules.len());
        }

        /// Each city's edges are its schedules, in input order
        #[test]
        fn per_city_order_preserved(schedules in prop::collection::vec(schedule(), 0..30)) {
            let map = RouteMap::from_schedules(&schedules);

            for city in ["A", "B", "C", "D"] {
                let city = City::new(city);
                let expected: Vec<Edge> = schedules
                    .iter()
                    .filter(|s| s.departure.city == city)
                    .map(|s| Edge {
                        departure: s.departure.timestamp,
                        destination: s.arrival.clone(),
                    })
                    .collect();
                prop_assert_eq!(map.departures_from(&city), expected.as_slice());
            }
        }
    }
}
