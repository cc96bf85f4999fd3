//! Flight schedule records.

use serde::{Deserialize, Serialize};

use super::Stop;

/// One bookable flight: leave `departure.city` at `departure.timestamp`,
/// reach `arrival.city` at `arrival.timestamp`.
///
/// Schedules are taken verbatim. Nothing checks that the arrival is after
/// the departure, or that the two cities differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightSchedule {
    pub departure: Stop,
    pub arrival: Stop,
}

impl FlightSchedule {
    /// Create a schedule from its two ends.
    pub fn new(departure: Stop, arrival: Stop) -> Self {
        Self { departure, arrival }
    }
}
