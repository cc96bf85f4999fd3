//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{City, FlightSchedule, Itinerary, Timestamp};
use crate::planner::SearchRequest;

/// Request to plan a trip.
///
/// Every field is required and unknown fields are rejected. The whole
/// request, schedules included, is the key of the response cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanRequest {
    /// All bookable flights, in the order the client listed them.
    pub schedules: Vec<FlightSchedule>,

    /// Where the trip starts and ends.
    pub trip_plan: TripPlan,

    /// Earliest time the traveller can leave the start city.
    pub preferred_time: Timestamp,
}

/// Start and end of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TripPlan {
    pub start_city: City,
    pub end_city: City,
}

impl PlanRequest {
    /// The planner query this request asks.
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest::new(
            self.trip_plan.start_city.clone(),
            self.trip_plan.end_city.clone(),
            self.preferred_time,
        )
    }
}

/// Response for trip planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResponse {
    /// Best itinerary, or `null` when the end city cannot be reached
    pub flight_plan: Option<Itinerary>,
}

/// Empty acknowledgement, serialized as `{}`.
#[derive(Debug, Serialize)]
pub struct EmptyResponse {}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
