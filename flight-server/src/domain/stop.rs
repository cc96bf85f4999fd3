//! A city at a point in time.

use serde::{Deserialize, Serialize};

use super::{City, Timestamp};

/// A `{city, timestamp}` pair.
///
/// Used for both ends of a flight and for every hop of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stop {
    pub city: City,
    pub timestamp: Timestamp,
}

impl Stop {
    /// Create a stop.
    pub fn new(city: impl Into<City>, timestamp: impl Into<Timestamp>) -> Self {
        Self {
            city: city.into(),
            timestamp: timestamp.into(),
        }
    }
}
