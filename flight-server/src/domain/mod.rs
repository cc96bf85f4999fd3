//! Domain types for the flight planner.
//!
//! This module contains the core domain model types: cities, timestamps,
//! flight schedules and itineraries.

mod city;
mod itinerary;
mod schedule;
mod stop;
mod time;

pub use city::City;
pub use itinerary::Itinerary;
pub use schedule::FlightSchedule;
pub use stop::Stop;
pub use time::Timestamp;
