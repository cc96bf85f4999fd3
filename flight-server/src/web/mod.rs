//! Web layer for the flight planner.
//!
//! Provides HTTP endpoints for health checks, trip planning and cache
//! control.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router, plan_trip};
pub use state::AppState;
