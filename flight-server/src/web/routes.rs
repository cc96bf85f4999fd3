//! HTTP route handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::domain::Itinerary;
use crate::planner::{Planner, RouteMap, SearchConfig, SearchError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/plan", post(plan))
        .route("/lazy_jack", post(plan))
        .route("/clear_cache", get(clear_cache).post(clear_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "Healthy server!"
}

/// Plan a trip, answering from the response cache when possible.
async fn plan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "rejected plan request");
        AppError::BadRequest {
            message: format!("Invalid request: {e}"),
        }
    })?;

    info!(
        start_city = %req.trip_plan.start_city,
        end_city = %req.trip_plan.end_city,
        preferred_time = %req.preferred_time,
        schedules = req.schedules.len(),
        "planning trip"
    );

    // Shared by the cache key and the search task
    let req = Arc::new(req);
    let compute = plan_in_background(
        Arc::clone(&req),
        state.config.clone(),
        state.search_timeout,
    );
    let response = state.cache.get_or_compute(req, compute).await?;

    Ok(Json(PlanResponse::clone(&response)))
}

/// Clear the response cache.
async fn clear_cache(State(state): State<AppState>) -> Json<EmptyResponse> {
    state.cache.invalidate_all();
    info!("plan cache cleared");
    Json(EmptyResponse {})
}

/// Run the planner for `request`.
///
/// Builds a fresh route map for the request's schedules and searches it
/// once. Nothing is shared with other calls.
pub fn plan_trip(request: &PlanRequest, config: &SearchConfig) -> PlanResponse {
    let routes = RouteMap::from_schedules(&request.schedules);
    let planner = Planner::new(&routes, config);
    let outcome = planner.search(&request.search_request());

    debug!(
        cities = routes.city_count(),
        flights = routes.edge_count(),
        itinerary_flights = ?outcome.itinerary.as_ref().map(Itinerary::flight_count),
        "trip planned"
    );

    PlanResponse {
        flight_plan: outcome.itinerary,
    }
}

/// Run [`plan_trip`] on the blocking pool under a deadline.
///
/// The search has no cancellation points, so a search that misses its
/// deadline is abandoned and runs to completion in the background.
async fn plan_in_background(
    request: Arc<PlanRequest>,
    config: Arc<SearchConfig>,
    timeout: Duration,
) -> Result<PlanResponse, SearchError> {
    let task = tokio::task::spawn_blocking(move || plan_trip(&request, &config));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(e)) => Err(SearchError::Aborted(e.to_string())),
        Err(_) => Err(SearchError::Timeout(timeout)),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Timeout(_) => AppError::Timeout {
                message: e.to_string(),
            },
            SearchError::Aborted(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
