//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{self, Coordinate, Direction, EventInfo};
use crate::itinerary::{ItineraryError, nearest_stop};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops/nearest", get(find_nearest_stop))
        .route("/api/itinerary", post(plan_itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Nearest stop to a point.
async fn find_nearest_stop(
    State(state): State<AppState>,
    query: Result<Query<NearestStopRequest>, QueryRejection>,
) -> Result<Json<StopResult>, AppError> {
    let Query(req) = query.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;
    let point = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let nearest = nearest_stop(point, &state.feed.stops)?;
    Ok(Json(StopResult::from(&nearest)))
}

/// Compute the itinerary to or from an event.
async fn plan_itinerary(
    State(state): State<AppState>,
    body: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let direction = req
        .direction
        .as_deref()
        .map(str::parse::<Direction>)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?
        .unwrap_or_default();
    let window_hours = req
        .window_hours
        .unwrap_or(state.config.default_window_hours);

    let event = EventInfo {
        match_id: req.match_id,
        date: req.date,
        kickoff: req.kickoff,
        home: req.home,
        away: req.away,
    };
    let query = domain::Query::for_event(&event, direction, window_hours);
    let result = state.feed.planner().compute(&query)?;

    info!(
        match_id = event.match_id.as_deref().unwrap_or(""),
        %direction,
        date = %event.date,
        trips = result.trip_ids().len(),
        rows = result.rows().len(),
        faults = result.faults.len(),
        "Computed itinerary"
    );

    Ok(Json(ItineraryResponse::from(result)))
}

// Error handling

/// Error returned by the HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    ServiceUnavailable { message: String },
}

impl From<ItineraryError> for AppError {
    fn from(e: ItineraryError) -> Self {
        match e {
            ItineraryError::EmptyStopSet => AppError::ServiceUnavailable {
                message: format!("{e}; is a GTFS feed loaded?"),
            },
            ItineraryError::WindowOutOfRange { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::ServiceUnavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
