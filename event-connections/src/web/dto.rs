//! Data transfer objects for web requests and responses.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, ItineraryRow};
use crate::itinerary::{ItineraryResult, NearestStop};

/// Query string of the nearest-stop lookup.
#[derive(Debug, Deserialize)]
pub struct NearestStopRequest {
    pub lat: f64,
    pub lon: f64,
}

/// Request to compute the itinerary for an event.
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    /// Copied onto every returned row
    pub match_id: Option<String>,

    /// Event date (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Event start (HH:MM:SS); the window is anchored at midnight without it
    pub kickoff: Option<NaiveTime>,

    pub home: Coordinate,

    pub away: Coordinate,

    /// "departure" (default) or "arrival"
    pub direction: Option<String>,

    /// Defaults to the server's configured window
    pub window_hours: Option<u32>,
}

/// A resolved stop.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub stop_id: String,
    pub stop_name: String,
    pub lat: f64,
    pub lon: f64,

    /// Great-circle distance from the requested point
    pub distance_km: f64,
}

/// Response for an itinerary request.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub origin: StopResult,
    pub destination: StopResult,
    pub rows: Vec<ItineraryRow>,

    /// Trips skipped because of bad schedule data
    pub faults: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&NearestStop> for StopResult {
    fn from(nearest: &NearestStop) -> Self {
        Self {
            stop_id: nearest.stop.stop_id.clone(),
            stop_name: nearest.stop.stop_name.clone(),
            lat: nearest.stop.location.lat(),
            lon: nearest.stop.location.lon(),
            distance_km: nearest.distance_km,
        }
    }
}

impl From<ItineraryResult> for ItineraryResponse {
    fn from(result: ItineraryResult) -> Self {
        Self {
            origin: StopResult::from(&result.origin),
            destination: StopResult::from(&result.destination),
            faults: result.faults.iter().map(|f| f.to_string()).collect(),
            rows: result.rows,
        }
    }
}
