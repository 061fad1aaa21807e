//! Itinerary output rows.

use chrono::NaiveDate;
use serde::Serialize;

/// One stop of a qualifying trip, between origin and destination inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryRow {
    /// Caller's correlation key (e.g. a match id).
    pub match_id: Option<String>,
    pub trip_id: String,
    /// Resolved route display name.
    pub route: String,
    pub stop_sequence: u32,
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    /// Arrival time as scheduled; empty if absent.
    pub arrival: String,
    /// Departure time as scheduled; empty if absent.
    pub departure: String,
    pub date: NaiveDate,
}
