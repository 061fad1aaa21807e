//! Itinerary error types.
//!
//! [`ItineraryError`] aborts a whole query. [`TripFault`] excludes a single
//! trip and is reported alongside the results.

use chrono::NaiveDateTime;

use crate::domain::TimeError;

/// Errors that abort an itinerary query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// Nearest-stop resolution was attempted against an empty stop table
    #[error("cannot resolve nearest stop: stop set is empty")]
    EmptyStopSet,

    /// The time window reaches past the representable date range
    #[error("a {window_hours}h window around {anchor} is out of range")]
    WindowOutOfRange {
        anchor: NaiveDateTime,
        window_hours: u32,
    },
}

/// Data-integrity problems that exclude one trip from the results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripFault {
    /// A stop in the trip's traversal segment is missing from the stop table
    #[error("trip {trip_id}: stop {stop_id} not found in stop table")]
    MissingStop { trip_id: String, stop_id: String },

    /// The origin or destination stop has no row in the trip's stop times
    #[error("trip {trip_id}: origin or destination stop missing from stop times")]
    MissingEndpoint { trip_id: String },

    /// A segment endpoint time is absent or cannot be parsed
    #[error("trip {trip_id}: bad time {value:?}: {source}")]
    InvalidTime {
        trip_id: String,
        value: String,
        #[source]
        source: TimeError,
    },
}

impl TripFault {
    /// The trip this fault excluded.
    pub fn trip_id(&self) -> &str {
        match self {
            TripFault::MissingStop { trip_id, .. }
            | TripFault::MissingEndpoint { trip_id }
            | TripFault::InvalidTime { trip_id, .. } => trip_id,
        }
    }
}
