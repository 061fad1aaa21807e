//! Itinerary row materialization.

use std::collections::HashMap;

use crate::domain::{ItineraryRow, Query, RouteRecord, StopRecord, StopTimeRecord, TripRecord};

use super::error::TripFault;

/// Display name for a trip's route; the route id when the route is unknown.
pub fn route_display_name(trip: &TripRecord, routes: &HashMap<&str, &RouteRecord>) -> String {
    routes
        .get(trip.route_id.as_str())
        .map(|r| r.display_name())
        .unwrap_or(trip.route_id.as_str())
        .to_string()
}

/// One row per stop of the segment, in sequence order.
///
/// Fails on the first stop missing from `stops`; no partial rows are
/// returned for the trip.
pub fn build_rows(
    trip: &TripRecord,
    segment: &[&StopTimeRecord],
    routes: &HashMap<&str, &RouteRecord>,
    stops: &HashMap<&str, &StopRecord>,
    query: &Query,
) -> Result<Vec<ItineraryRow>, TripFault> {
    let route = route_display_name(trip, routes);

    segment
        .iter()
        .map(|st| {
            let stop = stops
                .get(st.stop_id.as_str())
                .ok_or_else(|| TripFault::MissingStop {
                    trip_id: trip.trip_id.clone(),
                    stop_id: st.stop_id.clone(),
                })?;

            Ok(ItineraryRow {
                match_id: query.correlation_key.clone(),
                trip_id: trip.trip_id.clone(),
                route: route.clone(),
                stop_sequence: st.stop_sequence,
                stop_id: stop.stop_id.clone(),
                stop_name: stop.stop_name.clone(),
                stop_lat: stop.location.lat(),
                stop_lon: stop.location.lon(),
                arrival: st.arrival_time.clone().unwrap_or_default(),
                departure: st.departure_time.clone().unwrap_or_default(),
                date: query.date,
            })
        })
        .collect()
}
