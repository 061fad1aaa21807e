//! Trip matching between an origin and a destination stop.

use crate::domain::StopTimeRecord;

use super::error::TripFault;
use super::index::StopTimeIndex;

/// Active trips calling at both stops, sorted by trip id.
pub fn candidate_trips<'a>(
    index: &StopTimeIndex<'a>,
    origin_stop_id: &str,
    dest_stop_id: &str,
) -> Vec<&'a str> {
    let (Some(at_origin), Some(at_dest)) =
        (index.trips_at(origin_stop_id), index.trips_at(dest_stop_id))
    else {
        return Vec::new();
    };

    let mut trips: Vec<&'a str> = at_origin.intersection(at_dest).copied().collect();
    trips.sort_unstable();
    trips
}

/// Cut the part of a trip that runs from origin to destination.
///
/// `rows` must be in stop_sequence order. Uses the first row at each stop.
/// Returns `Ok(None)` when the trip reaches the destination before (or at
/// the same row as) the origin, and a fault when either stop is missing.
pub fn traversal_segment<'s, 'a>(
    trip_id: &str,
    rows: &'s [&'a StopTimeRecord],
    origin_stop_id: &str,
    dest_stop_id: &str,
) -> Result<Option<&'s [&'a StopTimeRecord]>, TripFault> {
    let origin = rows.iter().position(|r| r.stop_id == origin_stop_id);
    let dest = rows.iter().position(|r| r.stop_id == dest_stop_id);

    let (Some(origin), Some(dest)) = (origin, dest) else {
        return Err(TripFault::MissingEndpoint {
            trip_id: trip_id.to_string(),
        });
    };

    if origin >= dest {
        return Ok(None);
    }

    Ok(Some(&rows[origin..=dest]))
}
