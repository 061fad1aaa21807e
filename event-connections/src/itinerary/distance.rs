//! Nearest-stop resolution by great-circle distance.

use serde::Serialize;

use crate::domain::{Coordinate, StopRecord};

use super::error::ItineraryError;

/// A stop resolved for a point, with its distance from that point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestStop {
    pub stop: StopRecord,
    pub distance_km: f64,
}

/// Find the stop closest to `point`.
///
/// Single pass over `stops`; ties go to the stop that comes first.
///
/// # Examples
///
/// ```
/// use event_connections::domain::{Coordinate, StopRecord};
/// use event_connections::itinerary::nearest_stop;
///
/// let stops = vec![
///     StopRecord::new("A", "Alpha", Coordinate::new(0.0, 0.0).unwrap()),
///     StopRecord::new("B", "Beta", Coordinate::new(0.0, 1.0).unwrap()),
/// ];
/// let point = Coordinate::new(0.0, 0.9).unwrap();
/// let nearest = nearest_stop(point, &stops).unwrap();
/// assert_eq!(nearest.stop.stop_id, "B");
/// ```
pub fn nearest_stop(
    point: Coordinate,
    stops: &[StopRecord],
) -> Result<NearestStop, ItineraryError> {
    let mut best: Option<(&StopRecord, f64)> = None;

    for stop in stops {
        let distance = point.haversine_km(&stop.location);
        // Strict comparison keeps the first of equally distant stops
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((stop, distance));
        }
    }

    let (stop, distance_km) = best.ok_or(ItineraryError::EmptyStopSet)?;
    Ok(NearestStop {
        stop: stop.clone(),
        distance_km,
    })
}
