//! The itinerary pipeline.
//!
//! Resolves the nearest stops for a query, restricts the trip universe to
//! services running that weekday, and keeps every trip that runs from the
//! origin stop to the destination stop inside the query's time window.
//! Trips are evaluated independently; a malformed trip is reported as a
//! [`TripFault`] and never aborts the query.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::domain::{
    CalendarRecord, ItineraryRow, Query, RouteRecord, StopRecord, StopTimeRecord, TripRecord,
};

use super::builder::build_rows;
use super::calendar::{active_services, active_trips};
use super::distance::{NearestStop, nearest_stop};
use super::error::{ItineraryError, TripFault};
use super::index::StopTimeIndex;
use super::matcher::{candidate_trips, traversal_segment};
use super::window::{TimeWindow, in_window};

/// Result of an itinerary query.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryResult {
    /// Stop resolved for the query origin.
    pub origin: NearestStop,
    /// Stop resolved for the query destination.
    pub destination: NearestStop,
    /// Rows of all qualifying trips, by trip id then stop sequence.
    pub rows: Vec<ItineraryRow>,
    /// Trips excluded because of bad data.
    #[serde(serialize_with = "serialize_faults")]
    pub faults: Vec<TripFault>,
}

impl ItineraryResult {
    /// The itinerary rows.
    pub fn rows(&self) -> &[ItineraryRow] {
        &self.rows
    }

    /// Consume the result, keeping only the rows.
    pub fn into_rows(self) -> Vec<ItineraryRow> {
        self.rows
    }

    /// Ids of the qualifying trips, in result order.
    pub fn trip_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rows.iter().map(|r| r.trip_id.as_str()).collect();
        ids.dedup();
        ids
    }
}

fn serialize_faults<S: serde::Serializer>(
    faults: &[TripFault],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(faults.iter().map(|f| f.to_string()))
}

/// Itinerary planner over borrowed schedule tables.
#[derive(Debug, Clone, Copy)]
pub struct ItineraryPlanner<'a> {
    stops: &'a [StopRecord],
    trips: &'a [TripRecord],
    stop_times: &'a [StopTimeRecord],
    routes: &'a [RouteRecord],
    calendar: &'a [CalendarRecord],
}

impl<'a> ItineraryPlanner<'a> {
    /// Create a new planner.
    pub fn new(
        stops: &'a [StopRecord],
        trips: &'a [TripRecord],
        stop_times: &'a [StopTimeRecord],
        routes: &'a [RouteRecord],
        calendar: &'a [CalendarRecord],
    ) -> Self {
        Self {
            stops,
            trips,
            stop_times,
            routes,
            calendar,
        }
    }

    /// Find every trip connecting the query's nearest stops within its window.
    pub fn compute(&self, query: &Query) -> Result<ItineraryResult, ItineraryError> {
        let origin = nearest_stop(query.origin, self.stops)?;
        let destination = nearest_stop(query.destination, self.stops)?;
        debug!(
            origin = %origin.stop.stop_id,
            origin_km = origin.distance_km,
            destination = %destination.stop.stop_id,
            destination_km = destination.distance_km,
            "Resolved nearest stops"
        );

        let services = active_services(query.date, self.calendar);
        let active = active_trips(self.trips, &services);
        let index = StopTimeIndex::build(self.stop_times, &active);
        debug!(
            date = %query.date,
            services = services.len(),
            active_trips = active.len(),
            indexed_trips = index.trip_count(),
            "Restricted trip universe"
        );

        let origin_id = origin.stop.stop_id.as_str();
        let dest_id = destination.stop.stop_id.as_str();
        let candidates = candidate_trips(&index, origin_id, dest_id);
        debug!(candidates = candidates.len(), "Found trips calling at both stops");

        let window = TimeWindow::around(query.direction, query.anchor(), query.window_hours)?;

        let ctx = TripContext {
            query,
            index: &index,
            origin_id,
            dest_id,
            window,
            stops_by_id: first_by_id(self.stops, |s| &s.stop_id),
            routes_by_id: first_by_id(self.routes, |r| &r.route_id),
        };

        let mut rows = Vec::new();
        let mut faults = Vec::new();

        for trip_id in candidates {
            let Some(trip) = active.get(trip_id) else {
                continue;
            };

            match ctx.evaluate(trip) {
                Ok(Some(trip_rows)) => rows.extend(trip_rows),
                Ok(None) => {}
                Err(fault) => {
                    warn!(trip_id, %fault, "Skipping trip");
                    faults.push(fault);
                }
            }
        }

        debug!(rows = rows.len(), faults = faults.len(), "Itinerary complete");

        Ok(ItineraryResult {
            origin,
            destination,
            rows,
            faults,
        })
    }
}

/// Per-query state shared by every trip evaluation.
struct TripContext<'q, 'a> {
    query: &'q Query,
    index: &'q StopTimeIndex<'a>,
    origin_id: &'q str,
    dest_id: &'q str,
    window: TimeWindow,
    stops_by_id: HashMap<&'a str, &'a StopRecord>,
    routes_by_id: HashMap<&'a str, &'a RouteRecord>,
}

impl TripContext<'_, '_> {
    /// Rows for one trip, or `None` when it does not qualify.
    fn evaluate(&self, trip: &TripRecord) -> Result<Option<Vec<ItineraryRow>>, TripFault> {
        let trip_id = trip.trip_id.as_str();
        let rows = self.index.trip_rows(trip_id);

        let Some(segment) = traversal_segment(trip_id, rows, self.origin_id, self.dest_id)? else {
            trace!(trip_id, "Trip runs from destination to origin");
            return Ok(None);
        };

        let query = self.query;
        if !in_window(trip_id, segment, query.direction, query.date, &self.window)? {
            trace!(trip_id, "Trip outside time window");
            return Ok(None);
        }

        build_rows(trip, segment, &self.routes_by_id, &self.stops_by_id, query).map(Some)
    }
}

/// Index records by id; the first record wins when an id repeats.
fn first_by_id<'a, T>(
    records: &'a [T],
    id: impl Fn(&'a T) -> &'a String,
) -> HashMap<&'a str, &'a T> {
    let mut by_id = HashMap::with_capacity(records.len());
    for record in records {
        by_id.entry(id(record).as_str()).or_insert(record);
    }
    by_id
}

/// Compute the itinerary for `query` over the given schedule tables.
pub fn compute_itinerary(
    query: &Query,
    stops: &[StopRecord],
    trips: &[TripRecord],
    stop_times: &[StopTimeRecord],
    routes: &[RouteRecord],
    calendar: &[CalendarRecord],
) -> Result<ItineraryResult, ItineraryError> {
    ItineraryPlanner::new(stops, trips, stop_times, routes, calendar).compute(query)
}
