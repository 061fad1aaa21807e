//! Stop-time indexes for one query.
//!
//! Built once per query over the active trips, so matching never rescans
//! the full stop_times table per trip.

use std::collections::{HashMap, HashSet};

use crate::domain::{StopTimeRecord, TripRecord};

/// Stop times of active trips, grouped by trip and by stop.
#[derive(Debug, Default)]
pub struct StopTimeIndex<'a> {
    /// trip_id -> rows sorted by stop_sequence
    by_trip: HashMap<&'a str, Vec<&'a StopTimeRecord>>,
    /// stop_id -> trips calling there
    by_stop: HashMap<&'a str, HashSet<&'a str>>,
}

impl<'a> StopTimeIndex<'a> {
    /// Index the rows of `stop_times` that belong to an active trip.
    pub fn build(
        stop_times: &'a [StopTimeRecord],
        active: &HashMap<&'a str, &'a TripRecord>,
    ) -> Self {
        let mut by_trip: HashMap<&'a str, Vec<&'a StopTimeRecord>> = HashMap::new();
        let mut by_stop: HashMap<&'a str, HashSet<&'a str>> = HashMap::new();

        for st in stop_times {
            let Some((&trip_id, _)) = active.get_key_value(st.trip_id.as_str()) else {
                continue;
            };
            by_trip.entry(trip_id).or_default().push(st);
            by_stop
                .entry(st.stop_id.as_str())
                .or_default()
                .insert(trip_id);
        }

        for rows in by_trip.values_mut() {
            rows.sort_by_key(|st| st.stop_sequence);
        }

        Self { by_trip, by_stop }
    }

    /// Trips with at least one row at `stop_id`.
    pub fn trips_at(&self, stop_id: &str) -> Option<&HashSet<&'a str>> {
        self.by_stop.get(stop_id)
    }

    /// Rows of a trip in stop_sequence order; empty if the trip is unknown.
    pub fn trip_rows(&self, trip_id: &str) -> &[&'a StopTimeRecord] {
        self.by_trip
            .get(trip_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of indexed trips.
    pub fn trip_count(&self) -> usize {
        self.by_trip.len()
    }
}
