//! Service-calendar activation.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::domain::{CalendarRecord, TripRecord};

/// Service ids that operate on the weekday of `date`.
pub fn active_services(date: NaiveDate, calendar: &[CalendarRecord]) -> HashSet<&str> {
    calendar
        .iter()
        .filter(|c| c.runs_on_date(date))
        .map(|c| c.service_id.as_str())
        .collect()
}

/// Trips whose service is active, keyed by trip id.
pub fn active_trips<'a>(
    trips: &'a [TripRecord],
    services: &HashSet<&str>,
) -> HashMap<&'a str, &'a TripRecord> {
    trips
        .iter()
        .filter(|t| services.contains(t.service_id.as_str()))
        .map(|t| (t.trip_id.as_str(), t))
        .collect()
}
