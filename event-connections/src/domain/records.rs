//! GTFS schedule records.
//!
//! These are read-only snapshots of the five GTFS tables the itinerary
//! planner consumes. They are produced by the loader in [`crate::gtfs`] or
//! built directly by callers that already hold parsed data.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use super::Coordinate;

/// A physical stop (from stops.txt).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopRecord {
    pub stop_id: String,
    pub stop_name: String,
    pub location: Coordinate,
}

impl StopRecord {
    /// Create a stop record.
    pub fn new(
        stop_id: impl Into<String>,
        stop_name: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            stop_id: stop_id.into(),
            stop_name: stop_name.into(),
            location,
        }
    }
}

/// One scheduled run of a vehicle (from trips.txt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub trip_id: String,
    /// Foreign key into the calendar.
    pub service_id: String,
    /// Foreign key into routes.
    pub route_id: String,
}

impl TripRecord {
    /// Create a trip record.
    pub fn new(
        trip_id: impl Into<String>,
        service_id: impl Into<String>,
        route_id: impl Into<String>,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            service_id: service_id.into(),
            route_id: route_id.into(),
        }
    }
}

/// A single call of a trip at a stop (from stop_times.txt).
///
/// Times are kept as the raw schedule strings; they are parsed only when a
/// trip is tested against a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    /// Position along the trip; strictly increasing within a trip.
    pub stop_sequence: u32,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

impl StopTimeRecord {
    /// Create a stop time with both arrival and departure set.
    pub fn new(
        trip_id: impl Into<String>,
        stop_id: impl Into<String>,
        stop_sequence: u32,
        arrival_time: &str,
        departure_time: &str,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            stop_id: stop_id.into(),
            stop_sequence,
            arrival_time: Some(arrival_time.to_string()),
            departure_time: Some(departure_time.to_string()),
        }
    }
}

/// A transit route (from routes.txt).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteRecord {
    pub route_id: String,
    pub route_long_name: Option<String>,
    pub route_short_name: Option<String>,
}

impl RouteRecord {
    /// Create a route record.
    pub fn new(
        route_id: impl Into<String>,
        route_long_name: Option<&str>,
        route_short_name: Option<&str>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            route_long_name: route_long_name.map(str::to_string),
            route_short_name: route_short_name.map(str::to_string),
        }
    }

    /// Name shown to riders.
    ///
    /// Prefers the long name, then the short name, then the route id.
    /// Empty names count as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use event_connections::domain::RouteRecord;
    ///
    /// let r = RouteRecord::new("R1", Some("Rhein-Express"), Some("RE5"));
    /// assert_eq!(r.display_name(), "Rhein-Express");
    ///
    /// let r = RouteRecord::new("R1", Some(""), Some("RE5"));
    /// assert_eq!(r.display_name(), "RE5");
    ///
    /// let r = RouteRecord::new("R1", None, Some(""));
    /// assert_eq!(r.display_name(), "R1");
    /// ```
    pub fn display_name(&self) -> &str {
        non_empty(&self.route_long_name)
            .or_else(|| non_empty(&self.route_short_name))
            .unwrap_or(&self.route_id)
    }
}

fn non_empty(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|s| !s.is_empty())
}

/// Weekly operating pattern of a service (from calendar.txt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRecord {
    pub service_id: String,
    /// Operating flags, Monday first.
    pub days: [bool; 7],
}

impl CalendarRecord {
    /// Create a calendar record from Monday-first weekday flags.
    pub fn new(service_id: impl Into<String>, days: [bool; 7]) -> Self {
        Self {
            service_id: service_id.into(),
            days,
        }
    }

    /// Create a calendar record that operates only on the given weekdays.
    pub fn on_weekdays(service_id: impl Into<String>, weekdays: &[Weekday]) -> Self {
        let mut days = [false; 7];
        for day in weekdays {
            days[day.num_days_from_monday() as usize] = true;
        }
        Self::new(service_id, days)
    }

    /// Whether the service operates on this weekday.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.days[weekday.num_days_from_monday() as usize]
    }

    /// Whether the service operates on the weekday of this date.
    pub fn runs_on_date(&self, date: NaiveDate) -> bool {
        self.runs_on(date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_name_prefers_long_name() {
        let r = RouteRecord::new("R1", Some("Long"), Some("S"));
        assert_eq!(r.display_name(), "Long");
    }

    #[test]
    fn route_name_falls_back_to_short_name() {
        let r = RouteRecord::new("R1", Some(""), Some("S1"));
        assert_eq!(r.display_name(), "S1");

        let r = RouteRecord::new("R1", None, Some("S1"));
        assert_eq!(r.display_name(), "S1");
    }

    #[test]
    fn route_name_falls_back_to_id() {
        let r = RouteRecord::new("R1", Some(""), Some(""));
        assert_eq!(r.display_name(), "R1");

        let r = RouteRecord::new("42", None, None);
        assert_eq!(r.display_name(), "42");
    }

    #[test]
    fn calendar_weekdays() {
        let cal = CalendarRecord::on_weekdays("S1", &[Weekday::Mon, Weekday::Sat]);
        assert!(cal.runs_on(Weekday::Mon));
        assert!(cal.runs_on(Weekday::Sat));
        assert!(!cal.runs_on(Weekday::Tue));
        assert!(!cal.runs_on(Weekday::Sun));
    }

    #[test]
    fn calendar_by_date() {
        let cal = CalendarRecord::on_weekdays("S1", &[Weekday::Mon]);
        // 2024-03-18 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 19).unwrap();
        assert!(cal.runs_on_date(monday));
        assert!(!cal.runs_on_date(tuesday));
    }

    #[test]
    fn stop_time_constructor_sets_both_times() {
        let st = StopTimeRecord::new("T1", "A", 1, "10:00:00", "10:01:00");
        assert_eq!(st.arrival_time.as_deref(), Some("10:00:00"));
        assert_eq!(st.departure_time.as_deref(), Some("10:01:00"));
    }
}
