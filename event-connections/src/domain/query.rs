//! Itinerary queries.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Whether the traveller leaves after the event anchor or arrives before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Trips are matched on their departure from the origin stop.
    #[default]
    Departure,
    /// Trips are matched on their arrival at the destination stop.
    Arrival,
}

/// Error returned when parsing an unknown direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?} (expected \"departure\" or \"arrival\")")]
pub struct InvalidDirection(String);

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("departure") {
            Ok(Direction::Departure)
        } else if s.eq_ignore_ascii_case("arrival") {
            Ok(Direction::Arrival)
        } else {
            Err(InvalidDirection(s.to_string()))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Departure => "departure",
            Direction::Arrival => "arrival",
        })
    }
}

/// An event with a home and an away location, e.g. a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// Caller-supplied key copied onto every result row.
    pub match_id: Option<String>,
    pub date: NaiveDate,
    /// Event start; when absent the event is anchored at midnight.
    #[serde(default)]
    pub kickoff: Option<NaiveTime>,
    pub home: Coordinate,
    pub away: Coordinate,
}

/// A single itinerary query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub date: NaiveDate,
    /// Time of day on `date` the window is measured from; midnight by default.
    pub anchor_time: NaiveTime,
    /// Width of the time window beyond the fixed anchor offset.
    pub window_hours: u32,
    pub direction: Direction,
    /// Correlation key (e.g. a match id) copied onto every result row.
    pub correlation_key: Option<String>,
}

impl Query {
    /// Create a query between two points.
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        date: NaiveDate,
        window_hours: u32,
        direction: Direction,
    ) -> Self {
        Self {
            origin,
            destination,
            date,
            anchor_time: NaiveTime::MIN,
            window_hours,
            direction,
            correlation_key: None,
        }
    }

    /// Measure the window from a time of day other than midnight.
    pub fn with_anchor_time(mut self, anchor_time: NaiveTime) -> Self {
        self.anchor_time = anchor_time;
        self
    }

    /// The instant the time window is measured from.
    pub fn anchor(&self) -> NaiveDateTime {
        self.date.and_time(self.anchor_time)
    }

    /// Attach a correlation key.
    pub fn with_correlation_key(mut self, key: impl Into<String>) -> Self {
        self.correlation_key = Some(key.into());
        self
    }

    /// Build the query for travelling to or from an event.
    ///
    /// Departure queries run home to away; arrival queries run away to home.
    ///
    /// # Examples
    ///
    /// ```
    /// use event_connections::domain::{Coordinate, Direction, EventInfo, Query};
    /// use chrono::NaiveDate;
    ///
    /// let event = EventInfo {
    ///     match_id: Some("m-1".into()),
    ///     date: NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
    ///     kickoff: None,
    ///     home: Coordinate::new(48.2188, 11.6247).unwrap(),
    ///     away: Coordinate::new(51.4926, 7.4519).unwrap(),
    /// };
    ///
    /// let q = Query::for_event(&event, Direction::Arrival, 3);
    /// assert_eq!(q.origin, event.away);
    /// assert_eq!(q.destination, event.home);
    /// assert_eq!(q.correlation_key.as_deref(), Some("m-1"));
    /// ```
    pub fn for_event(event: &EventInfo, direction: Direction, window_hours: u32) -> Self {
        let (origin, destination) = match direction {
            Direction::Departure => (event.home, event.away),
            Direction::Arrival => (event.away, event.home),
        };
        Self {
            origin,
            destination,
            date: event.date,
            anchor_time: event.kickoff.unwrap_or(NaiveTime::MIN),
            window_hours,
            direction,
            correlation_key: event.match_id.clone(),
        }
    }
}
