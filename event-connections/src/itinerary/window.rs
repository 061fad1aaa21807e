//! Time-window filtering.
//!
//! Windows are anchored at the query's anchor instant (midnight of the
//! query date unless the query says otherwise), shifted by a fixed
//! two-hour offset. Departure queries look forward from the anchor and test
//! when the trip leaves the origin; arrival queries look backward and test
//! when it reaches the destination.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::{Direction, ScheduleTime, StopTimeRecord};

use super::error::{ItineraryError, TripFault};

/// Fixed offset between the query anchor and the window edge, in hours.
pub const ANCHOR_OFFSET_HOURS: i64 = 2;

/// An inclusive time range on the query date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Window bounds for a query.
    ///
    /// * departure: `[midnight + 2h, midnight + 2h + window]`
    /// * arrival: `[midnight - (2h + window), midnight + 2h]`
    ///
    /// # Examples
    ///
    /// ```
    /// use event_connections::domain::Direction;
    /// use event_connections::itinerary::TimeWindow;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
    /// let w = TimeWindow::for_query(Direction::Departure, date, 3).unwrap();
    /// assert_eq!(w.start.to_string(), "2024-03-16 02:00:00");
    /// assert_eq!(w.end.to_string(), "2024-03-16 05:00:00");
    ///
    /// let w = TimeWindow::for_query(Direction::Arrival, date, 3).unwrap();
    /// assert_eq!(w.start.to_string(), "2024-03-15 19:00:00");
    /// assert_eq!(w.end.to_string(), "2024-03-16 02:00:00");
    /// ```
    pub fn for_query(
        direction: Direction,
        date: NaiveDate,
        window_hours: u32,
    ) -> Result<Self, ItineraryError> {
        Self::around(direction, date.and_time(NaiveTime::MIN), window_hours)
    }

    /// Window bounds measured from an arbitrary anchor instant.
    ///
    /// Fails when either bound falls outside chrono's date range.
    pub fn around(
        direction: Direction,
        baseline: NaiveDateTime,
        window_hours: u32,
    ) -> Result<Self, ItineraryError> {
        let offset = Duration::hours(ANCHOR_OFFSET_HOURS);
        let reach = offset + Duration::hours(i64::from(window_hours));

        let window = match direction {
            Direction::Departure => baseline
                .checked_add_signed(offset)
                .zip(baseline.checked_add_signed(reach))
                .map(|(start, end)| Self { start, end }),
            Direction::Arrival => baseline
                .checked_sub_signed(reach)
                .zip(baseline.checked_add_signed(offset))
                .map(|(start, end)| Self { start, end }),
        };

        window.ok_or(ItineraryError::WindowOutOfRange {
            anchor: baseline,
            window_hours,
        })
    }

    /// Whether `t` lies in the window, both ends inclusive.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

/// When a traversal segment leaves its origin and reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTimes {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl SegmentTimes {
    /// Read the origin departure and destination arrival of a segment.
    ///
    /// Both are anchored to `date`. A missing or unparseable time is a fault.
    pub fn from_segment(
        trip_id: &str,
        segment: &[&StopTimeRecord],
        date: NaiveDate,
    ) -> Result<Self, TripFault> {
        let (Some(first), Some(last)) = (segment.first(), segment.last()) else {
            return Err(TripFault::MissingEndpoint {
                trip_id: trip_id.to_string(),
            });
        };

        let departure = parse_on(trip_id, first.departure_time.as_deref(), date)?;
        let arrival = parse_on(trip_id, last.arrival_time.as_deref(), date)?;
        Ok(Self { departure, arrival })
    }

    /// The timestamp tested against the window for this direction.
    pub fn relevant(&self, direction: Direction) -> NaiveDateTime {
        match direction {
            Direction::Departure => self.departure,
            Direction::Arrival => self.arrival,
        }
    }
}

fn parse_on(
    trip_id: &str,
    value: Option<&str>,
    date: NaiveDate,
) -> Result<NaiveDateTime, TripFault> {
    let value = value.unwrap_or("");
    ScheduleTime::parse(value)
        .map(|t| t.on(date))
        .map_err(|source| TripFault::InvalidTime {
            trip_id: trip_id.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Whether a segment falls within the window for `direction`.
pub fn in_window(
    trip_id: &str,
    segment: &[&StopTimeRecord],
    direction: Direction,
    date: NaiveDate,
    window: &TimeWindow,
) -> Result<bool, TripFault> {
    let times = SegmentTimes::from_segment(trip_id, segment, date)?;
    Ok(window.contains(times.relevant(direction)))
}
