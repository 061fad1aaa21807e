//! Schedule time-of-day handling.
//!
//! GTFS stop times are wall-clock strings without a date ("HH:MM:SS").
//! They are anchored to the query date when compared against a time window.
//! GTFS allows hours of 24 and above for trips that run past midnight on
//! the same service day; those are rejected here rather than wrapped.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A same-day time of day from a GTFS schedule.
///
/// # Examples
///
/// ```
/// use event_connections::domain::ScheduleTime;
/// use chrono::NaiveDate;
///
/// let t = ScheduleTime::parse("07:05:30").unwrap();
/// assert_eq!(t.to_string(), "07:05:30");
///
/// // Single-digit hours are accepted
/// assert_eq!(ScheduleTime::parse("7:05:30").unwrap(), t);
///
/// // Post-midnight service times are not supported
/// assert!(ScheduleTime::parse("24:10:00").is_err());
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(t.on(date).to_string(), "2024-03-15 07:05:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime(NaiveTime);

impl ScheduleTime {
    /// Parse a time from "H:MM:SS" or "HH:MM:SS" format.
    ///
    /// Hours must be 0-23; minutes and seconds 0-59.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected HH:MM:SS format"));
        };

        if h.is_empty() || h.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        let hour = parse_digits(h).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new(
                "hour must be 0-23 (times past midnight are not supported)",
            ));
        }

        if m.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }
        let minute = parse_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        if sec.len() != 2 {
            return Err(TimeError::new("second must be two digits"));
        }
        let second = parse_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::new("invalid time"))?;
        Ok(Self(time))
    }

    /// Anchor this time of day to a calendar date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({self})")
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

/// Parse a run of ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    s.chars().try_fold(0u32, |acc, c| {
        let d = c.to_digit(10)?;
        acc.checked_mul(10)?.checked_add(d)
    })
}
