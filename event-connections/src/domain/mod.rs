//! Domain types for event transit connections.
//!
//! This module contains the validated value types and the read-only GTFS
//! records the itinerary planner works on. Value types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod coordinate;
mod itinerary;
mod query;
mod records;
mod time;

pub use coordinate::{Coordinate, CoordinateError, EARTH_RADIUS_KM};
pub use itinerary::ItineraryRow;
pub use query::{Direction, EventInfo, InvalidDirection, Query};
pub use records::{CalendarRecord, RouteRecord, StopRecord, StopTimeRecord, TripRecord};
pub use time::{ScheduleTime, TimeError};
