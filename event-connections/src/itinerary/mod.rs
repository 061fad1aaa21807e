//! Itinerary matching over a static GTFS schedule.
//!
//! This module answers: "which scheduled trips run between the stops
//! nearest to an event's two locations, within the window around its date?"
//!
//! The pipeline resolves the nearest stop to each point, keeps only trips
//! whose service runs on the query weekday, matches trips calling at both
//! stops in the right order, filters them by time window, and emits one
//! row per stop travelled.

mod builder;
mod calendar;
mod distance;
mod error;
mod index;
mod matcher;
mod planner;
mod window;


pub use builder::{build_rows, route_display_name};
pub use calendar::{active_services, active_trips};
pub use distance::{NearestStop, nearest_stop};
pub use error::{ItineraryError, TripFault};
pub use index::StopTimeIndex;
pub use matcher::{candidate_trips, traversal_segment};
pub use planner::{ItineraryPlanner, ItineraryResult, compute_itinerary};
pub use window::{ANCHOR_OFFSET_HOURS, SegmentTimes, TimeWindow, in_window};
