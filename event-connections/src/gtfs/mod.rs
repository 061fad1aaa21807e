//! Static GTFS feed loading.
//!
//! A feed is a directory of CSV files. Only the tables the itinerary
//! planner consumes are read; everything is held in memory.

mod error;
mod parse;

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use tracing::info;

use crate::domain::{CalendarRecord, RouteRecord, StopRecord, StopTimeRecord, TripRecord};
use crate::itinerary::ItineraryPlanner;

pub use error::GtfsError;
pub use parse::{parse_calendar, parse_routes, parse_stop_times, parse_stops, parse_trips};

/// The schedule tables of one GTFS feed.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub stops: Vec<StopRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
    pub routes: Vec<RouteRecord>,
    pub calendar: Vec<CalendarRecord>,
}

impl Feed {
    /// Borrow the tables into a planner.
    pub fn planner(&self) -> ItineraryPlanner<'_> {
        ItineraryPlanner::new(
            &self.stops,
            &self.trips,
            &self.stop_times,
            &self.routes,
            &self.calendar,
        )
    }
}

/// Open a feed file, or `None` if it does not exist.
fn open(dir: &Path, name: &str) -> Result<Option<BufReader<File>>, GtfsError> {
    match File::open(dir.join(name)) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn open_required(dir: &Path, name: &str) -> Result<BufReader<File>, GtfsError> {
    open(dir, name)?.ok_or_else(|| GtfsError::MissingFile(dir.join(name)))
}

/// Load a feed from a directory of GTFS CSV files.
///
/// routes.txt is optional; every other table must be present.
pub fn load_feed(dir: &Path) -> Result<Feed, GtfsError> {
    info!(dir = %dir.display(), "Loading GTFS feed");

    let stops = parse_stops(open_required(dir, parse::STOPS)?)?;
    let trips = parse_trips(open_required(dir, parse::TRIPS)?)?;
    let stop_times = parse_stop_times(open_required(dir, parse::STOP_TIMES)?)?;
    let calendar = parse_calendar(open_required(dir, parse::CALENDAR)?)?;
    let routes = match open(dir, parse::ROUTES)? {
        Some(file) => parse_routes(file)?,
        None => {
            info!("No routes.txt in feed (optional file)");
            Vec::new()
        }
    };

    info!(
        stops = stops.len(),
        trips = trips.len(),
        stop_times = stop_times.len(),
        routes = routes.len(),
        services = calendar.len(),
        "GTFS feed loaded"
    );

    Ok(Feed {
        stops,
        trips,
        stop_times,
        routes,
        calendar,
    })
}
