//! CSV parsers for the five GTFS tables.
//!
//! Columns are located by header name so feeds may order them freely and
//! carry extra columns. Rows with an empty primary key are skipped.

use std::io::Read;

use csv::{StringRecord, Trim};
use tracing::warn;

use crate::domain::{
    CalendarRecord, Coordinate, RouteRecord, StopRecord, StopTimeRecord, TripRecord,
};

use super::error::GtfsError;

pub const STOPS: &str = "stops.txt";
pub const TRIPS: &str = "trips.txt";
pub const STOP_TIMES: &str = "stop_times.txt";
pub const ROUTES: &str = "routes.txt";
pub const CALENDAR: &str = "calendar.txt";

const WEEKDAY_COLUMNS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Header positions of one GTFS file.
struct Columns {
    file: &'static str,
    headers: StringRecord,
}

impl Columns {
    fn read<R: Read>(file: &'static str, rdr: &mut csv::Reader<R>) -> Result<Self, GtfsError> {
        Ok(Self {
            file,
            headers: rdr.headers()?.clone(),
        })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == column)
    }

    fn required(&self, column: &'static str) -> Result<usize, GtfsError> {
        self.optional(column).ok_or(GtfsError::MissingColumn {
            file: self.file,
            column,
        })
    }
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(Trim::All).from_reader(source)
}

/// Non-empty value of a column, if the column exists.
fn field(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i)).filter(|s| !s.is_empty())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn coordinate(record: &StringRecord, idx_lat: usize, idx_lon: usize) -> Option<Coordinate> {
    let lat = field(record, Some(idx_lat))?.parse().ok()?;
    let lon = field(record, Some(idx_lon))?.parse().ok()?;
    Coordinate::new(lat, lon).ok()
}

/// Parse stops.txt.
///
/// Stops without a usable coordinate cannot be matched to a point and are
/// skipped.
pub fn parse_stops<R: Read>(source: R) -> Result<Vec<StopRecord>, GtfsError> {
    let mut rdr = reader(source);
    let cols = Columns::read(STOPS, &mut rdr)?;
    let idx_id = cols.required("stop_id")?;
    let idx_name = cols.optional("stop_name");
    let idx_lat = cols.required("stop_lat")?;
    let idx_lon = cols.required("stop_lon")?;

    let mut stops = Vec::new();
    let mut skipped = 0usize;
    let mut unlocated = 0usize;
    for result in rdr.records() {
        let record = result?;
        let Some(stop_id) = field(&record, Some(idx_id)) else {
            skipped += 1;
            continue;
        };
        let Some(location) = coordinate(&record, idx_lat, idx_lon) else {
            unlocated += 1;
            continue;
        };
        let name = field(&record, idx_name).unwrap_or_default();
        stops.push(StopRecord::new(stop_id, name, location));
    }
    if skipped > 0 {
        warn!(skipped, "Skipped stops.txt records with empty stop_id");
    }
    if unlocated > 0 {
        warn!(unlocated, "Skipped stops.txt records without valid coordinates");
    }
    Ok(stops)
}

/// Parse trips.txt.
pub fn parse_trips<R: Read>(source: R) -> Result<Vec<TripRecord>, GtfsError> {
    let mut rdr = reader(source);
    let cols = Columns::read(TRIPS, &mut rdr)?;
    let idx_trip = cols.required("trip_id")?;
    let idx_route = cols.required("route_id")?;
    let idx_service = cols.required("service_id")?;

    let mut trips = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let Some(trip_id) = field(&record, Some(idx_trip)) else {
            skipped += 1;
            continue;
        };
        trips.push(TripRecord::new(
            trip_id,
            field(&record, Some(idx_service)).unwrap_or_default(),
            field(&record, Some(idx_route)).unwrap_or_default(),
        ));
    }
    if skipped > 0 {
        warn!(skipped, "Skipped trips.txt records with empty trip_id");
    }
    Ok(trips)
}

/// Parse stop_times.txt.
///
/// Times are kept as written; they are validated only when a trip is
/// checked against a time window.
pub fn parse_stop_times<R: Read>(source: R) -> Result<Vec<StopTimeRecord>, GtfsError> {
    let mut rdr = reader(source);
    let cols = Columns::read(STOP_TIMES, &mut rdr)?;
    let idx_trip = cols.required("trip_id")?;
    let idx_stop = cols.required("stop_id")?;
    let idx_seq = cols.required("stop_sequence")?;
    let idx_arr = cols.optional("arrival_time");
    let idx_dep = cols.optional("departure_time");

    let mut stop_times = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let (Some(trip_id), Some(stop_id)) =
            (field(&record, Some(idx_trip)), field(&record, Some(idx_stop)))
        else {
            skipped += 1;
            continue;
        };
        let raw_seq = record.get(idx_seq).unwrap_or_default();
        let stop_sequence = raw_seq.parse().map_err(|_| GtfsError::InvalidField {
            file: STOP_TIMES,
            line: line_of(&record),
            column: "stop_sequence",
            value: raw_seq.to_string(),
        })?;

        stop_times.push(StopTimeRecord {
            trip_id: trip_id.to_string(),
            stop_id: stop_id.to_string(),
            stop_sequence,
            arrival_time: field(&record, idx_arr).map(str::to_string),
            departure_time: field(&record, idx_dep).map(str::to_string),
        });
    }
    if skipped > 0 {
        warn!(skipped, "Skipped stop_times.txt records with empty trip_id or stop_id");
    }
    Ok(stop_times)
}

/// Parse routes.txt.
pub fn parse_routes<R: Read>(source: R) -> Result<Vec<RouteRecord>, GtfsError> {
    let mut rdr = reader(source);
    let cols = Columns::read(ROUTES, &mut rdr)?;
    let idx_id = cols.required("route_id")?;
    let idx_long = cols.optional("route_long_name");
    let idx_short = cols.optional("route_short_name");

    let mut routes = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let Some(route_id) = field(&record, Some(idx_id)) else {
            skipped += 1;
            continue;
        };
        routes.push(RouteRecord::new(
            route_id,
            field(&record, idx_long),
            field(&record, idx_short),
        ));
    }
    if skipped > 0 {
        warn!(skipped, "Skipped routes.txt records with empty route_id");
    }
    Ok(routes)
}

/// Parse calendar.txt.
///
/// A weekday flag of `1` marks the service as running; anything else,
/// including a missing column, does not. Date ranges are ignored.
pub fn parse_calendar<R: Read>(source: R) -> Result<Vec<CalendarRecord>, GtfsError> {
    let mut rdr = reader(source);
    let cols = Columns::read(CALENDAR, &mut rdr)?;
    let idx_service = cols.required("service_id")?;
    let idx_days = WEEKDAY_COLUMNS.map(|day| cols.optional(day));

    let mut calendar = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let Some(service_id) = field(&record, Some(idx_service)) else {
            skipped += 1;
            continue;
        };
        let days = idx_days.map(|idx| field(&record, idx) == Some("1"));
        calendar.push(CalendarRecord::new(service_id, days));
    }
    if skipped > 0 {
        warn!(skipped, "Skipped calendar.txt records with empty service_id");
    }
    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn stops_by_header_name() {
        let csv = "stop_lat,stop_id,extra,stop_name,stop_lon\n\
                   48.1,S1,x,Central,11.5\n\
                   48.2,S2,y,,11.6\n";
        let stops = parse_stops(csv.as_bytes()).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_id, "S1");
        assert_eq!(stops[0].stop_name, "Central");
        assert_eq!(stops[0].location, Coordinate::new(48.1, 11.5).unwrap());
        assert_eq!(stops[1].stop_name, "");
    }

    #[test]
    fn stops_tolerate_bom_and_padding() {
        let csv = "\u{feff}stop_id,stop_name,stop_lat,stop_lon\n S1 , Central , 1.0 , 2.0 \n";
        let stops = parse_stops(csv.as_bytes()).unwrap();
        assert_eq!(stops[0].stop_id, "S1");
        assert_eq!(stops[0].stop_name, "Central");
    }

    #[test]
    fn stops_without_coordinates_are_skipped() {
        let csv = "stop_id,stop_name,stop_lat,stop_lon\n\
                   S1,Ok,1.0,2.0\n\
                   S2,Blank,,\n\
                   S3,Garbage,north,east\n\
                   S4,OutOfRange,95.0,2.0\n\
                   ,NoId,1.0,2.0\n";
        let stops = parse_stops(csv.as_bytes()).unwrap();
        let ids: Vec<_> = stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["S1"]);
    }

    #[test]
    fn stops_require_coordinate_columns() {
        let err = parse_stops("stop_id,stop_name\nS1,X\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            GtfsError::MissingColumn {
                file: "stops.txt",
                column: "stop_lat"
            }
        ));
    }

    #[test]
    fn trips_parse() {
        let csv = "route_id,service_id,trip_id,trip_headsign\n\
                   R1,WEEKDAY,T1,North\n\
                   R1,WEEKDAY,,South\n";
        let trips = parse_trips(csv.as_bytes()).unwrap();
        assert_eq!(trips, vec![TripRecord::new("T1", "WEEKDAY", "R1")]);
    }

    #[test]
    fn stop_times_keep_raw_times() {
        let csv = "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
                   T1,,8:00:00,A,1\n\
                   T1,08:30:00,08:31:00,B,2\n\
                   T1,25:00:00,25:00:00,C,3\n";
        let rows = parse_stop_times(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].arrival_time, None);
        assert_eq!(rows[0].departure_time.as_deref(), Some("8:00:00"));
        assert_eq!(rows[1].stop_sequence, 2);
        assert_eq!(rows[2].arrival_time.as_deref(), Some("25:00:00"));
    }

    #[test]
    fn stop_times_without_time_columns() {
        let csv = "trip_id,stop_id,stop_sequence\nT1,A,1\n";
        let rows = parse_stop_times(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].arrival_time, None);
        assert_eq!(rows[0].departure_time, None);
    }

    #[test]
    fn stop_times_reject_bad_sequence() {
        let csv = "trip_id,stop_id,stop_sequence\nT1,A,1\nT1,B,two\n";
        let err = parse_stop_times(csv.as_bytes()).unwrap_err();
        match err {
            GtfsError::InvalidField {
                file,
                line,
                column,
                value,
            } => {
                assert_eq!(file, "stop_times.txt");
                assert_eq!(line, 3);
                assert_eq!(column, "stop_sequence");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stop_times_skip_empty_keys() {
        let csv = "trip_id,stop_id,stop_sequence\n,A,1\nT1,,2\nT1,B,3\n";
        let rows = parse_stop_times(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stop_id, "B");
    }

    #[test]
    fn routes_with_optional_names() {
        let csv = "route_id,route_short_name\nR1,S1\nR2,\n";
        let routes = parse_routes(csv.as_bytes()).unwrap();
        assert_eq!(routes[0].display_name(), "S1");
        assert_eq!(routes[0].route_long_name, None);
        assert_eq!(routes[1].display_name(), "R2");
    }

    #[test]
    fn calendar_flags() {
        let csv = "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,\
                   start_date,end_date\n\
                   WK,1,1,1,1,1,0,0,20240101,20241231\n\
                   SAT,0,0,0,0,0,1,0,20240101,20241231\n";
        let calendar = parse_calendar(csv.as_bytes()).unwrap();
        assert_eq!(calendar.len(), 2);
        assert!(calendar[0].runs_on(Weekday::Mon));
        assert!(!calendar[0].runs_on(Weekday::Sat));
        assert_eq!(calendar[1], CalendarRecord::on_weekdays("SAT", &[Weekday::Sat]));
    }

    #[test]
    fn calendar_missing_weekday_column_means_not_running() {
        let csv = "service_id,monday\nM,1\n";
        let calendar = parse_calendar(csv.as_bytes()).unwrap();
        assert_eq!(calendar[0], CalendarRecord::on_weekdays("M", &[Weekday::Mon]));
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let csv = "trip_id,route_id,service_id\nT1,R1\n";
        let err = parse_trips(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GtfsError::Csv(_)));
    }
}
