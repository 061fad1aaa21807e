//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::Weekday;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::{AppState, create_router};
use crate::config::ServerConfig;
use crate::domain::{
    CalendarRecord, Coordinate, RouteRecord, StopRecord, StopTimeRecord, TripRecord,
};
use crate::gtfs::Feed;

/// Stadium at (0, 1), station at (0, 0); one Saturday trip each way.
fn feed() -> Feed {
    let stop = |id: &str, name: &str, lon: f64| {
        StopRecord::new(id, name, Coordinate::new(0.0, lon).unwrap())
    };
    Feed {
        stops: vec![stop("HBF", "Hauptbahnhof", 0.0), stop("ARENA", "Arena", 1.0)],
        trips: vec![
            TripRecord::new("OUT", "SAT", "RE1"),
            TripRecord::new("BACK", "SAT", "RE1"),
            TripRecord::new("BROKEN", "SAT", "RE1"),
        ],
        stop_times: vec![
            StopTimeRecord::new("OUT", "HBF", 1, "02:30:00", "02:30:00"),
            StopTimeRecord::new("OUT", "ARENA", 2, "03:10:00", "03:10:00"),
            StopTimeRecord::new("BACK", "ARENA", 1, "19:00:00", "19:00:00"),
            StopTimeRecord::new("BACK", "HBF", 2, "19:40:00", "19:40:00"),
            StopTimeRecord::new("BROKEN", "HBF", 1, "2:45", "2:45"),
            StopTimeRecord::new("BROKEN", "ARENA", 2, "03:20:00", "03:20:00"),
        ],
        routes: vec![RouteRecord::new("RE1", Some("Stadion-Express"), Some("RE1"))],
        calendar: vec![CalendarRecord::on_weekdays("SAT", &[Weekday::Sat])],
    }
}

fn app(feed: Feed) -> axum::Router {
    create_router(AppState::new(feed, ServerConfig::default()))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn itinerary_body() -> Value {
    json!({
        "match_id": "bl-2024-26",
        "date": "2024-03-16",
        "home": {"lat": 0.0, "lon": 0.01},
        "away": {"lat": 0.0, "lon": 0.99}
    })
}

#[tokio::test]
async fn health_check() {
    let response = app(feed()).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn nearest_stop_lookup() {
    let (status, body) = send(app(feed()), get("/api/stops/nearest?lat=0.0&lon=0.9")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stop_id"], "ARENA");
    assert_eq!(body["stop_name"], "Arena");
    let km = body["distance_km"].as_f64().unwrap();
    assert!((km - 11.12).abs() < 0.01, "distance was {km}");
}

#[tokio::test]
async fn nearest_stop_rejects_invalid_coordinate() {
    let (status, body) = send(app(feed()), get("/api/stops/nearest?lat=91&lon=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("latitude"));
}

#[tokio::test]
async fn nearest_stop_rejects_missing_parameter() {
    let (status, body) = send(app(feed()), get("/api/stops/nearest?lat=1.0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn nearest_stop_without_feed() {
    let (status, body) = send(app(Feed::default()), get("/api/stops/nearest?lat=0&lon=0")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("stop set is empty"));
}

#[tokio::test]
async fn itinerary_departure_defaults() {
    let (status, body) = send(app(feed()), post_json("/api/itinerary", &itinerary_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"]["stop_id"], "HBF");
    assert_eq!(body["destination"]["stop_id"], "ARENA");

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["trip_id"], "OUT");
    assert_eq!(rows[0]["match_id"], "bl-2024-26");
    assert_eq!(rows[0]["route"], "Stadion-Express");
    assert_eq!(rows[0]["departure"], "02:30:00");
    assert_eq!(rows[1]["stop_id"], "ARENA");
    assert_eq!(rows[1]["date"], "2024-03-16");

    let faults = body["faults"].as_array().unwrap();
    assert_eq!(faults.len(), 1);
    assert!(faults[0].as_str().unwrap().contains("BROKEN"));
}

#[tokio::test]
async fn itinerary_arrival_with_kickoff() {
    let mut body = itinerary_body();
    body["direction"] = json!("Arrival");
    body["kickoff"] = json!("20:30:00");
    body["window_hours"] = json!(1);

    let (status, body) = send(app(feed()), post_json("/api/itinerary", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"]["stop_id"], "ARENA");
    assert_eq!(body["destination"]["stop_id"], "HBF");

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["trip_id"], "BACK");
    assert_eq!(rows[1]["arrival"], "19:40:00");
}

#[tokio::test]
async fn itinerary_rejects_unknown_direction() {
    let mut body = itinerary_body();
    body["direction"] = json!("sideways");

    let (status, body) = send(app(feed()), post_json("/api/itinerary", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sideways"));
}

#[tokio::test]
async fn itinerary_rejects_bad_body() {
    let mut body = itinerary_body();
    body["home"] = json!({"lat": 0.0, "lon": 200.0});
    let (status, _) = send(app(feed()), post_json("/api/itinerary", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = itinerary_body();
    body["date"] = json!("16.03.2024");
    let (status, _) = send(app(feed()), post_json("/api/itinerary", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/api/itinerary")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(feed()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn itinerary_without_feed() {
    let (status, _) = send(
        app(Feed::default()),
        post_json("/api/itinerary", &itinerary_body()),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn itinerary_rejects_window_beyond_date_range() {
    for direction in ["departure", "arrival"] {
        let mut body = itinerary_body();
        body["direction"] = json!(direction);
        body["window_hours"] = json!(u32::MAX);

        let (status, body) = send(app(feed()), post_json("/api/itinerary", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{direction}");
        assert!(body["error"].as_str().unwrap().contains("out of range"));
    }
}
