use event_connections::config::ServerConfig;
use event_connections::gtfs::load_feed;
use event_connections::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,event_connections=debug,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    let feed = load_feed(&config.gtfs_dir).expect("Failed to load GTFS feed");
    if feed.stops.is_empty() {
        tracing::warn!(dir = %config.gtfs_dir.display(), "GTFS feed has no stops");
    }

    let addr = config.bind_addr;
    let state = AppState::new(feed, config);
    let app = create_router(state);

    info!("Event itinerary server listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/stops/nearest  - Nearest stop to lat/lon");
    info!("  POST /api/itinerary      - Trips to or from an event");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
