//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gtfs::Feed;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Schedule tables loaded at startup
    pub feed: Arc<Feed>,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feed: Feed, config: ServerConfig) -> Self {
        Self {
            feed: Arc::new(feed),
            config: Arc::new(config),
        }
    }
}
