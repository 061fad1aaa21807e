//! Web layer for the event itinerary server.
//!
//! Provides HTTP endpoints for nearest-stop lookups and event itineraries.

mod dto;
mod routes;
mod state;

#[cfg(test)]
mod routes_tests;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
