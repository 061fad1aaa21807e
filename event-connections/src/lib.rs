//! Event transit itinerary server.
//!
//! Answers: "which scheduled trips take me from near the home ground to
//! near the away ground on match day?" over a static GTFS feed.

pub mod config;
pub mod domain;
pub mod gtfs;
pub mod itinerary;
pub mod web;
