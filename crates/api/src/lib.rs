//! HTTP server for the dex API.
//!
//! Exposes the building blocks (config, state, error handling, caching,
//! routes) so integration tests and the binary entrypoint can both access
//! them.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod params;
pub mod render;
pub mod router;
pub mod routes;
pub mod state;
