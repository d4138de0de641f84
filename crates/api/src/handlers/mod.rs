//! Request handlers, one module per resource.
//!
//! Every resource has a list handler (`GET /v1/<resource>`) and a detail
//! handler (`GET /v1/<resource>/{search}`). Handlers only run on a cache
//! miss.

use std::time::Instant;

pub mod ability;
pub mod attack_move;
pub mod camp;
pub mod dungeon;
pub mod pokemon;
pub mod pokemon_type;

/// Debug event with the time spent in the repository call.
pub(crate) fn log_db_latency(resource: &'static str, operation: &'static str, started: Instant) {
    tracing::debug!(
        resource,
        operation,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Database query finished",
    );
}
