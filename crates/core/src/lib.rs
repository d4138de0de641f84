//! Pure domain logic for the dex API.
//!
//! Nothing in this crate performs I/O. The db and api crates build on
//! these types: search keys, list parameters, field limiting and
//! pagination link synthesis.

pub mod error;
pub mod fields;
pub mod links;
pub mod listing;
pub mod search;
pub mod types;
