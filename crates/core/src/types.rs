use indexmap::IndexMap;

/// Surrogate keys in the dataset are PostgreSQL `INTEGER` columns.
pub type DbId = i32;

/// A JSON object that keeps its keys in insertion order.
pub type JsonObject = IndexMap<String, serde_json::Value>;
