//! Field limiting (`?fields=a,b,c`).
//!
//! Only top-level keys of a response object are considered; nested
//! objects such as an embedded `camp` reference are kept whole.

use std::collections::HashSet;

use crate::types::JsonObject;

/// Which top-level keys a caller asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
    pub enabled: bool,
    pub allowed: HashSet<String>,
}

impl FieldFilter {
    /// A filter that keeps every key.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// An enabled filter keeping exactly `fields`. An empty iterator yields
    /// a filter that removes every key.
    pub fn allow<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            allowed: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the raw `fields` query value.
    ///
    /// The value is split on `,` and empty segments are dropped. Filtering
    /// is only enabled when at least one name remains, so `?fields=` and
    /// `?fields=,` leave the response untouched.
    pub fn parse(raw: Option<&str>) -> Self {
        let names: Vec<&str> = raw
            .unwrap_or_default()
            .split(',')
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            Self::disabled()
        } else {
            Self::allow(names)
        }
    }

    pub fn permits(&self, key: &str) -> bool {
        !self.enabled || self.allowed.contains(key)
    }
}

/// Remove every top-level key the filter does not permit, in place.
///
/// Surviving keys keep their original relative order. Unknown names in
/// the filter are never matched and cause no error.
pub fn limit_fields(object: &mut JsonObject, filter: &FieldFilter) {
    if !filter.enabled {
        return;
    }
    object.retain(|key, _| filter.allowed.contains(key));
}
