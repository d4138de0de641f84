//! Search keys for detail lookups (`/v1/{resource}/{idOrName}`).
//!
//! A path argument that parses as an integer is a lookup by surrogate key.
//! Anything else is a lookup by name. Names are case-folded here, in the
//! application, rather than with `LOWER()`/`INITCAP()` in SQL: a function
//! applied to the name column would stop PostgreSQL from using the index
//! on that column.

use std::fmt;

use crate::types::DbId;

/// How a detail resource is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKey {
    Id(DbId),
    /// Already normalized with [`normalize_name`].
    Name(String),
}

impl SearchKey {
    /// Classify a raw path argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use pmdx_core::search::SearchKey;
    ///
    /// assert_eq!(SearchKey::parse("25"), SearchKey::Id(25));
    /// assert_eq!(SearchKey::parse("pIKAchu"), SearchKey::Name("Pikachu".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<DbId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(normalize_name(raw)),
        }
    }

    /// Label used in not-found messages (`ID` or `name`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Id(_) => "ID",
            Self::Name(_) => "name",
        }
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{} '{id}'", self.kind()),
            Self::Name(name) => write!(f, "{} '{name}'", self.kind()),
        }
    }
}

/// Lower-case the input, then upper-case the first letter of every word.
///
/// A word starts after any character that is neither alphanumeric nor `_`,
/// so `"mr. mime"` becomes `"Mr. Mime"` and `"ho-oh"` becomes `"Ho-Oh"`.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;

    for c in raw.to_lowercase().chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    out
}
