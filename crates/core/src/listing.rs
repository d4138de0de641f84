//! Sort and pagination options for list endpoints.
//!
//! Parsing is deliberately permissive: malformed values never produce an
//! error, they fall back to the defaults below.

/// Page used when `page` is absent or unusable.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `per_page` is absent or unusable.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// One of the four named orderings accepted by `?sort=`.
///
/// "Unspecified" is modelled as `Option::<SortOrder>::None` and behaves
/// like [`SortOrder::IdAsc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    IdAsc,
    IdDesc,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    /// Parse a `sort` query value. Unknown tokens yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "id_asc" => Some(Self::IdAsc),
            "id_desc" => Some(Self::IdDesc),
            "name_asc" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdAsc => "id_asc",
            Self::IdDesc => "id_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
        }
    }

    pub fn by_name(&self) -> bool {
        matches!(self, Self::NameAsc | Self::NameDesc)
    }

    pub fn descending(&self) -> bool {
        matches!(self, Self::IdDesc | Self::NameDesc)
    }
}

/// Page number and page size, both always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Build from already-parsed numbers. Values below 1 fall back to the
    /// defaults.
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: if page >= 1 { page } else { DEFAULT_PAGE },
            per_page: if per_page >= 1 {
                per_page
            } else {
                DEFAULT_PER_PAGE
            },
        }
    }

    /// Build from raw query values. Missing, non-numeric, zero and negative
    /// inputs fall back to the defaults independently of each other.
    ///
    /// # Examples
    ///
    /// ```
    /// use pmdx_core::listing::Pagination;
    ///
    /// let p = Pagination::from_raw(Some("3"), Some("abc"));
    /// assert_eq!((p.page, p.per_page), (3, 50));
    /// ```
    pub fn from_raw(page: Option<&str>, per_page: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);
        Self::new(parse(page), parse(per_page))
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// Rows skipped before this page: `(page - 1) * per_page`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Parsed request context for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListParams {
    pub sort: Option<SortOrder>,
    pub pagination: Pagination,
}

impl ListParams {
    pub fn from_raw(sort: Option<&str>, page: Option<&str>, per_page: Option<&str>) -> Self {
        Self {
            sort: sort.and_then(SortOrder::parse),
            pagination: Pagination::from_raw(page, per_page),
        }
    }
}
