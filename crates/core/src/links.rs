//! Pagination links for list responses (RFC 5988 `Link` header).
//!
//! The current request URL is rewritten by substituting its `page` query
//! parameter; a URL without one first gets `page=<current>` appended.
//! Links that should not be followed are rendered as the literal `null`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::listing::Pagination;

/// Matches a `page` parameter (not `per_page`) and its whole value.
static PAGE_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&])page=[^&#]*").expect("valid regex"));

/// Rendered in place of a URL that does not exist.
pub const NULL_LINK: &str = "null";

/// Next, previous and last page URLs for one list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub last: String,
}

impl PageLinks {
    /// Value for the `Link` response header.
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PageLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}>; rel=\"next\", <{}>; rel=\"previous\", <{}>; rel=\"last\"",
            self.next.as_deref().unwrap_or(NULL_LINK),
            self.previous.as_deref().unwrap_or(NULL_LINK),
            self.last,
        )
    }
}

/// `ceil(total / per_page)`, and `0` for an empty table.
pub fn last_page(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    total / per_page + i64::from(total % per_page != 0)
}

/// Derive next/previous/last links for `pagination` over `total` rows.
///
/// `request_url` is the URL as the client sent it (host, path and query,
/// no scheme). For link purposes the last page is never below 1, so an
/// empty table links to `page=1`. A page past the end yields neither a
/// next nor a previous link.
///
/// # Examples
///
/// ```
/// use pmdx_core::links::pagination_links;
/// use pmdx_core::listing::Pagination;
///
/// let links = pagination_links(&Pagination::new(1, 2), 5, "host/v1/abilities?per_page=2");
/// assert_eq!(links.next.as_deref(), Some("host/v1/abilities?per_page=2&page=2"));
/// assert_eq!(links.previous, None);
/// assert_eq!(links.last, "host/v1/abilities?per_page=2&page=3");
/// ```
pub fn pagination_links(pagination: &Pagination, total: i64, request_url: &str) -> PageLinks {
    let page = pagination.page;
    let last = last_page(total, pagination.per_page).max(1);
    let base = with_page_param(request_url, page);

    let next = (page < last).then(|| substitute_page(&base, page + 1));
    let previous = (page != 1 && page <= last).then(|| substitute_page(&base, page - 1));

    PageLinks {
        next,
        previous,
        last: substitute_page(&base, last),
    }
}

/// Append `page=<page>` unless the URL already carries a `page` parameter.
fn with_page_param(url: &str, page: i64) -> String {
    if PAGE_PARAM_RE.is_match(url) {
        return url.to_string();
    }
    match url.find('?') {
        Some(pos) if pos + 1 == url.len() => format!("{url}page={page}"),
        Some(_) => format!("{url}&page={page}"),
        None => format!("{url}?page={page}"),
    }
}

fn substitute_page(url: &str, page: i64) -> String {
    PAGE_PARAM_RE
        .replace_all(url, |caps: &regex::Captures<'_>| format!("{}page={page}", &caps[1]))
        .into_owned()
}
