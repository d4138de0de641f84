//! Request-context extractors.
//!
//! These never reject a request. Malformed `sort`, `page`, `per_page` and
//! `fields` values fall back to their defaults, and a repeated key keeps
//! its first value.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};
use pmdx_core::fields::FieldFilter;
use pmdx_core::listing::ListParams;

/// Decoded query pairs in request order.
fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Sort and pagination of a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery(pub ListParams);

impl ListQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = query_pairs(uri);
        Self(ListParams::from_raw(
            first(&pairs, "sort"),
            first(&pairs, "page"),
            first(&pairs, "per_page"),
        ))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ListQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

/// Top-level response keys requested with `?fields=`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields(pub FieldFilter);

impl Fields {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = query_pairs(uri);
        Self(FieldFilter::parse(first(&pairs, "fields")))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Fields {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

/// The request URL as the client addressed it, without a scheme.
///
/// `host` comes from the `Host` header (falling back to the URI authority
/// for HTTP/2) and is used to build resource URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub host: String,
    pub path_and_query: String,
}

impl RequestUrl {
    pub fn new(uri: &Uri, headers: &HeaderMap) -> Self {
        let host = headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .unwrap_or_default();
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());
        Self {
            host,
            path_and_query,
        }
    }

    /// `<host><path>?<query>`, the base for pagination links.
    pub fn link_base(&self) -> String {
        format!("{}{}", self.host, self.path_and_query)
    }

    /// Scheme-relative URL used as the response cache key.
    pub fn cache_key(&self) -> String {
        format!("//{}{}", self.host, self.path_and_query)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestUrl {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(&parts.uri, &parts.headers))
    }
}
