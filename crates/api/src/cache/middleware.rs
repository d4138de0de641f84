//! Route layer serving and filling the response cache.

use axum::body::{self, Body};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::{CacheError, CachedResponse, SharedCache};
use crate::error::INTERNAL_ERROR_MESSAGE;
use crate::params::RequestUrl;

/// Serve a cached response for the request URL, or run the handler and
/// cache its response when the status is exactly 200.
///
/// - Hit: stored headers and body are replayed with status 200; the
///   handler does not run.
/// - Miss: the handler runs, its body is buffered and forwarded as is.
/// - Lookup failure: logged, then handled like a miss.
///
/// Storing is best effort: a failure is logged and the response is still
/// sent.
///
/// Apply with `axum::middleware::from_fn_with_state(cache, cache_response)`.
pub async fn cache_response(
    State(cache): State<SharedCache>,
    request: Request,
    next: Next,
) -> Response {
    let key = RequestUrl::new(request.uri(), request.headers()).cache_key();

    match cache.fetch(&key).await {
        Ok(cached) => {
            tracing::debug!(%key, backend = cache.backend(), "Response cache hit");
            return cached.into_response();
        }
        Err(CacheError::Miss(_)) => {
            tracing::debug!(%key, backend = cache.backend(), "Response cache miss");
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                %key,
                backend = cache.backend(),
                "Response cache lookup failed, serving uncached",
            );
        }
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, %key, "Failed to buffer response body");
            return (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response();
        }
    };

    let entry = CachedResponse::capture(&parts.headers, bytes.clone());
    if let Err(err) = cache.store(&key, entry).await {
        tracing::warn!(error = %err, %key, backend = cache.backend(), "Failed to store response in cache");
    }

    Response::from_parts(parts, Body::from(bytes))
}
