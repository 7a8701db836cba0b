mod health;
mod url;

use axum::http::HeaderMap;

pub use health::health_handler;
pub use url::{delete_url_handler, redirect_handler, save_url_handler};

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Returns the request id set by the request-id middleware, or an empty
/// string when the router runs without it.
pub(crate) fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
