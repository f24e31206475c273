//! Cross-origin headers for browser-based map overlays.
//!
//! The origin header is appended to every response by the router; this
//! middleware adds the preflight headers when the request is `OPTIONS`.
//! Preflights are not short-circuited: they continue to the document
//! handler like any other request.

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;

/// `Access-Control-Allow-Headers` value sent on preflight.
pub const ALLOW_HEADERS: &str = "Content-Type, Accept, X-Requested-With";

/// `Access-Control-Allow-Methods` value sent on preflight.
pub const ALLOW_METHODS: &str = "GET, POST";

/// `Access-Control-Max-Age` value sent on preflight, in seconds (20 days).
pub const MAX_AGE: &str = "1728000";

/// `Access-Control-Allow-Origin` value sent on every response.
pub const ALLOW_ORIGIN: &str = "*";

/// Attach the preflight headers to responses for `OPTIONS` requests.
pub async fn preflight_headers(request: Request, next: Next) -> Response {
    let is_preflight = *request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if is_preflight {
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE),
        );
    }

    response
}
