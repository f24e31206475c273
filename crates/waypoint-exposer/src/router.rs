//! Axum router construction for the waypoint endpoint.
//!
//! There is a single handler mounted as the fallback, so every method
//! on every path receives the same document.

use std::sync::Arc;

use axum::http::{HeaderValue, header};
use axum::{Router, middleware};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::cors;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the waypoint endpoint.
///
/// Layers, innermost first:
/// - preflight CORS headers on `OPTIONS`
/// - `Access-Control-Allow-Origin: *` appended to every response,
///   including 503 and error responses
/// - request tracing
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handlers::list_waypoints)
        .layer(middleware::from_fn(cors::preflight_headers))
        .layer(SetResponseHeaderLayer::appending(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(cors::ALLOW_ORIGIN),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
