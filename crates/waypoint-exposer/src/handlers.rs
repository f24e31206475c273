//! The waypoint document handler.
//!
//! Every request, whatever its method or path, is answered here: 503
//! while the host world is not loaded, otherwise a compact JSON array of
//! all stored waypoints.
//!
//! ```text
//! [{"id":"1","name":"Base","ownerPlayerId":"7","pos":{"x":10,"y":20,"z":30}}]
//! ```
//!
//! Ids are rendered as strings; positions stay numeric.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use waypoint_types::{Waypoint, WorldPosition};

use crate::error::ExposerError;
use crate::state::AppState;

/// JSON projection of one stored waypoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointView<'a> {
    /// Entity id as a decimal string.
    pub id: String,
    /// Display label.
    pub name: &'a str,
    /// Owner id as a decimal string.
    pub owner_player_id: String,
    /// Marker position.
    pub pos: WorldPosition,
}

impl<'a> From<&'a Waypoint> for WaypointView<'a> {
    fn from(wp: &'a Waypoint) -> Self {
        Self {
            id: wp.id.to_string(),
            name: &wp.name,
            owner_player_id: wp.owner_player_id.to_string(),
            pos: wp.position,
        }
    }
}

/// Serialize `waypoints` into the compact UTF-8 document body.
pub fn render_document(waypoints: &[Waypoint]) -> Result<Vec<u8>, ExposerError> {
    let views: Vec<WaypointView<'_>> = waypoints.iter().map(WaypointView::from).collect();
    Ok(serde_json::to_vec(&views)?)
}

/// Answer any request with the current waypoint document.
pub async fn list_waypoints(State(state): State<Arc<AppState>>) -> Result<Response, ExposerError> {
    if !state.world.is_world_ready() {
        return Ok(StatusCode::SERVICE_UNAVAILABLE.into_response());
    }

    let waypoints = state.store.enumerate();
    let body = render_document(&waypoints)?;
    let length = HeaderValue::from(body.len());

    tracing::debug!(count = waypoints.len(), bytes = body.len(), "Serving waypoints");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_ENCODING, HeaderValue::from_static("UTF-8")),
            (header::CONTENT_LENGTH, length),
        ],
        body,
    )
        .into_response())
}
