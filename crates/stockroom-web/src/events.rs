//! Live event stream endpoints.

use std::convert::Infallible;

use axum::{
    extract::State,
    http::header,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Open a server-sent event stream of dashboard updates.
///
/// The first message is always `{"type":"heartbeat"}`. The stream stays open
/// until the client disconnects or the server shuts down.
pub async fn subscribe(State(state): State<AppState>) -> Result<Response, ApiError> {
    let subscription = state.registry.subscribe()?;
    info!(
        channel_id = %subscription.id(),
        members = state.registry.len(),
        "New event stream connection"
    );

    let stream = subscription.map(|payload| Ok::<_, Infallible>(Event::default().data(payload)));

    Ok((
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Sse::new(stream),
    )
        .into_response())
}

/// Confirms the events route is mounted.
pub async fn test() -> Json<Value> {
    Json(json!({ "message": "Events route is working" }))
}
