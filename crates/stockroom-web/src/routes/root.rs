//! Service information routes.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Inventory Management API",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment.as_str(),
        "liveConnections": state.registry.len(),
        "endpoints": {
            "events": "/events",
            "products": "/api/products",
            "sales": "/api/sales",
            "profile": "/api/auth/profile"
        }
    }))
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Route not found" })))
}
