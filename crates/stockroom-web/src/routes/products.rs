//! Product route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use stockroom_core::product::{self, model::{Product, ProductInput}};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = product::list_products(state.store.as_ref(), user.owner()).await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = product::create_product(state.store.as_ref(), user.owner(), &req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let product = product::update_product(state.store.as_ref(), user.owner(), &id, &req).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    product::delete_product(state.store.as_ref(), user.owner(), &id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
