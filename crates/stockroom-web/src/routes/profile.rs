//! Seller profile route handlers.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use stockroom_core::profile::{
    self,
    model::{Profile, ProfileImageInput, ProfileInput},
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = profile::get_profile(state.store.as_ref(), user.owner()).await?;
    Ok(Json(profile))
}

pub async fn save_profile(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<ProfileInput>,
) -> Result<Json<Profile>, ApiError> {
    let profile = profile::save_profile(state.store.as_ref(), &user.0, &req).await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<ProfileInput>,
) -> Result<Json<Profile>, ApiError> {
    let profile = profile::update_profile(state.store.as_ref(), user.owner(), &req).await?;
    Ok(Json(profile))
}

/// Update the caller's profile, creating it on first use.
pub async fn upsert_profile(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<ProfileInput>,
) -> Result<Json<Profile>, ApiError> {
    let profile = profile::upsert_profile(state.store.as_ref(), &user.0, &req).await?;
    Ok(Json(profile))
}

pub async fn set_profile_image(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<ProfileImageInput>,
) -> Result<Json<Value>, ApiError> {
    let profile =
        profile::set_profile_image(state.store.as_ref(), &user.0, &req.profile_image).await?;
    Ok(Json(json!({ "profileImage": profile.profile_image })))
}
