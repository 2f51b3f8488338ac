//! Bearer token extraction.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use stockroom_core::{Identity, StockError};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller of an `/api` route.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    /// Owner id that scopes the caller's documents.
    pub fn owner(&self) -> &str {
        &self.0.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
            .filter(|token| !token.is_empty())
            .ok_or(StockError::AuthRequired)?;

        let identity = state.identity.verify(token).await.inspect_err(|err| {
            debug!(error = %err, "Token verification failed");
        })?;
        Ok(Self(identity))
    }
}
