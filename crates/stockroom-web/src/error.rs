//! HTTP error mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stockroom_core::StockError;
use stockroom_live::LiveError;
use tracing::error;

/// Error returned by route handlers, rendered as `{"message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    Stock(StockError),
    Live(LiveError),
    /// The request body was not the JSON the route expects.
    Body(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Stock(err) => match err {
                StockError::AuthRequired | StockError::InvalidToken => StatusCode::UNAUTHORIZED,
                StockError::ProductNotFound
                | StockError::SaleItemNotFound(_)
                | StockError::ProfileNotFound => StatusCode::NOT_FOUND,
                StockError::InsufficientStock(_)
                | StockError::ValidationError(_)
                | StockError::EmailInUse => StatusCode::BAD_REQUEST,
                StockError::Store(_) | StockError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Live(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Body(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Stock(err) => err.to_string(),
            Self::Live(err) => err.to_string(),
            Self::Body(rejection) => rejection.body_text(),
        }
    }
}

impl From<StockError> for ApiError {
    fn from(err: StockError) -> Self {
        Self::Stock(err)
    }
}

impl From<LiveError> for ApiError {
    fn from(err: LiveError) -> Self {
        Self::Live(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(status = %status, error = %message, "Request failed");
        }
        (status, Json(json!({ "message": message }))).into_response()
    }
}
