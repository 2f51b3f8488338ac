//! Centralized error types for Stockroom.

use thiserror::Error;

/// Main error type for Stockroom operations.
#[derive(Error, Debug)]
pub enum StockError {
    #[error("Product not found")]
    ProductNotFound,

    /// A sale line names a product the seller does not own.
    #[error("Product {0} not found")]
    SaleItemNotFound(String),

    #[error("User not found")]
    ProfileNotFound,

    #[error("Email already in use")]
    EmailInUse,

    #[error("Insufficient stock for {0}")]
    InsufficientStock(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Stockroom operations.
pub type StockResult<T> = Result<T, StockError>;

impl StockError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
