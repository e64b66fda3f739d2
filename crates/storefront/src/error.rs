//! Unified error handling with Sentry integration.
//!
//! Shopper mistakes are reported as flash notices by the handlers themselves;
//! `AppError` covers what is left: infrastructure failures and malformed
//! requests. All route handlers return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cart::CartStoreError;
use crate::services::ServiceError;
use crate::shop::ShopError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Order API call failed.
    #[error("Order API error: {0}")]
    Shop(#[from] ShopError),

    /// Cart storage failed.
    #[error("Cart storage error: {0}")]
    Cart(#[from] CartStoreError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Shop(e) => Self::Shop(e),
            ServiceError::Cart(e) => Self::Cart(e),
            user => Self::BadRequest(user.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if !matches!(self, Self::BadRequest(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Cart(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shop(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Cart(_) | Self::Session(_) => "Internal server error".to_string(),
            Self::Shop(_) => "Store service unavailable".to_string(),
            Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
