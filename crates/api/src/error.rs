//! API error type.
//!
//! Every failure is answered with `{"error": "<message>"}`, which is the body
//! shape clients surface to users.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bazaar_core::ErrorBody;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Store operation rejected the request.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request body was not valid JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// A path segment (such as an order id) did not parse.
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathRejection),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(err) => match err {
                StoreError::ProductNotFound(_) | StoreError::OrderNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                StoreError::AlreadyDelivered(_) | StoreError::AwaitingPayment(_) => {
                    StatusCode::CONFLICT
                }
                StoreError::NoItems
                | StoreError::InvalidQuantity(_)
                | StoreError::InsufficientInventory(_) => StatusCode::BAD_REQUEST,
            },
            Self::InvalidBody(_) | Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(error = %self, %status, "Request rejected");

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use bazaar_core::{OrderId, ProductId};

    use super::*;

    #[test]
    fn test_store_errors_keep_their_message() {
        let err = ApiError::from(StoreError::ProductNotFound(ProductId::new(9)));
        assert_eq!(err.to_string(), "Product 9 not found");

        let err = ApiError::from(StoreError::OrderNotFound(OrderId::new(3)));
        assert_eq!(err.to_string(), "Order not found");
    }

    #[test]
    fn test_status_codes() {
        fn get_status(err: ApiError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(get_status(StoreError::NoItems.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(StoreError::InsufficientInventory("Laptop".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(StoreError::OrderNotFound(OrderId::new(1)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(StoreError::AlreadyDelivered(OrderId::new(1)).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(StoreError::AwaitingPayment(OrderId::new(1)).into()),
            StatusCode::CONFLICT
        );
    }
}
