//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned when customer resolution fails
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found!";
/// Message returned when the tax id is already taken
pub const CUSTOMER_ALREADY_EXISTS: &str = "Customer already exists!";
/// Message returned when a withdrawal exceeds the balance
pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds!";
/// Message returned when an amount would leave the representable range
pub const AMOUNT_OUT_OF_RANGE: &str = "Amount out of range!";
/// Message returned for failures the caller cannot fix
pub const INTERNAL_ERROR: &str = "Internal server error";

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Common(#[from] Error),
}

impl ApiError {
    /// Status code and public message for this error
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                Error::CustomerNotFound(_) => (StatusCode::BAD_REQUEST, CUSTOMER_NOT_FOUND.to_string()),
                Error::CustomerAlreadyExists(_) => (StatusCode::BAD_REQUEST, CUSTOMER_ALREADY_EXISTS.to_string()),
                Error::InsufficientFunds(_) => (StatusCode::BAD_REQUEST, INSUFFICIENT_FUNDS.to_string()),
                Error::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                Error::DecimalError(_) => (StatusCode::BAD_REQUEST, AMOUNT_OUT_OF_RANGE.to_string()),

                // Server errors (5xx)
                Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // The request ID only goes to the log, the body keeps the bare error message
        let request_id = Uuid::new_v4();
        if status.is_server_error() {
            tracing::error!("API Error [{}]: {:?}", request_id, &self);
        } else {
            tracing::warn!("API Error [{}]: {}", request_id, &self);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
