//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from steep-kitchen and the order gateway to HTTP
//! status codes with JSON error bodies. Internal error details are logged
//! but never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use steep_kitchen::TicketError;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (400): empty cart, bad payment method,
    /// negative tip, invalid status string. The caller must correct the
    /// input; retrying the same request will fail the same way.
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflict with current resource state (409) — e.g. a backward ticket
    /// transition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence failure (500). The order transaction rolled back; the
    /// client keeps its cart and may retry. Message is logged but not
    /// returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients. The checkout
        // surface only needs to know the order did not commit and a retry
        // with the same cart is safe.
        let message = match &self {
            Self::Internal(_) => {
                "The order could not be saved. Your cart is unchanged — please retry.".to_string()
            }
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert ticket errors to API errors.
///
/// Invalid status strings are validation errors (400, prior status
/// unchanged); a bumped order is gone from the board (404); a backward
/// transition conflicts with the ticket's current state (409).
impl From<TicketError> for AppError {
    fn from(err: TicketError) -> Self {
        match &err {
            TicketError::InvalidStatus(_) => Self::Validation(err.to_string()),
            TicketError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
            TicketError::Bumped(id) => Self::NotFound(format!("order {id} is no longer on the board")),
        }
    }
}
