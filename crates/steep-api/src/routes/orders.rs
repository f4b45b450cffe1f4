//! # Order API Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/orders` | `max_order_number` |
//! | `POST` | `/api/orders/place` | `place_order` |
//!
//! `GET /api/orders` exists so the surfaces can *preview* the next order
//! number. The authoritative number is allocated inside the gateway under a
//! serialization guarantee; the preview is advisory and may be stale by the
//! time checkout commits.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::gateway::{self, PlaceOrderRequest, PlaceOrderResponse};
use crate::state::AppState;

/// Response for the order-number preview.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaxOrderResponse {
    /// Highest existing order number (0 when no orders exist).
    pub max: i64,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(max_order_number))
        .route("/api/orders/place", post(place_order))
}

/// GET /api/orders — current maximum order number.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Current maximum order number", body = MaxOrderResponse),
    ),
    tag = "orders"
)]
pub(crate) async fn max_order_number(
    State(state): State<AppState>,
) -> Result<Json<MaxOrderResponse>, AppError> {
    Ok(Json(MaxOrderResponse {
        max: state.orders.max_number(),
    }))
}

/// POST /api/orders/place — commit a finalized cart as an order.
///
/// Surfaces that keep their cart server-side send their session id in the
/// `X-Session-Id` header; that session's cart is destroyed on success and
/// kept intact on failure.
#[utoipa::path(
    post,
    path = "/api/orders/place",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order committed", body = PlaceOrderResponse),
        (status = 400, description = "Validation failure — empty cart, missing payment method, negative tip", body = crate::error::ErrorBody),
        (status = 500, description = "Persistence failure — nothing committed, retry with the same cart", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn place_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok());
    let response = gateway::place_order(&state, session, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
