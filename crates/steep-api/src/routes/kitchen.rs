//! # Kitchen Board API Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/kitchen/orders` | `list_tickets` |
//! | `PATCH` | `/api/kitchen/orders/:id/status` | `update_status` |
//! | `DELETE` | `/api/kitchen/orders/:id` | `bump_order` |
//!
//! The board serves today's orders only, sorted by the queue discipline
//! (order time, then order id). Status strings are exact: "New",
//! "In Progress", "Done" — anything else is a 400 and leaves the prior
//! status untouched.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use steep_kitchen::{KitchenTicket, TicketStatus};

use crate::error::AppError;
use crate::state::AppState;

/// Body for a status update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status string.
    pub status: String,
}

/// Echo of an applied status update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusResponse {
    /// The order the update applied to.
    pub orderid: i64,
    /// The status now held.
    pub status: TicketStatus,
}

/// Build the kitchen router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/kitchen/orders", get(list_tickets))
        .route("/api/kitchen/orders/:id/status", patch(update_status))
        .route("/api/kitchen/orders/:id", delete(bump_order))
}

/// GET /api/kitchen/orders — today's active tickets.
#[utoipa::path(
    get,
    path = "/api/kitchen/orders",
    responses(
        (status = 200, description = "Active tickets in queue order", body = [KitchenTicket]),
    ),
    tag = "kitchen"
)]
pub(crate) async fn list_tickets(
    State(state): State<AppState>,
) -> Result<Json<Vec<KitchenTicket>>, AppError> {
    let orders = state.orders.today();
    Ok(Json(state.board.project(&orders)))
}

/// PATCH /api/kitchen/orders/:id/status — advance a ticket.
#[utoipa::path(
    patch,
    path = "/api/kitchen/orders/{id}/status",
    params(("id" = i64, Path, description = "Order number")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status applied", body = UpdateStatusResponse),
        (status = 400, description = "Invalid status string; prior status unchanged", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown or bumped order", body = crate::error::ErrorBody),
        (status = 409, description = "Not a forward transition", body = crate::error::ErrorBody),
    ),
    tag = "kitchen"
)]
pub(crate) async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    // Parse first: an invalid status string is a 400 regardless of whether
    // the order exists.
    let target: TicketStatus = req.status.parse()?;

    if state.orders.get(order_id).is_none() {
        return Err(AppError::NotFound(format!("order {order_id} not found")));
    }

    let status = state.board.advance(order_id, target)?;
    Ok(Json(UpdateStatusResponse {
        orderid: order_id,
        status,
    }))
}

/// DELETE /api/kitchen/orders/:id — bump a ticket off the board.
///
/// Idempotent: bumping an already-bumped order is another 204. The order
/// row itself is untouched — only the board overlay forgets it.
#[utoipa::path(
    delete,
    path = "/api/kitchen/orders/{id}",
    params(("id" = i64, Path, description = "Order number")),
    responses(
        (status = 204, description = "Ticket bumped"),
        (status = 404, description = "Unknown order", body = crate::error::ErrorBody),
    ),
    tag = "kitchen"
)]
pub(crate) async fn bump_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.orders.get(order_id).is_none() {
        return Err(AppError::NotFound(format!("order {order_id} not found")));
    }
    state.board.bump(order_id);
    Ok(StatusCode::NO_CONTENT)
}
