//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Steep POS API",
        version = "0.3.2",
        description = "Order composition and kitchen fulfillment for the Steep drink shop.\n\nProvides:\n- **Menu** reads for the composition surfaces (category listing, topping list, name search)\n- **Order submission gateway** — checkout commits a cart as an order header plus per-unit drink records, with server-recomputed totals and atomic order-number allocation\n- **Kitchen board** — today's tickets in queue order, status transitions (New → In Progress → Done), and bump",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
    ),
    paths(
        // ── Menu ─────────────────────────────────────────────────────────
        crate::routes::menu::search_menu,
        crate::routes::menu::menu_by_category,
        // ── Orders ───────────────────────────────────────────────────────
        crate::routes::orders::max_order_number,
        crate::routes::orders::place_order,
        // ── Kitchen ──────────────────────────────────────────────────────
        crate::routes::kitchen::list_tickets,
        crate::routes::kitchen::update_status,
        crate::routes::kitchen::bump_order,
    ),
    components(schemas(
        steep_core::MenuItem,
        steep_core::ToppingRef,
        steep_core::ModifierSelection,
        steep_core::Size,
        steep_core::Temperature,
        steep_core::Sweetness,
        steep_core::IceLevel,
        steep_core::PaymentMethod,
        steep_kitchen::KitchenTicket,
        steep_kitchen::TicketItem,
        steep_kitchen::TicketStatus,
        crate::gateway::PlaceOrderRequest,
        crate::gateway::PlaceOrderItem,
        crate::gateway::PlaceOrderResponse,
        crate::routes::orders::MaxOrderResponse,
        crate::routes::kitchen::UpdateStatusRequest,
        crate::routes::kitchen::UpdateStatusResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "menu", description = "Catalog reads"),
        (name = "orders", description = "Order submission"),
        (name = "kitchen", description = "Kitchen ticket board"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — the assembled spec.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_contains_all_routes() {
        let spec = ApiDoc::openapi();
        let paths = &spec.paths.paths;
        for path in [
            "/api/menu",
            "/api/menu/{category}",
            "/api/orders",
            "/api/orders/place",
            "/api/kitchen/orders",
            "/api/kitchen/orders/{id}/status",
            "/api/kitchen/orders/{id}",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }
}
