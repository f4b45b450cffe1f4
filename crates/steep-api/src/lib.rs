//! # steep-api — HTTP Service for the Steep POS
//!
//! The service surface over the order composition and kitchen fulfillment
//! core.
//!
//! ## API Surface
//!
//! | Prefix                      | Module              | Domain                  |
//! |-----------------------------|---------------------|-------------------------|
//! | `/api/menu*`                | [`routes::menu`]    | Catalog reads           |
//! | `/api/orders*`              | [`routes::orders`]  | Order submission        |
//! | `/api/kitchen/orders*`      | [`routes::kitchen`] | Kitchen ticket board    |
//! | `/openapi.json`             | [`openapi`]         | OpenAPI spec            |
//! | `/health/*`                 | —                   | Probes                  |
//!
//! ## State model
//!
//! All handlers share [`state::AppState`]: the in-memory menu snapshot, the
//! order ledger with its atomic number allocator, the kitchen ticket board,
//! and per-session carts. A Postgres pool is optional — without it the
//! service runs in-memory only.

pub mod db;
pub mod error;
pub mod gateway;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes are mounted beside the API routes; request tracing wraps
/// everything. Body size limit: 1 MiB — checkout submissions are small, and
/// the limit stops oversized bodies before they buffer.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::menu::router())
        .merge(routes::orders::router())
        .merge(routes::kitchen::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// GET /health/liveness — process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness — process is serving.
async fn readiness() -> &'static str {
    "ready"
}
