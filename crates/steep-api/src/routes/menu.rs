//! # Menu API Endpoints
//!
//! Read-only catalog access for the composition surfaces.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/menu?search=` | `search_menu` |
//! | `GET` | `/api/menu/:category` | `menu_by_category` |

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use steep_core::{Category, MenuItem};

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for the menu search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct MenuSearch {
    /// Case-insensitive substring matched against item names.
    #[serde(default)]
    pub search: Option<String>,
}

/// Build the menu router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(search_menu))
        .route("/api/menu/:category", get(menu_by_category))
}

/// GET /api/menu/:category — items in one catalog category.
///
/// Categories this core does not interpret still round-trip; a category
/// with no rows (including a misspelled one) is an empty array, matching
/// the relational query the legacy surfaces were built against.
#[utoipa::path(
    get,
    path = "/api/menu/{category}",
    params(("category" = String, Path, description = "Catalog category tag, e.g. Drink or Topping")),
    responses(
        (status = 200, description = "Items in the category", body = [MenuItem]),
    ),
    tag = "menu"
)]
pub(crate) async fn menu_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<MenuItem>>, AppError> {
    let category = Category::from(category.as_str());
    let mut items: Vec<MenuItem> = state
        .menu
        .list()
        .into_iter()
        .filter(|item| item.category == category)
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    Ok(Json(items))
}

/// GET /api/menu?search= — name search across the whole catalog (kiosk
/// search box).
#[utoipa::path(
    get,
    path = "/api/menu",
    params(MenuSearch),
    responses(
        (status = 200, description = "Items whose name contains the search term", body = [MenuItem]),
    ),
    tag = "menu"
)]
pub(crate) async fn search_menu(
    State(state): State<AppState>,
    Query(params): Query<MenuSearch>,
) -> Result<Json<Vec<MenuItem>>, AppError> {
    let needle = params.search.unwrap_or_default().to_lowercase();
    let mut items: Vec<MenuItem> = state
        .menu
        .list()
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    Ok(Json(items))
}
