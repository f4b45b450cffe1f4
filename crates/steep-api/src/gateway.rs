//! # Order Submission Gateway
//!
//! Turns a finalized cart submission plus payment info into a persisted
//! order and its constituent drink records.
//!
//! The pipeline: validate → recompute totals server-side → resolve modifier
//! names against the catalog → fan out quantity lines into per-unit drink
//! records → commit (database transaction in persistent mode, a single
//! ledger write otherwise).
//!
//! Client-submitted subtotal/tax/total figures are display hints only; the
//! persisted line prices and the configured tax rate are the source of
//! truth. A resolution miss on any one modifier is recorded as absent and
//! flagged — it must never block payment capture.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use steep_core::{
    round_money, Category, DrinkRecord, MenuItem, ModifierRef, ModifierSelection, OrderRecord,
    OrderTotals, PaymentMethod,
};

use crate::error::AppError;
use crate::state::{AppState, Store};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One submitted cart line.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaceOrderItem {
    /// Drink display name.
    pub name: String,
    /// Catalog id of the base drink, when the client resolved it.
    #[serde(default)]
    pub menuid: Option<i32>,
    /// Units of this line.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Line unit price (base + surcharge + toppings) as priced at commit.
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// The customization for every unit of this line.
    #[serde(default)]
    pub modifications: ModifierSelection,
}

fn default_quantity() -> u32 {
    1
}

/// Checkout submission body for `POST /api/orders/place`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    /// The client's order-number preview. A hint only — the authoritative
    /// number is allocated server-side under a serialization guarantee.
    #[serde(default)]
    pub order_number: Option<i64>,
    /// Payment method; required.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    /// Client-computed subtotal (display hint).
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub subtotal: Option<Decimal>,
    /// Client-computed tax (display hint).
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub tax: Option<Decimal>,
    /// Tip amount, absent means none.
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub tip: Option<Decimal>,
    /// Client-computed grand total (display hint).
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub total: Option<Decimal>,
    /// The cart lines.
    pub items: Vec<PlaceOrderItem>,
    /// Customer name for the kitchen ticket, when known.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Client clock at submission. Informational; the committed `placed_at`
    /// is server time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Successful checkout response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The assigned order number.
    pub orderid: i64,
    /// Authoritative grand total.
    #[schema(value_type = String)]
    pub total: Decimal,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a submission. Everything here is a synchronous 400 — the caller
/// corrects the input; no state was touched.
fn validate(req: &PlaceOrderRequest) -> Result<PaymentMethod, AppError> {
    if req.items.is_empty() {
        return Err(AppError::Validation("cart is empty".to_string()));
    }
    let payment = req
        .payment_method
        .ok_or_else(|| AppError::Validation("paymentMethod is required".to_string()))?;
    if let Some(tip) = req.tip {
        if tip.is_sign_negative() {
            return Err(AppError::Validation(format!("tip must not be negative: {tip}")));
        }
    }
    for item in &req.items {
        if item.quantity < 1 {
            return Err(AppError::Validation(format!(
                "quantity must be at least 1 for {:?}",
                item.name
            )));
        }
        if item.price.is_sign_negative() {
            return Err(AppError::Validation(format!(
                "price must not be negative for {:?}",
                item.name
            )));
        }
    }
    Ok(payment)
}

// ---------------------------------------------------------------------------
// Catalog resolution
// ---------------------------------------------------------------------------

/// Resolve a modifier name to a catalog reference by case-insensitive name
/// match within a category. A miss keeps the name, drops the id, and is
/// flagged in the logs — never silently defaulted to an unrelated item.
fn resolve_modifier(menu: &Store<i32, MenuItem>, category: Category, name: &str) -> ModifierRef {
    let hit = menu
        .list()
        .into_iter()
        .find(|item| item.category == category && item.name.eq_ignore_ascii_case(name));
    match hit {
        Some(item) => ModifierRef::resolved(item.id, name),
        None => {
            tracing::warn!(category = %category, name, "modifier did not resolve to a catalog item");
            ModifierRef::unresolved(name)
        }
    }
}

/// Resolve the base drink's catalog id: trust a submitted id that exists,
/// otherwise fall back to name-matching.
fn resolve_drink(menu: &Store<i32, MenuItem>, item: &PlaceOrderItem) -> Option<i32> {
    if let Some(id) = item.menuid {
        if menu.get(&id).is_some() {
            return Some(id);
        }
        tracing::warn!(menuid = id, name = %item.name, "submitted menu id not in catalog");
    }
    resolve_modifier(menu, Category::Drink, &item.name).menu_id
}

/// Fan a submitted line out into per-unit drink records with resolved
/// modifier references. A quantity-3 line yields 3 independent records.
fn fan_out(menu: &Store<i32, MenuItem>, item: &PlaceOrderItem) -> Vec<DrinkRecord> {
    let mods = &item.modifications;
    let menu_id = resolve_drink(menu, item);
    let size = resolve_modifier(menu, Category::ModifierSize, mods.size.as_str());
    let sugar = resolve_modifier(menu, Category::ModifierSugar, mods.sweetness.as_str());
    let ice = resolve_modifier(menu, Category::ModifierIce, mods.ice.as_str());
    let toppings: Vec<ModifierRef> = mods
        .toppings
        .iter()
        .map(|t| resolve_modifier(menu, Category::Topping, &t.name))
        .collect();

    (0..item.quantity)
        .map(|_| DrinkRecord {
            id: Uuid::new_v4(),
            menu_id,
            name: item.name.clone(),
            price: item.price,
            size: Some(size.clone()),
            sugar: Some(sugar.clone()),
            ice: Some(ice.clone()),
            toppings: toppings.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Place an order: the one transition from cart to kitchen ticket.
///
/// On success the order is recorded in the ledger (and the database when
/// configured), the submitting session's server-side cart is destroyed, and
/// the order is visible to the kitchen's next read. On persistence failure
/// nothing is recorded and the session cart is untouched — all drink rows of
/// an order commit or none do — so the client can retry with the same cart.
///
/// `session` is the browsing session from the `X-Session-Id` header, when
/// the surface keeps its cart server-side.
pub async fn place_order(
    state: &AppState,
    session: Option<Uuid>,
    req: PlaceOrderRequest,
) -> Result<PlaceOrderResponse, AppError> {
    let payment = validate(&req)?;

    // Authoritative totals from the submitted line prices and the configured
    // rate. The client's figures are a display hint only.
    let raw_subtotal: Decimal = req
        .items
        .iter()
        .map(|i| i.price * Decimal::from(i.quantity))
        .sum();
    let totals = OrderTotals::compute(raw_subtotal, state.config.tax_rate, req.tip);

    if let Some(client_total) = req.total {
        if (round_money(client_total) - totals.total).abs() > Decimal::new(1, 2) {
            tracing::warn!(
                client_total = %client_total,
                server_total = %totals.total,
                "client-submitted total drifts from authoritative total"
            );
        }
    }

    let drinks: Vec<DrinkRecord> = req
        .items
        .iter()
        .flat_map(|item| fan_out(&state.menu, item))
        .collect();

    let placed_at = Utc::now();

    // Allocate and commit. In persistent mode the number comes from the
    // orders table's identity column inside the same transaction as the
    // drink-row inserts, so a crash mid-insert leaves nothing visible. In
    // in-memory mode the fetch_add allocator gives the same uniqueness
    // guarantee.
    let order_number = match &state.db_pool {
        Some(pool) => crate::db::orders::insert_order(
            pool,
            placed_at,
            req.customer_name.as_deref(),
            payment,
            &totals,
            &drinks,
        )
        .await
        .map_err(|e| AppError::Internal(format!("order persistence failed: {e}")))?,
        None => state.orders.allocate(),
    };

    if let Some(preview) = req.order_number {
        if preview != order_number {
            tracing::debug!(preview, assigned = order_number, "order-number preview was stale");
        }
    }

    let record = OrderRecord {
        order_number,
        placed_at,
        customer_name: req.customer_name,
        payment,
        totals,
        drinks,
    };
    state.orders.record(record);

    // Checkout succeeded: the session's cart is done. Failures above leave
    // it intact for retry.
    if let Some(session) = session {
        state.carts.take(session);
    }

    tracing::info!(order_number, total = %totals.total, "order placed");

    Ok(PlaceOrderResponse {
        success: true,
        orderid: order_number,
        total: totals.total,
    })
}
