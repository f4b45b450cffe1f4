//! Order persistence operations.
//!
//! The order header and its per-unit drink rows are written in one
//! transaction: all rows commit or none do, so a crash mid-insert never
//! leaves a half-written order visible to the kitchen. The order number
//! comes from the `orders` table's identity column via `RETURNING` —
//! allocation and insert are the same atomic statement, which is what rules
//! out duplicate numbers under concurrent checkouts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use steep_core::{
    DrinkRecord, ModifierRef, OrderRecord, OrderTotals, PaymentMethod,
};

/// Insert an order and its drink rows atomically, returning the assigned
/// order number.
pub async fn insert_order(
    pool: &PgPool,
    placed_at: DateTime<Utc>,
    customer_name: Option<&str>,
    payment: PaymentMethod,
    totals: &OrderTotals,
    drinks: &[DrinkRecord],
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (order_number,): (i64,) = sqlx::query_as(
        "INSERT INTO orders (placed_at, customer_name, payment_method, subtotal, tax, tip, total)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING order_number",
    )
    .bind(placed_at)
    .bind(customer_name)
    .bind(payment.as_str())
    .bind(totals.subtotal)
    .bind(totals.tax)
    .bind(totals.tip)
    .bind(totals.total)
    .fetch_one(&mut *tx)
    .await?;

    for drink in drinks {
        let toppings = serde_json::to_value(&drink.toppings)
            .map_err(|e| sqlx::Error::Protocol(format!("failed to serialize toppings: {e}")))?;

        sqlx::query(
            "INSERT INTO order_drinks (drink_id, order_number, menu_id, name, price,
                                       size_menu_id, size_name, sugar_menu_id, sugar_name,
                                       ice_menu_id, ice_name, toppings)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(drink.id)
        .bind(order_number)
        .bind(drink.menu_id)
        .bind(&drink.name)
        .bind(drink.price)
        .bind(drink.size.as_ref().and_then(|m| m.menu_id))
        .bind(drink.size.as_ref().map(|m| m.name.as_str()))
        .bind(drink.sugar.as_ref().and_then(|m| m.menu_id))
        .bind(drink.sugar.as_ref().map(|m| m.name.as_str()))
        .bind(drink.ice.as_ref().and_then(|m| m.menu_id))
        .bind(drink.ice.as_ref().map(|m| m.name.as_str()))
        .bind(&toppings)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(order_number)
}

/// The highest order number ever assigned (0 when the table is empty).
/// Seeds the in-memory allocator at startup.
pub async fn max_order_number(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (max,): (i64,) =
        sqlx::query_as("SELECT COALESCE(MAX(order_number), 0) FROM orders")
            .fetch_one(pool)
            .await?;
    Ok(max)
}

/// Load today's orders with their drink rows for hydration.
pub async fn load_today(pool: &PgPool) -> Result<Vec<OrderRecord>, sqlx::Error> {
    let headers = sqlx::query_as::<_, OrderRow>(
        "SELECT order_number, placed_at, customer_name, payment_method, subtotal, tax, tip, total
         FROM orders WHERE placed_at::date = CURRENT_DATE ORDER BY order_number",
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(headers.len());
    for row in headers {
        let drinks = load_drinks_for_order(pool, row.order_number).await?;
        records.push(OrderRecord {
            order_number: row.order_number,
            placed_at: row.placed_at,
            customer_name: row.customer_name,
            payment: parse_payment(&row.payment_method),
            totals: OrderTotals {
                subtotal: row.subtotal,
                tax: row.tax,
                tip: row.tip,
                total: row.total,
            },
            drinks,
        });
    }
    Ok(records)
}

/// Load the drink rows for one order.
async fn load_drinks_for_order(
    pool: &PgPool,
    order_number: i64,
) -> Result<Vec<DrinkRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DrinkRow>(
        "SELECT drink_id, menu_id, name, price, size_menu_id, size_name,
                sugar_menu_id, sugar_name, ice_menu_id, ice_name, toppings
         FROM order_drinks WHERE order_number = $1 ORDER BY drink_id",
    )
    .bind(order_number)
    .fetch_all(pool)
    .await?;

    let mut drinks = Vec::with_capacity(rows.len());
    for r in rows {
        let toppings: Vec<ModifierRef> = serde_json::from_value(r.toppings).map_err(|e| {
            sqlx::Error::Protocol(format!("corrupt toppings in drink {}: {e}", r.drink_id))
        })?;
        drinks.push(DrinkRecord {
            id: r.drink_id,
            menu_id: r.menu_id,
            name: r.name,
            price: r.price,
            size: modifier_ref(r.size_menu_id, r.size_name),
            sugar: modifier_ref(r.sugar_menu_id, r.sugar_name),
            ice: modifier_ref(r.ice_menu_id, r.ice_name),
            toppings,
        });
    }
    Ok(drinks)
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_number: i64,
    placed_at: DateTime<Utc>,
    customer_name: Option<String>,
    payment_method: String,
    subtotal: Decimal,
    tax: Decimal,
    tip: Decimal,
    total: Decimal,
}

#[derive(sqlx::FromRow)]
struct DrinkRow {
    drink_id: Uuid,
    menu_id: Option<i32>,
    name: String,
    price: Decimal,
    size_menu_id: Option<i32>,
    size_name: Option<String>,
    sugar_menu_id: Option<i32>,
    sugar_name: Option<String>,
    ice_menu_id: Option<i32>,
    ice_name: Option<String>,
    toppings: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_payment(s: &str) -> PaymentMethod {
    match s {
        "card" => PaymentMethod::Card,
        "cash" => PaymentMethod::Cash,
        other => {
            tracing::warn!(value = other, "unrecognized payment method in database, defaulting to cash");
            PaymentMethod::Cash
        }
    }
}

fn modifier_ref(menu_id: Option<i32>, name: Option<String>) -> Option<ModifierRef> {
    name.map(|name| ModifierRef { menu_id, name })
}
