//! Menu persistence operations.
//!
//! The catalog is owned by the external menu-management CRUD; this module
//! only reads it into the in-memory snapshot at startup.

use rust_decimal::Decimal;
use sqlx::PgPool;

use steep_core::{Category, MenuItem};

/// Load every menu row for hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<MenuItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MenuRow>(
        "SELECT menuid, itemname, itemprice, itemcategory FROM menu ORDER BY menuid",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| MenuItem {
            id: r.menuid,
            name: r.itemname,
            price: r.itemprice,
            category: Category::from(r.itemcategory.as_str()),
        })
        .collect())
}

#[derive(sqlx::FromRow)]
struct MenuRow {
    menuid: i32,
    itemname: String,
    itemprice: Decimal,
    itemcategory: String,
}
