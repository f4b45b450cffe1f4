//! # Catalog Types
//!
//! Menu items as served by the catalog provider. Items are immutable once
//! fetched — the core never writes back to the catalog, it only reads and
//! name-resolves against it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog category tag.
///
/// The fixed variants are the categories this core interprets; anything else
/// the catalog serves (seasonal groupings, display-only sections) round-trips
/// through [`Category::Other`] untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// A sellable drink.
    Drink,
    /// A priced topping (boba, pudding, grass jelly, …).
    Topping,
    /// Size modifier rows ("Small", "Medium", "Large").
    ModifierSize,
    /// Sugar/sweetness modifier rows ("0%" … "120%").
    ModifierSugar,
    /// Ice level modifier rows.
    ModifierIce,
    /// Any category this core does not interpret.
    Other(String),
}

impl Category {
    /// The catalog's string form for this category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Drink => "Drink",
            Self::Topping => "Topping",
            Self::ModifierSize => "Modifier-Size",
            Self::ModifierSugar => "Modifier-Sugar",
            Self::ModifierIce => "Modifier-Ice",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "Drink" => Self::Drink,
            "Topping" => Self::Topping,
            "Modifier-Size" => Self::ModifierSize,
            "Modifier-Sugar" => Self::ModifierSugar,
            "Modifier-Ice" => Self::ModifierIce,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::from(s.as_str()))
    }
}

/// A catalog menu item.
///
/// Field names on the wire match the catalog provider's row shape
/// (`menuid`, `itemname`, `itemprice`, `itemcategory`), so a serialized
/// `MenuItem` is exactly what the composition surfaces already consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    /// Catalog row id.
    #[serde(rename = "menuid")]
    pub id: i32,
    /// Display name.
    #[serde(rename = "itemname")]
    pub name: String,
    /// Unit price.
    #[serde(rename = "itemprice")]
    #[schema(value_type = String)]
    pub price: Decimal,
    /// Category tag.
    #[serde(rename = "itemcategory")]
    #[schema(value_type = String)]
    pub category: Category,
}

/// Reference to a selected topping.
///
/// The unit price travels with the reference, captured from the catalog at
/// selection time. A reference whose price could not be determined carries
/// `None` and contributes zero to pricing — one bad modifier must not block
/// pricing of the rest of the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ToppingRef {
    /// Catalog id of the topping row.
    pub id: i32,
    /// Topping display name.
    pub name: String,
    /// Unit price, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
}

impl ToppingRef {
    /// The price this topping contributes to a line: its unit price, or zero
    /// when the price is unknown.
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn category_round_trips_known_strings() {
        for s in ["Drink", "Topping", "Modifier-Size", "Modifier-Sugar", "Modifier-Ice"] {
            let cat = Category::from(s);
            assert_eq!(cat.as_str(), s);
            assert!(!matches!(cat, Category::Other(_)));
        }
    }

    #[test]
    fn category_preserves_unknown_strings() {
        let cat = Category::from("Seasonal");
        assert_eq!(cat, Category::Other("Seasonal".to_string()));
        assert_eq!(cat.as_str(), "Seasonal");
    }

    #[test]
    fn menu_item_uses_catalog_wire_names() {
        let item = MenuItem {
            id: 12,
            name: "Classic Milk Tea".to_string(),
            price: dec!(5.00),
            category: Category::Drink,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["menuid"], 12);
        assert_eq!(json["itemname"], "Classic Milk Tea");
        assert_eq!(json["itemcategory"], "Drink");
    }

    #[test]
    fn menu_item_deserializes_numeric_price() {
        // Catalog rows and legacy clients send prices as JSON numbers.
        let item: MenuItem = serde_json::from_value(serde_json::json!({
            "menuid": 3,
            "itemname": "Taro Slush",
            "itemprice": 5.75,
            "itemcategory": "Drink",
        }))
        .unwrap();
        assert_eq!(item.price, dec!(5.75));
    }

    #[test]
    fn topping_without_price_contributes_zero() {
        let t = ToppingRef {
            id: 44,
            name: "Mystery Pearl".to_string(),
            price: None,
        };
        assert_eq!(t.price_or_zero(), Decimal::ZERO);
    }
}
