//! # Persisted Order Records
//!
//! The shapes an order takes once checkout commits it: one header record
//! plus one drink record per *unit* (a quantity-3 cart line fans out to
//! three independent drinks, each carrying its own resolved modifier
//! references). Immutable once persisted, except the tip in some flows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::money::OrderTotals;

/// How the order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment.
    Card,
    /// Cash payment.
    Cash,
}

impl PaymentMethod {
    /// Wire string for this payment method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modifier resolved against the catalog at write time.
///
/// Resolution happens by name-matching; a miss leaves `menu_id` as `None`
/// (flagged in the logs) rather than aborting the order or defaulting to an
/// unrelated catalog row. The name is always retained so the kitchen can
/// still display what was ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModifierRef {
    /// Catalog row id, absent when name resolution missed.
    pub menu_id: Option<i32>,
    /// The modifier name as ordered.
    pub name: String,
}

impl ModifierRef {
    /// A resolved reference.
    pub fn resolved(menu_id: i32, name: impl Into<String>) -> Self {
        Self {
            menu_id: Some(menu_id),
            name: name.into(),
        }
    }

    /// An unresolved reference — name retained, id absent.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            menu_id: None,
            name: name.into(),
        }
    }
}

/// One prepared drink: a single unit of a cart line after fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrinkRecord {
    /// Stable record id.
    pub id: Uuid,
    /// Catalog id of the base drink, absent when resolution missed.
    pub menu_id: Option<i32>,
    /// Drink display name.
    pub name: String,
    /// Line unit price at checkout (base + surcharge + toppings).
    #[schema(value_type = String)]
    pub price: Decimal,
    /// Resolved size modifier.
    pub size: Option<ModifierRef>,
    /// Resolved sugar modifier.
    pub sugar: Option<ModifierRef>,
    /// Resolved ice modifier.
    pub ice: Option<ModifierRef>,
    /// All resolved toppings, in selection order.
    pub toppings: Vec<ModifierRef>,
}

/// A persisted order: header figures plus the fanned-out drink records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderRecord {
    /// Sequential order number — the kitchen's ticket key.
    pub order_number: i64,
    /// When checkout committed.
    pub placed_at: DateTime<Utc>,
    /// Customer name, when a customer session supplied one.
    pub customer_name: Option<String>,
    /// Payment method.
    pub payment: PaymentMethod,
    /// Published money figures.
    pub totals: OrderTotals,
    /// One record per drink unit.
    pub drinks: Vec<DrinkRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::TaxRate;
    use rust_decimal_macros::dec;

    #[test]
    fn payment_method_wire_strings() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Card).unwrap(),
            "\"card\""
        );
        let m: PaymentMethod = serde_json::from_str("\"cash\"").unwrap();
        assert_eq!(m, PaymentMethod::Cash);
        assert!(serde_json::from_str::<PaymentMethod>("\"points\"").is_err());
    }

    #[test]
    fn unresolved_modifier_keeps_name() {
        let m = ModifierRef::unresolved("Dragonfruit Pop");
        assert_eq!(m.menu_id, None);
        assert_eq!(m.name, "Dragonfruit Pop");
    }

    #[test]
    fn order_record_serde_round_trip() {
        let record = OrderRecord {
            order_number: 41,
            placed_at: Utc::now(),
            customer_name: Some("Ada".to_string()),
            payment: PaymentMethod::Card,
            totals: OrderTotals::compute(
                dec!(7.70),
                TaxRate::from_percent(dec!(8.25)).unwrap(),
                None,
            ),
            drinks: vec![DrinkRecord {
                id: Uuid::new_v4(),
                menu_id: Some(12),
                name: "Classic Milk Tea".to_string(),
                price: dec!(7.70),
                size: Some(ModifierRef::resolved(31, "Large")),
                sugar: Some(ModifierRef::resolved(42, "100%")),
                ice: None,
                toppings: vec![ModifierRef::resolved(51, "Boba")],
            }],
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: OrderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
