//! # Pricing Engine
//!
//! One pure function turns a base unit price plus a modifier selection into
//! a line unit price: base + size surcharge + Σ topping prices. Sweetness,
//! ice, and temperature carry no price delta. The result is unrounded —
//! rounding happens at the display/wire boundary only.

use rust_decimal::Decimal;

use crate::modifiers::{ModifierSelection, Size};

impl Size {
    /// Fixed surcharge for this cup size.
    pub fn surcharge(&self) -> Decimal {
        match self {
            Self::Small => Decimal::ZERO,
            Self::Medium => Decimal::new(50, 2),
            Self::Large => Decimal::ONE,
        }
    }
}

/// Price one unit of a configured drink.
///
/// Total and idempotent: the same selection always prices the same, and a
/// topping with no known price contributes zero instead of failing the
/// computation. Callable on every modifier change for real-time
/// recalculation.
pub fn unit_price(base: Decimal, modifiers: &ModifierSelection) -> Decimal {
    let toppings: Decimal = modifiers.toppings.iter().map(|t| t.price_or_zero()).sum();
    base + modifiers.size.surcharge() + toppings
}
