#![deny(missing_docs)]

//! # steep-core — Foundational Types for the Steep POS
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, `uuid`, `rust_decimal`, and `utoipa` from the
//! external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Typed modifiers.** Size, temperature, sweetness, and ice level are
//!    closed enums with fixed wire strings. An invalid modifier string is a
//!    deserialization error at the boundary, never a silently-stored junk
//!    value.
//!
//! 2. **[`Decimal`] everywhere money flows.** Currency amounts never touch
//!    floating point. Rounding to two decimal places happens only at the
//!    display/wire boundary via [`money::round_money`]; intermediate
//!    arithmetic keeps full precision so repeated add/remove cycles cannot
//!    compound rounding error.
//!
//! 3. **Pricing is a pure function.** [`pricing::unit_price`] is total,
//!    idempotent, and independent of the order in which toppings were
//!    toggled. A topping with no known price contributes zero rather than
//!    failing the whole computation.
//!
//! [`Decimal`]: rust_decimal::Decimal

pub mod catalog;
pub mod modifiers;
pub mod money;
pub mod order;
pub mod pricing;

pub use catalog::{Category, MenuItem, ToppingRef};
pub use modifiers::{
    IceLevel, ModifierSelection, Size, Sweetness, Temperature, UnknownModifierError,
};
pub use money::{round_money, OrderTotals, TaxRate, TaxRateError};
pub use order::{DrinkRecord, ModifierRef, OrderRecord, PaymentMethod};
pub use pricing::unit_price;
