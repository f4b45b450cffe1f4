//! # API Route Modules
//!
//! Route modules for the Steep POS API surface:
//!
//! - `menu` — Catalog reads: items by category, topping list, name search.
//!   Consumed by the composition surfaces; read-only.
//! - `orders` — Order-number preview and the order submission gateway
//!   (checkout → persisted order → kitchen visibility).
//! - `kitchen` — The kitchen ticket board: assembled tickets, status
//!   transitions, and bump.

pub mod kitchen;
pub mod menu;
pub mod orders;
