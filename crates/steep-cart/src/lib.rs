//! # steep-cart — Order Composition
//!
//! The cart is the single-session, mutable collection of configured drink
//! lines awaiting checkout. Lines are addressed by stable [`LineId`]s rather
//! than positional indices: removing a line can never invalidate a handle
//! some other part of the surface is still holding. Display order remains
//! insertion order.
//!
//! Pricing happens at commit time — [`Cart::add_line`] and
//! [`Cart::update_line`] run the selection through the pricing engine when
//! the customer confirms the popup, so the stored unit price always reflects
//! the final modifier state.
//!
//! The cart is fully serializable; [`session::SessionCarts`] keeps one cart
//! per browsing session so the representation survives page reloads and dies
//! with checkout or logout.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartError, CartLine, LineId, QuantityChange};
pub use session::SessionCarts;
