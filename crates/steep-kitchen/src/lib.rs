//! # steep-kitchen — Kitchen Fulfillment
//!
//! The kitchen never owns order data. It owns two small pieces of
//! process-wide overlay state — a status per order and a bumped marker per
//! order — and a projection that joins persisted orders with that overlay
//! into display tickets.
//!
//! ## Status lifecycle
//!
//! ```text
//! New ──▶ In Progress ──▶ Done
//!  └────────── (operator override) ──▶ Done
//! ```
//!
//! `bump` is orthogonal: from any status it removes the ticket from the
//! active board permanently (until an explicit [`TicketBoard::reset`], e.g.
//! daily rollover). Re-insertion is not a supported operation.
//!
//! ## Durability
//!
//! The overlay is deliberately process-scoped and non-durable: a restart
//! reverts every ticket to New and clears the bumped set. The relational
//! store remains the source of truth for the orders themselves.

pub mod board;
pub mod ticket;

pub use board::TicketBoard;
pub use ticket::{KitchenTicket, TicketError, TicketItem, TicketStatus};
