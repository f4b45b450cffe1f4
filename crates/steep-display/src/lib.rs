//! # steep-display — Kitchen Display Client
//!
//! The kitchen display is a thin, honest client of the ticket board:
//!
//! - It polls `GET /api/kitchen/orders` on a fixed interval (30 seconds by
//!   default) and fully replaces its rendered ticket set on every
//!   successful refresh.
//! - Every locally issued transition (start, done, bump) is awaited and then
//!   followed by an immediate re-fetch, so the operator sees the
//!   authoritative post-transition state rather than an optimistic local
//!   guess.
//! - A failed request never corrupts the board: the last good ticket set
//!   stays rendered, with the failure surfaced inline until the next
//!   successful refresh.

pub mod client;
pub mod config;
pub mod display;
pub mod error;

pub use client::KitchenClient;
pub use config::DisplayConfig;
pub use display::DisplayBoard;
pub use error::DisplayError;
