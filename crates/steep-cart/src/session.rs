//! Session-scoped cart storage.
//!
//! One cart per browsing session, alive across page loads within that
//! session and destroyed on checkout or logout. The lock is `parking_lot`,
//! never held across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::cart::Cart;

/// Process-wide map of browsing session → cart.
///
/// Cloning shares the underlying storage, so every surface handler sees the
/// same carts.
#[derive(Debug, Default)]
pub struct SessionCarts {
    carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
}

impl Clone for SessionCarts {
    fn clone(&self) -> Self {
        Self {
            carts: Arc::clone(&self.carts),
        }
    }
}

impl SessionCarts {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the cart for a session, creating an empty one on first use.
    pub fn load(&self, session: Uuid) -> Cart {
        if let Some(cart) = self.carts.read().get(&session) {
            return cart.clone();
        }
        self.carts.write().entry(session).or_default().clone()
    }

    /// Mutate a session's cart under the write lock and return the closure's
    /// result. Every mutating cart operation goes through here, which is what
    /// makes the cart durable across a reload within the session.
    pub fn with_cart<R>(&self, session: Uuid, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut guard = self.carts.write();
        f(guard.entry(session).or_default())
    }

    /// Remove and return a session's cart (successful checkout or logout).
    pub fn take(&self, session: Uuid) -> Option<Cart> {
        self.carts.write().remove(&session)
    }

    /// Number of live session carts.
    pub fn len(&self) -> usize {
        self.carts.read().len()
    }

    /// Whether no session carts exist.
    pub fn is_empty(&self) -> bool {
        self.carts.read().is_empty()
    }
}
