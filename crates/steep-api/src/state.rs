//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! ## Architecture
//!
//! - **Menu store** — in-memory catalog snapshot, hydrated from the
//!   relational store when one is configured. Read-only to this core.
//! - **Order ledger** — today's persisted orders plus the atomic
//!   order-number counter. The ledger is authoritative for order existence;
//!   in database mode every write also lands in Postgres before it lands
//!   here.
//! - **Ticket board** — the kitchen's status/bump overlay
//!   ([`steep_kitchen::TicketBoard`]), deliberately non-durable.
//! - **Session carts** — one cart per browsing session
//!   ([`steep_cart::SessionCarts`]).
//!
//! All locks are `parking_lot` and never held across `.await` points.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use sqlx::PgPool;

use steep_cart::SessionCarts;
use steep_core::{MenuItem, OrderRecord, TaxRate};
use steep_kitchen::TicketBoard;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points, and
/// a panicking writer cannot poison it.
#[derive(Debug)]
pub struct Store<K, T> {
    data: Arc<RwLock<HashMap<K, T>>>,
}

impl<K, T> Clone for Store<K, T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Eq + Hash + Copy, T: Clone> Store<K, T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, key: K, value: T) -> Option<T> {
        self.data.write().insert(key, value)
    }

    /// Retrieve a record by key.
    pub fn get(&self, key: &K) -> Option<T> {
        self.data.read().get(key).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Check if a record exists.
    #[allow(dead_code)]
    pub fn contains(&self, key: &K) -> bool {
        self.data.read().contains_key(key)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash + Copy, T: Clone> Default for Store<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Order Ledger -------------------------------------------------------------

/// In-memory order store plus the atomic order-number allocator.
///
/// Numbering is sequential from the current maximum, but allocation is a
/// single `fetch_add` — two concurrent checkouts can never observe the same
/// value. (The legacy surfaces read the max over HTTP and added one
/// client-side; that preview still exists as `GET /api/orders` but is never
/// used for allocation.)
#[derive(Debug)]
pub struct OrderLedger {
    orders: Arc<RwLock<BTreeMap<i64, OrderRecord>>>,
    next_number: Arc<AtomicI64>,
}

impl Clone for OrderLedger {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            next_number: Arc::clone(&self.next_number),
        }
    }
}

impl OrderLedger {
    /// Create an empty ledger; the first allocated number is 1.
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(BTreeMap::new())),
            next_number: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Allocate the next order number (in-memory mode). Atomic.
    pub fn allocate(&self) -> i64 {
        self.next_number.fetch_add(1, Ordering::SeqCst)
    }

    /// Advance the allocator past a number assigned elsewhere (the database
    /// identity column in persistent mode, or hydration at startup).
    pub fn observe(&self, assigned: i64) {
        self.next_number.fetch_max(assigned + 1, Ordering::SeqCst);
    }

    /// The highest order number seen so far (0 when none).
    pub fn max_number(&self) -> i64 {
        self.next_number.load(Ordering::SeqCst) - 1
    }

    /// Record a committed order.
    pub fn record(&self, order: OrderRecord) {
        self.observe(order.order_number);
        self.orders.write().insert(order.order_number, order);
    }

    /// Retrieve an order by number.
    pub fn get(&self, number: i64) -> Option<OrderRecord> {
        self.orders.read().get(&number).cloned()
    }

    /// Orders placed today (UTC), in number order — the kitchen's read set.
    pub fn today(&self) -> Vec<OrderRecord> {
        let today = Utc::now().date_naive();
        self.orders
            .read()
            .values()
            .filter(|o| o.placed_at.date_naive() == today)
            .cloned()
            .collect()
    }

    /// Number of recorded orders.
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    /// Whether no orders are recorded.
    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::new()
    }
}

// -- Application State --------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Sales tax rate for server-side total computation. Each surface
    /// deployment configures its own published rate.
    pub tax_rate: TaxRate,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            // The customer kiosk's published rate; the cashier deployment
            // overrides via TAX_RATE_PERCENT.
            tax_rate: TaxRate::from_percent(Decimal::new(625, 2))
                .expect("6.25 is a valid tax percentage"),
        }
    }
}

impl AppConfig {
    /// Build configuration from the environment (`PORT`,
    /// `TAX_RATE_PERCENT`).
    pub fn from_env() -> Result<Self, steep_core::TaxRateError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let tax_rate = match std::env::var("TAX_RATE_PERCENT") {
            Ok(raw) => TaxRate::parse_percent(&raw)?,
            Err(_) => Self::default().tax_rate,
        };
        Ok(Self { port, tax_rate })
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in each store.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog snapshot, keyed by menu id.
    pub menu: Store<i32, MenuItem>,
    /// Committed orders and the number allocator.
    pub orders: OrderLedger,
    /// Kitchen status/bump overlay.
    pub board: Arc<TicketBoard>,
    /// Per-session carts.
    pub carts: SessionCarts,
    /// PostgreSQL pool for durable persistence. `None` means in-memory-only
    /// mode (development and testing).
    pub db_pool: Option<PgPool>,
    /// Configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create state with default configuration and no database.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create state with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            menu: Store::new(),
            orders: OrderLedger::new(),
            board: Arc::new(TicketBoard::new()),
            carts: SessionCarts::new(),
            db_pool,
            config,
        }
    }

    /// Hydrate in-memory stores from the database.
    ///
    /// Called once on startup when a pool is available: loads the menu,
    /// today's orders (so the kitchen board is immediately populated), and
    /// seeds the order-number allocator from the all-time maximum.
    pub async fn hydrate_from_db(&self) -> Result<(), sqlx::Error> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let items = crate::db::menu::load_all(pool).await?;
        let menu_count = items.len();
        for item in items {
            self.menu.insert(item.id, item);
        }

        let orders = crate::db::orders::load_today(pool).await?;
        let order_count = orders.len();
        for order in orders {
            self.orders.record(order);
        }

        let max = crate::db::orders::max_order_number(pool).await?;
        self.orders.observe(max);

        tracing::info!(
            menu_items = menu_count,
            todays_orders = order_count,
            max_order_number = max,
            "hydrated in-memory stores from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use steep_core::{OrderTotals, PaymentMethod};

    fn sample_order(number: i64) -> OrderRecord {
        OrderRecord {
            order_number: number,
            placed_at: Utc::now(),
            customer_name: None,
            payment: PaymentMethod::Cash,
            totals: OrderTotals::compute(
                dec!(5.00),
                TaxRate::from_percent(dec!(6.25)).unwrap(),
                None,
            ),
            drinks: vec![],
        }
    }

    // -- Store ----------------------------------------------------------------

    #[test]
    fn store_insert_get_list() {
        let store: Store<i32, String> = Store::new();
        assert!(store.is_empty());
        assert!(store.insert(1, "a".to_string()).is_none());
        assert_eq!(store.insert(1, "b".to_string()), Some("a".to_string()));
        assert_eq!(store.get(&1), Some("b".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list(), vec!["b".to_string()]);
    }

    #[test]
    fn store_clone_shares_data() {
        let store: Store<i32, i32> = Store::new();
        let clone = store.clone();
        clone.insert(7, 42);
        assert_eq!(store.get(&7), Some(42));
    }

    // -- OrderLedger ----------------------------------------------------------

    #[test]
    fn ledger_allocates_sequentially_from_one() {
        let ledger = OrderLedger::new();
        assert_eq!(ledger.max_number(), 0);
        assert_eq!(ledger.allocate(), 1);
        assert_eq!(ledger.allocate(), 2);
        assert_eq!(ledger.max_number(), 2);
    }

    #[test]
    fn ledger_observe_seeds_allocator() {
        let ledger = OrderLedger::new();
        ledger.observe(41);
        assert_eq!(ledger.allocate(), 42);
        // Observing a smaller number never moves the counter backwards.
        ledger.observe(10);
        assert_eq!(ledger.allocate(), 43);
    }

    #[test]
    fn concurrent_allocation_never_duplicates() {
        let ledger = OrderLedger::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let ledger = ledger.clone();
            handles.push(std::thread::spawn(move || {
                (0..100).map(|_| ledger.allocate()).collect::<Vec<i64>>()
            }));
        }
        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800, "two checkouts shared an order number");
    }

    #[test]
    fn ledger_record_and_get() {
        let ledger = OrderLedger::new();
        ledger.record(sample_order(5));
        assert_eq!(ledger.get(5).unwrap().order_number, 5);
        assert!(ledger.get(6).is_none());
        assert_eq!(ledger.max_number(), 5);
        assert_eq!(ledger.allocate(), 6);
    }

    #[test]
    fn today_filters_out_older_orders() {
        let ledger = OrderLedger::new();
        let mut yesterday = sample_order(1);
        yesterday.placed_at = Utc::now() - Duration::days(1);
        ledger.record(yesterday);
        ledger.record(sample_order(2));

        let today = ledger.today();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].order_number, 2);
    }

    // -- AppConfig / AppState -------------------------------------------------

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.tax_rate.fraction(), dec!(0.0625));
    }

    #[test]
    fn app_state_new_is_empty() {
        let state = AppState::new();
        assert!(state.menu.is_empty());
        assert!(state.orders.is_empty());
        assert!(state.carts.is_empty());
        assert!(state.db_pool.is_none());
    }
}
