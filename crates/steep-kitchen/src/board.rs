//! The process-wide ticket board.

use dashmap::{DashMap, DashSet};

use steep_core::OrderRecord;

use crate::ticket::{KitchenTicket, TicketError, TicketStatus};

/// Status and bump overlay for today's orders, keyed by order number.
///
/// Shared mutable state for every kitchen display client hitting this
/// process. Mutations are atomic per order id (the `DashMap` entry guard is
/// a per-shard write lock); tickets are independent, so no cross-order
/// locking exists. The overlay is not durable — a process restart resets
/// every ticket to New and un-marks nothing, because the bumped set is gone
/// too. That reset-on-restart behavior is deliberate and documented at the
/// crate root.
#[derive(Debug, Default)]
pub struct TicketBoard {
    statuses: DashMap<i64, TicketStatus>,
    bumped: DashSet<i64>,
}

impl TicketBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of an order. Orders with no recorded status are New.
    pub fn status_of(&self, order_id: i64) -> TicketStatus {
        self.statuses
            .get(&order_id)
            .map(|s| *s.value())
            .unwrap_or_default()
    }

    /// Whether an order has been bumped off the board.
    pub fn is_bumped(&self, order_id: i64) -> bool {
        self.bumped.contains(&order_id)
    }

    /// Apply a status update.
    ///
    /// Validates the change against the current status and writes it under a
    /// single entry lock — a compare-and-set per order id. Duplicate
    /// deliveries of the same status land as no-ops. Bumped orders are no
    /// longer addressable.
    pub fn advance(&self, order_id: i64, target: TicketStatus) -> Result<TicketStatus, TicketError> {
        if self.bumped.contains(&order_id) {
            return Err(TicketError::Bumped(order_id));
        }
        let mut entry = self.statuses.entry(order_id).or_default();
        let current = *entry.value();
        if !current.can_become(target) {
            return Err(TicketError::InvalidTransition {
                from: current,
                to: target,
            });
        }
        *entry.value_mut() = target;
        tracing::debug!(order_id, from = %current, to = %target, "ticket advanced");
        Ok(target)
    }

    /// Bump an order: remove it from the active board from any status.
    ///
    /// Clears the stored status — the board retains no history for bumped
    /// orders, only the marker that keeps them off every subsequent read.
    /// Idempotent.
    pub fn bump(&self, order_id: i64) {
        self.bumped.insert(order_id);
        self.statuses.remove(&order_id);
        tracing::debug!(order_id, "ticket bumped");
    }

    /// Clear all overlay state (daily rollover). After a reset, previously
    /// bumped orders would reappear as New if their rows are still served by
    /// the order read — rollover and the "today" filter move together.
    pub fn reset(&self) {
        self.statuses.clear();
        self.bumped.clear();
    }

    /// Project persisted orders into the active ticket set.
    ///
    /// Bumped orders are skipped; everything else is overlaid with its
    /// current status (default New) and sorted by (order time, order id) —
    /// the queue discipline. The id tie-break keeps the ordering stable and
    /// FIFO-deterministic even when timestamps collide at the store's
    /// granularity.
    pub fn project<'a>(&self, orders: impl IntoIterator<Item = &'a OrderRecord>) -> Vec<KitchenTicket> {
        let mut tickets: Vec<KitchenTicket> = orders
            .into_iter()
            .filter(|o| !self.is_bumped(o.order_number))
            .map(|o| KitchenTicket::from_order(o, self.status_of(o.order_number)))
            .collect();
        tickets.sort_by(|a, b| {
            a.order_time
                .cmp(&b.order_time)
                .then(a.order_id.cmp(&b.order_id))
        });
        tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use steep_core::{DrinkRecord, ModifierRef, OrderTotals, PaymentMethod, TaxRate};
    use uuid::Uuid;

    fn order_at(number: i64, minute: u32) -> OrderRecord {
        OrderRecord {
            order_number: number,
            placed_at: Utc.with_ymd_and_hms(2026, 8, 7, 9, minute, 0).unwrap(),
            customer_name: None,
            payment: PaymentMethod::Card,
            totals: OrderTotals::compute(
                dec!(5.00),
                TaxRate::from_percent(dec!(6.25)).unwrap(),
                None,
            ),
            drinks: vec![DrinkRecord {
                id: Uuid::new_v4(),
                menu_id: Some(1),
                name: "Oolong".to_string(),
                price: dec!(5.00),
                size: Some(ModifierRef::resolved(31, "Small")),
                sugar: None,
                ice: None,
                toppings: vec![],
            }],
        }
    }

    // -- Status overlay -------------------------------------------------------

    #[test]
    fn unknown_orders_default_to_new() {
        let board = TicketBoard::new();
        assert_eq!(board.status_of(404), TicketStatus::New);
        assert!(!board.is_bumped(404));
    }

    #[test]
    fn advance_happy_path() {
        let board = TicketBoard::new();
        assert_eq!(
            board.advance(1, TicketStatus::InProgress),
            Ok(TicketStatus::InProgress)
        );
        assert_eq!(board.status_of(1), TicketStatus::InProgress);
        assert_eq!(board.advance(1, TicketStatus::Done), Ok(TicketStatus::Done));
        assert_eq!(board.status_of(1), TicketStatus::Done);
    }

    #[test]
    fn new_to_done_override_is_allowed() {
        let board = TicketBoard::new();
        assert_eq!(board.advance(2, TicketStatus::Done), Ok(TicketStatus::Done));
    }

    #[test]
    fn duplicate_delivery_is_a_no_op() {
        let board = TicketBoard::new();
        board.advance(3, TicketStatus::InProgress).unwrap();
        // At-least-once delivery: the repeat must succeed, not error.
        assert_eq!(
            board.advance(3, TicketStatus::InProgress),
            Ok(TicketStatus::InProgress)
        );
        assert_eq!(board.status_of(3), TicketStatus::InProgress);
    }

    #[test]
    fn backward_transition_is_rejected_and_leaves_status_unchanged() {
        let board = TicketBoard::new();
        board.advance(4, TicketStatus::Done).unwrap();
        assert_eq!(
            board.advance(4, TicketStatus::InProgress),
            Err(TicketError::InvalidTransition {
                from: TicketStatus::Done,
                to: TicketStatus::InProgress,
            })
        );
        assert_eq!(board.status_of(4), TicketStatus::Done);
    }

    // -- Bump -----------------------------------------------------------------

    #[test]
    fn bump_from_any_state() {
        let board = TicketBoard::new();
        board.bump(10); // never had a status
        board.advance(11, TicketStatus::InProgress).unwrap();
        board.bump(11);
        assert!(board.is_bumped(10));
        assert!(board.is_bumped(11));
    }

    #[test]
    fn bump_clears_status_and_blocks_advance() {
        let board = TicketBoard::new();
        board.advance(12, TicketStatus::Done).unwrap();
        board.bump(12);
        assert_eq!(board.advance(12, TicketStatus::Done), Err(TicketError::Bumped(12)));
        // Status history is not retained once bumped.
        assert_eq!(board.status_of(12), TicketStatus::New);
    }

    #[test]
    fn bump_is_idempotent() {
        let board = TicketBoard::new();
        board.bump(13);
        board.bump(13);
        assert!(board.is_bumped(13));
    }

    #[test]
    fn reset_clears_overlay() {
        let board = TicketBoard::new();
        board.advance(14, TicketStatus::InProgress).unwrap();
        board.bump(15);
        board.reset();
        assert_eq!(board.status_of(14), TicketStatus::New);
        assert!(!board.is_bumped(15));
    }

    // -- Projection -----------------------------------------------------------

    #[test]
    fn projection_sorts_by_time_then_id() {
        let board = TicketBoard::new();
        // Orders 21 and 22 share a timestamp; 20 is later.
        let orders = vec![order_at(20, 45), order_at(22, 30), order_at(21, 30)];
        let tickets = board.project(&orders);
        let ids: Vec<i64> = tickets.iter().map(|t| t.order_id).collect();
        assert_eq!(ids, vec![21, 22, 20]);
    }

    #[test]
    fn projection_is_stable_across_reads() {
        let board = TicketBoard::new();
        let orders = vec![order_at(2, 30), order_at(1, 30), order_at(3, 30)];
        let first: Vec<i64> = board.project(&orders).iter().map(|t| t.order_id).collect();
        let second: Vec<i64> = board.project(&orders).iter().map(|t| t.order_id).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 2, 3]);
    }

    #[test]
    fn projection_overlays_status() {
        let board = TicketBoard::new();
        let orders = vec![order_at(1, 30), order_at(2, 31)];
        board.advance(2, TicketStatus::InProgress).unwrap();

        let tickets = board.project(&orders);
        assert_eq!(tickets[0].status, TicketStatus::New);
        assert_eq!(tickets[1].status, TicketStatus::InProgress);
    }

    #[test]
    fn bumped_orders_never_reappear() {
        let board = TicketBoard::new();
        let orders = vec![order_at(1, 30), order_at(2, 31)];

        board.bump(1);
        for _ in 0..3 {
            let tickets = board.project(&orders);
            assert_eq!(tickets.len(), 1);
            assert_eq!(tickets[0].order_id, 2);
        }

        // Only an explicit reset brings the order back (as New).
        board.reset();
        let tickets = board.project(&orders);
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].status, TicketStatus::New);
    }

    #[test]
    fn kitchen_lifecycle_example() {
        // First read New, then In Progress after advance, then absent after bump.
        let board = TicketBoard::new();
        let orders = vec![order_at(5, 30)];

        assert_eq!(board.project(&orders)[0].status, TicketStatus::New);

        board.advance(5, TicketStatus::InProgress).unwrap();
        assert_eq!(board.project(&orders)[0].status, TicketStatus::InProgress);

        board.bump(5);
        assert!(board.project(&orders).is_empty());
    }
}
