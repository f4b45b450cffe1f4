//! Ticket types and the status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use steep_core::{DrinkRecord, OrderRecord};

/// Errors arising from ticket operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TicketError {
    /// The status string matches none of "New", "In Progress", "Done".
    #[error("invalid status: {0:?}")]
    InvalidStatus(String),

    /// The requested status change is not a forward transition.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the ticket currently holds.
        from: TicketStatus,
        /// Requested target status.
        to: TicketStatus,
    },

    /// The order was bumped off the board; it is no longer addressable.
    #[error("order {0} has been bumped")]
    Bumped(i64),
}

/// Fulfillment status of one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
pub enum TicketStatus {
    /// Just placed; nobody has started it.
    #[default]
    New,
    /// A barista is working the ticket.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Drinks are ready for handoff.
    Done,
}

impl TicketStatus {
    /// Wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Whether a status update to `target` is acceptable from `self`.
    ///
    /// Forward moves (New→In Progress, In Progress→Done) and the operator
    /// override New→Done are accepted. Repeating the current status is also
    /// accepted: status updates are delivered at-least-once, so a duplicate
    /// must land as a no-op rather than an error. Backward moves are
    /// rejected.
    pub fn can_become(&self, target: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (self, target),
            (New, InProgress) | (New, Done) | (InProgress, Done)
        ) || *self == target
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "In Progress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            other => Err(TicketError::InvalidStatus(other.to_string())),
        }
    }
}

/// One line on a ticket: N units of a drink with identical customizations.
///
/// `topping1`/`topping2` mirror the first two entries of `toppings` for the
/// legacy board layout; the full list is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TicketItem {
    /// Drink display name.
    pub name: String,
    /// Units of this exact configuration.
    pub quantity: u32,
    /// Size name, if sized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Sugar level name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<String>,
    /// Ice level name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ice: Option<String>,
    /// All topping names, in selection order.
    pub toppings: Vec<String>,
    /// First topping, legacy field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topping1: Option<String>,
    /// Second topping, legacy field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topping2: Option<String>,
}

impl TicketItem {
    fn from_drink(drink: &DrinkRecord) -> Self {
        let toppings: Vec<String> = drink.toppings.iter().map(|t| t.name.clone()).collect();
        Self {
            name: drink.name.clone(),
            quantity: 1,
            size: drink.size.as_ref().map(|m| m.name.clone()),
            sugar: drink.sugar.as_ref().map(|m| m.name.clone()),
            ice: drink.ice.as_ref().map(|m| m.name.clone()),
            topping1: toppings.first().cloned(),
            topping2: toppings.get(1).cloned(),
            toppings,
        }
    }

    /// Whether another drink unit collapses into this line.
    fn matches(&self, other: &TicketItem) -> bool {
        self.name == other.name
            && self.size == other.size
            && self.sugar == other.sugar
            && self.ice == other.ice
            && self.toppings == other.toppings
    }
}

/// The kitchen's read-only projection of one persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KitchenTicket {
    /// Order number.
    #[serde(rename = "orderid")]
    pub order_id: i64,
    /// When the order was placed.
    #[serde(rename = "ordertime")]
    pub order_time: DateTime<Utc>,
    /// Customer name, when known.
    #[serde(rename = "customername", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Grouped drink lines.
    pub items: Vec<TicketItem>,
    /// Current fulfillment status (overlay; defaults to New).
    pub status: TicketStatus,
}

impl KitchenTicket {
    /// Project one order into a ticket, grouping identical drink units into
    /// quantity lines.
    pub fn from_order(order: &OrderRecord, status: TicketStatus) -> Self {
        let mut items: Vec<TicketItem> = Vec::new();
        for drink in &order.drinks {
            let unit = TicketItem::from_drink(drink);
            match items.iter_mut().find(|i| i.matches(&unit)) {
                Some(existing) => existing.quantity += 1,
                None => items.push(unit),
            }
        }
        Self {
            order_id: order.order_number,
            order_time: order.placed_at,
            customer_name: order.customer_name.clone(),
            items,
            status,
        }
    }
}
