//! The display loop: poll, transition, re-fetch, render.

use std::time::Duration;

use steep_kitchen::{KitchenTicket, TicketStatus};

use crate::client::KitchenClient;
use crate::error::DisplayError;

/// The kitchen display's local view of the board.
///
/// Holds the last good ticket set. A failed refresh leaves it untouched and
/// records the failure for inline display; the next successful refresh
/// fully replaces the set and clears the failure.
#[derive(Debug)]
pub struct DisplayBoard {
    client: KitchenClient,
    tickets: Vec<KitchenTicket>,
    last_error: Option<String>,
}

impl DisplayBoard {
    /// Create a board around a client. The ticket set starts empty until the
    /// first refresh.
    pub fn new(client: KitchenClient) -> Self {
        Self {
            client,
            tickets: Vec::new(),
            last_error: None,
        }
    }

    /// The last good ticket set, in queue order.
    pub fn tickets(&self) -> &[KitchenTicket] {
        &self.tickets
    }

    /// The failure currently surfaced inline, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch the board and fully replace the rendered ticket set.
    ///
    /// On failure the last good set stays visible and the error is recorded.
    pub async fn refresh(&mut self) -> Result<(), DisplayError> {
        match self.client.fetch_tickets().await {
            Ok(tickets) => {
                self.tickets = tickets;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "board refresh failed; keeping last good render");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Mark a ticket started, then re-fetch the authoritative board.
    pub async fn start(&mut self, order_id: i64) -> Result<(), DisplayError> {
        self.transition(order_id, TicketStatus::InProgress).await
    }

    /// Mark a ticket done, then re-fetch the authoritative board.
    pub async fn done(&mut self, order_id: i64) -> Result<(), DisplayError> {
        self.transition(order_id, TicketStatus::Done).await
    }

    /// Bump a ticket, then re-fetch the authoritative board.
    pub async fn bump(&mut self, order_id: i64) -> Result<(), DisplayError> {
        let result = self.client.bump(order_id).await;
        let _ = self.refresh().await;
        if let Err(e) = &result {
            // The bump may or may not have landed; only the re-fetch above
            // can say. Never assume success — keep the failure visible.
            tracing::warn!(order_id, error = %e, "bump failed");
            self.last_error = Some(e.to_string());
        }
        result
    }

    async fn transition(
        &mut self,
        order_id: i64,
        status: TicketStatus,
    ) -> Result<(), DisplayError> {
        let result = self.client.advance(order_id, status).await;
        // Always re-fetch: the operator sees the server's post-transition
        // state, not an optimistic local guess.
        let _ = self.refresh().await;
        if let Err(e) = &result {
            tracing::warn!(order_id, %status, error = %e, "status update failed");
            self.last_error = Some(e.to_string());
        }
        result
    }

    /// Run the cooperative polling loop: refresh and render on a fixed
    /// interval until the process is stopped.
    pub async fn run(&mut self, refresh_every: Duration) {
        let mut interval = tokio::time::interval(refresh_every);
        loop {
            interval.tick().await;
            let _ = self.refresh().await;
            print!("{}", self.render());
        }
    }

    /// Render the board as text: one block per ticket, queue order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(err) = &self.last_error {
            out.push_str(&format!("!! {err}\n"));
        }
        if self.tickets.is_empty() {
            out.push_str("No orders yet.\n");
            return out;
        }
        for ticket in &self.tickets {
            let customer = ticket
                .customer_name
                .as_deref()
                .map(|c| format!(" | {c}"))
                .unwrap_or_default();
            out.push_str(&format!(
                "Order #{}  {}  [{}]{}\n",
                ticket.order_id,
                ticket.order_time.format("%H:%M"),
                ticket.status,
                customer
            ));
            for item in &ticket.items {
                let mut details = Vec::new();
                if let Some(size) = &item.size {
                    details.push(format!("size {size}"));
                }
                if let Some(sugar) = &item.sugar {
                    details.push(format!("sugar {sugar}"));
                }
                if let Some(ice) = &item.ice {
                    details.push(format!("ice {ice}"));
                }
                if !item.toppings.is_empty() {
                    details.push(item.toppings.join(", "));
                }
                let details = if details.is_empty() {
                    String::new()
                } else {
                    format!("  ({})", details.join("; "))
                };
                out.push_str(&format!("  {}x {}{}\n", item.quantity, item.name, details));
            }
            out.push('\n');
        }
        out
    }
}
