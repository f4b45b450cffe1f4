//! HTTP client for the kitchen board endpoints.

use steep_kitchen::{KitchenTicket, TicketStatus};

use crate::config::DisplayConfig;
use crate::error::DisplayError;

/// Typed client for the three kitchen board operations.
#[derive(Debug, Clone)]
pub struct KitchenClient {
    http: reqwest::Client,
    base_url: String,
}

impl KitchenClient {
    /// Build a client from configuration.
    pub fn new(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DisplayError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /api/kitchen/orders — the current active ticket set, already in
    /// queue order.
    pub async fn fetch_tickets(&self) -> Result<Vec<KitchenTicket>, DisplayError> {
        let endpoint = format!("{}/api/kitchen/orders", self.base_url);
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| DisplayError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;
        let response = check_status(endpoint.clone(), response).await?;
        response
            .json()
            .await
            .map_err(|source| DisplayError::Http { endpoint, source })
    }

    /// PATCH /api/kitchen/orders/:id/status — advance a ticket.
    pub async fn advance(
        &self,
        order_id: i64,
        status: TicketStatus,
    ) -> Result<(), DisplayError> {
        let endpoint = format!("{}/api/kitchen/orders/{order_id}/status", self.base_url);
        let response = self
            .http
            .patch(&endpoint)
            .json(&serde_json::json!({ "status": status.as_str() }))
            .send()
            .await
            .map_err(|source| DisplayError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;
        check_status(endpoint, response).await?;
        Ok(())
    }

    /// DELETE /api/kitchen/orders/:id — bump a ticket off the board.
    pub async fn bump(&self, order_id: i64) -> Result<(), DisplayError> {
        let endpoint = format!("{}/api/kitchen/orders/{order_id}", self.base_url);
        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|source| DisplayError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;
        check_status(endpoint, response).await?;
        Ok(())
    }
}

/// Turn a non-success response into a [`DisplayError::Api`], pulling the
/// error message out of the structured body when one is present.
async fn check_status(
    endpoint: String,
    response: reqwest::Response,
) -> Result<reqwest::Response, DisplayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body["error"]["message"]
            .as_str()
            .unwrap_or("(no message)")
            .to_string(),
        Err(_) => "(unreadable body)".to_string(),
    };
    Err(DisplayError::Api {
        endpoint,
        status: status.as_u16(),
        message,
    })
}
