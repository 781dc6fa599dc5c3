//! Upstream Inventory API Client
//!
//! Client for the managed inventory REST API the stockroom data lives in.
//! Reads come back in whatever shape the upstream currently emits (array,
//! envelope, or embedded tabular text) and are normalized by the parser;
//! writes are forwarded as-is and always followed by a full re-fetch.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use labstock_models::NewChemical;
use labstock_utils::{InventoryApiConfig, LabstockError};

/// Upstream inventory API client
pub struct InventoryApiClient {
    client: Client,
    base_url: String,
}

impl InventoryApiClient {
    pub fn new(config: &InventoryApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the raw `GET /inventory` payload without interpreting it; the
    /// parser decides which of the historical shapes this is.
    pub async fn fetch_raw(&self) -> Result<Value, LabstockError> {
        let url = format!("{}/inventory", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LabstockError::external_service(
                "inventory-api",
                format!("GET /inventory returned {}", response.status()),
            ));
        }

        Ok(response.json().await?)
    }

    pub async fn create(&self, chemical: &NewChemical) -> Result<(), LabstockError> {
        let url = format!("{}/inventory", self.base_url);

        let response = self.client.post(&url).json(chemical).send().await?;

        if !response.status().is_success() {
            return Err(LabstockError::external_service(
                "inventory-api",
                format!("POST /inventory returned {}", response.status()),
            ));
        }

        Ok(())
    }

    pub async fn update_quantity(&self, id: &str, quantity: f64) -> Result<(), LabstockError> {
        let url = format!("{}/inventory/{}", self.base_url, id);

        let response = self
            .client
            .put(&url)
            .json(&json!({ "quantity": quantity }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LabstockError::not_found(format!("chemical {id}")));
        }
        if !response.status().is_success() {
            return Err(LabstockError::external_service(
                "inventory-api",
                format!("PUT /inventory/{id} returned {}", response.status()),
            ));
        }

        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Result<(), LabstockError> {
        let url = format!("{}/inventory/{}", self.base_url, id);

        let response = self.client.delete(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LabstockError::not_found(format!("chemical {id}")));
        }
        if !response.status().is_success() {
            return Err(LabstockError::external_service(
                "inventory-api",
                format!("DELETE /inventory/{id} returned {}", response.status()),
            ));
        }

        Ok(())
    }
}
