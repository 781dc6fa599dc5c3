//! Labstock Inventory Gateway
//!
//! Fronts the upstream inventory REST API for the stockroom UI: every read
//! runs the raw payload through the inventory parser, and every write is
//! followed by a full re-fetch (no optimistic local update is assumed
//! safe against the upstream's eventual state).

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use validator::Validate;

mod upstream;

use labstock_models::{ChemicalRecord, NewChemical};
use labstock_utils::{
    init_logging, AppConfig, ErrorResponse, InventoryRecordParser, LabstockError, LabstockResult,
};
use upstream::InventoryApiClient;

#[derive(Clone)]
struct AppState {
    client: Arc<InventoryApiClient>,
    parser: Arc<InventoryRecordParser>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| AppConfig::default());
    init_logging(&config.logging)?;
    info!("Starting Labstock Inventory Gateway");

    let state = AppState {
        client: Arc::new(InventoryApiClient::new(&config.inventory_api)),
        parser: Arc::new(InventoryRecordParser::new()),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/inventory", get(list_inventory).post(add_chemical))
        .route("/inventory/:id", put(update_quantity).delete(remove_chemical))
        .route("/inventory/:id/restock", post(restock_chemical))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Inventory Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "inventory-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Serialize)]
struct InventoryResponse {
    records: Vec<ChemicalRecord>,
    /// Per-row parse diagnostics, surfaced for the admin view.
    warnings: Vec<String>,
    total: usize,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
struct ListParams {
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateQuantityRequest {
    quantity: f64,
}

#[derive(Debug, Deserialize)]
struct RestockRequest {
    amount: f64,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(error: LabstockError) -> HandlerError {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(error.into()))
}

/// Fetch the upstream payload and normalize it into records. Used by the
/// list handler and after every successful write.
async fn fetch_inventory(state: &AppState) -> LabstockResult<InventoryResponse> {
    let raw = state.client.fetch_raw().await?;
    let parsed = state.parser.parse(&raw)?;

    Ok(InventoryResponse {
        total: parsed.records.len(),
        records: parsed.records,
        warnings: parsed.warnings.iter().map(|w| w.to_string()).collect(),
        fetched_at: Utc::now(),
    })
}

fn filter_records(records: Vec<ChemicalRecord>, search: Option<&str>) -> Vec<ChemicalRecord> {
    match search {
        Some(term) if !term.trim().is_empty() => records
            .into_iter()
            .filter(|record| record.matches_search(term.trim()))
            .collect(),
        _ => records,
    }
}

async fn list_inventory(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<InventoryResponse>, HandlerError> {
    let mut response = fetch_inventory(&state).await.map_err(error_response)?;
    response.records = filter_records(response.records, params.search.as_deref());
    response.total = response.records.len();
    Ok(Json(response))
}

async fn add_chemical(
    State(state): State<AppState>,
    Json(chemical): Json<NewChemical>,
) -> Result<Json<InventoryResponse>, HandlerError> {
    chemical
        .validate()
        .map_err(|e| error_response(LabstockError::validation("chemical", e.to_string())))?;

    state
        .client
        .create(&chemical)
        .await
        .map_err(error_response)?;
    info!(name = %chemical.name, "chemical added");

    fetch_inventory(&state).await.map(Json).map_err(error_response)
}

async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<InventoryResponse>, HandlerError> {
    if !request.quantity.is_finite() || request.quantity < 0.0 {
        return Err(error_response(LabstockError::validation(
            "quantity",
            "quantity must be a non-negative number",
        )));
    }

    state
        .client
        .update_quantity(&id, request.quantity)
        .await
        .map_err(error_response)?;
    info!(id = %id, quantity = request.quantity, "quantity updated");

    fetch_inventory(&state).await.map(Json).map_err(error_response)
}

async fn restock_chemical(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RestockRequest>,
) -> Result<Json<InventoryResponse>, HandlerError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(error_response(LabstockError::validation(
            "amount",
            "restock amount must be a positive number",
        )));
    }

    // The restock amount is added to whatever the upstream currently holds,
    // so read the current quantity first.
    let current = fetch_inventory(&state).await.map_err(error_response)?;
    let record = current
        .records
        .iter()
        .find(|record| record.id == id)
        .ok_or_else(|| error_response(LabstockError::not_found(format!("chemical {id}"))))?;

    let new_quantity = record.current_quantity + request.amount;

    state
        .client
        .update_quantity(&id, new_quantity)
        .await
        .map_err(error_response)?;
    info!(id = %id, new_quantity, "chemical restocked");

    fetch_inventory(&state).await.map(Json).map_err(error_response)
}

async fn remove_chemical(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InventoryResponse>, HandlerError> {
    state.client.remove(&id).await.map_err(error_response)?;
    info!(id = %id, "chemical removed");

    fetch_inventory(&state).await.map(Json).map_err(error_response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, location: &str) -> ChemicalRecord {
        ChemicalRecord {
            id: name.to_lowercase(),
            name: name.to_string(),
            formula: String::new(),
            location: location.to_string(),
            current_quantity: 1.0,
            minimum_quantity: 0.0,
            unit: "L".to_string(),
            hazard_level: None,
            sds_url: None,
        }
    }

    #[test]
    fn test_filter_records_by_search_term() {
        let records = vec![
            record("Acetone", "Cabinet 4"),
            record("Ethanol", "Shelf 2"),
            record("Acetic acid", "Cabinet 4"),
        ];

        let hits = filter_records(records.clone(), Some("acet"));
        assert_eq!(hits.len(), 2);

        let by_location = filter_records(records.clone(), Some("shelf"));
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].name, "Ethanol");

        // Empty or absent terms pass everything through.
        assert_eq!(filter_records(records.clone(), Some("  ")).len(), 3);
        assert_eq!(filter_records(records, None).len(), 3);
    }
}
