//! Labstock Hazard Lookup Service
//!
//! GHS hazard resolution for stockroom chemicals: bundled table first, then
//! PubChem, then keyword inference over hazard statements.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

mod pubchem;
mod resolver;
mod table;

use labstock_models::HazardSummary;
use labstock_utils::{init_logging, AppConfig, ErrorResponse, LabstockError};
use pubchem::PubChemClient;
use resolver::HazardResolver;

type SharedResolver = Arc<HazardResolver<PubChemClient>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| AppConfig::default());
    init_logging(&config.logging)?;
    info!("Starting Labstock Hazard Lookup Service");

    let client = PubChemClient::new(&config.hazard_db);
    let resolver: SharedResolver = Arc::new(HazardResolver::new(client));

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/hazards/:name", get(get_hazards))
        .layer(TraceLayer::new_for_http())
        .with_state(resolver);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Hazard Lookup Service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hazard-lookup",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Hazard summary plus the presentation fields the pictogram grid needs.
#[derive(Debug, Serialize)]
struct HazardResponse {
    chemical_name: String,
    signal_word: Option<String>,
    statements: Vec<String>,
    pictograms: Vec<PictogramInfo>,
    resolved: bool,
}

#[derive(Debug, Serialize)]
struct PictogramInfo {
    code: String,
    label: String,
    image_url: String,
}

impl From<HazardSummary> for HazardResponse {
    fn from(summary: HazardSummary) -> Self {
        Self {
            chemical_name: summary.chemical_name,
            signal_word: summary.signal_word,
            statements: summary.statements,
            pictograms: summary
                .pictogram_codes
                .iter()
                .map(|code| PictogramInfo {
                    code: code.code().to_string(),
                    label: code.label().to_string(),
                    image_url: code.image_url(),
                })
                .collect(),
            resolved: summary.resolved,
        }
    }
}

async fn get_hazards(
    State(resolver): State<SharedResolver>,
    Path(name): Path<String>,
) -> Result<Json<HazardResponse>, (StatusCode, Json<ErrorResponse>)> {
    match resolver.resolve(&name).await {
        Ok(summary) => Ok(Json(summary.into())),
        Err(err) => {
            let error = LabstockError::from(err);
            let status = StatusCode::from_u16(error.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err((status, Json(error.into())))
        }
    }
}
