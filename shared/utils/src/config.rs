use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub inventory_api: InventoryApiConfig,
    pub hazard_db: HazardDbConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
}

/// Upstream inventory REST API (the managed storage backend the stockroom
/// front end talks to).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// External chemical-hazard database (PubChem PUG / PUG-View).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardDbConfig {
    pub base_url: String,
    /// One budget shared by both sequential lookup calls of a resolution.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with LABSTOCK prefix
            .add_source(Environment::with_prefix("LABSTOCK").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                timeout_seconds: 30,
            },
            inventory_api: InventoryApiConfig {
                base_url: "http://localhost:9000".to_string(),
                timeout_seconds: 30,
            },
            hazard_db: HazardDbConfig {
                base_url: "https://pubchem.ncbi.nlm.nih.gov".to_string(),
                timeout_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_path: None,
            },
        }
    }
}
