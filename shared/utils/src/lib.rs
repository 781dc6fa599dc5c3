pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;

pub use config::*;
pub use error::*;
pub use inventory::*;
pub use logging::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.hazard_db.timeout_seconds, 30);
    }

    #[test]
    fn test_error_handling() {
        let error = LabstockError::validation("test_field", "test message");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.http_status_code(), 400);

        let not_found = LabstockError::from(HazardError::not_found("xyz"));
        assert_eq!(not_found.error_code(), "CHEMICAL_NOT_FOUND");
        assert_eq!(not_found.http_status_code(), 404);

        let unavailable = LabstockError::from(HazardError::unavailable("timeout"));
        assert_eq!(unavailable.http_status_code(), 502);
    }
}
