use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal inventory-parse outcome. Parsing never panics: a payload the
/// parser cannot locate usable data in yields this instead of records.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseFailure {
    #[error("inventory response had no usable data field")]
    MissingPayload,
}

/// Non-fatal, per-row diagnostic collected during an inventory parse.
/// Warnings are returned alongside the records instead of being logged
/// from inside the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseWarning {
    #[error("row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

/// Hazard resolution errors. Only `ChemicalNotFound` is meant to reach the
/// user verbatim; everything else renders as a generic no-data state.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardError {
    #[error("chemical '{name}' not found in the hazard database")]
    ChemicalNotFound { name: String },

    #[error("hazard lookup unavailable: {message}")]
    LookupUnavailable { message: String },
}

impl HazardError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ChemicalNotFound { name: name.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::LookupUnavailable {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LabstockError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error(transparent)]
    Hazard(#[from] HazardError),

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl LabstockError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "PARSE_ERROR",
            Self::Hazard(HazardError::ChemicalNotFound { .. }) => "CHEMICAL_NOT_FOUND",
            Self::Hazard(HazardError::LookupUnavailable { .. }) => "LOOKUP_UNAVAILABLE",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Parse(_) => 502,
            Self::Hazard(HazardError::ChemicalNotFound { .. }) => 404,
            Self::Hazard(HazardError::LookupUnavailable { .. }) => 502,
            Self::Validation { .. } => 400,
            Self::ExternalService { .. } => 502,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }
}

pub type LabstockResult<T> = Result<T, LabstockError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
}

impl From<LabstockError> for ErrorResponse {
    fn from(error: LabstockError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

// Conversion from common error types
impl From<reqwest::Error> for LabstockError {
    fn from(error: reqwest::Error) -> Self {
        Self::external_service("HTTP Client", error.to_string())
    }
}

impl From<serde_json::Error> for LabstockError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}
