//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, plus the
//! mapping from port errors onto HTTP status codes.

use axum::http::StatusCode;

use crate::adapters::credentials::CredentialStoreError;
use crate::config::ConfigError;
use zoo_records_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure to load the credential file at startup.
    #[error("Credential store error: {0}")]
    Credentials(#[from] CredentialStoreError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The single place where the workflow's error taxonomy becomes HTTP.
pub fn port_error_status(err: &PortError) -> StatusCode {
    match err {
        PortError::InvalidCredentials | PortError::Unauthenticated => StatusCode::UNAUTHORIZED,
        PortError::Forbidden => StatusCode::FORBIDDEN,
        PortError::NotFound(_) => StatusCode::NOT_FOUND,
        PortError::Transcription(_) | PortError::Storage(_) | PortError::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convenience for handlers returning `(StatusCode, String)` tuples.
pub fn port_error_response(err: PortError) -> (StatusCode, String) {
    (port_error_status(&err), err.to_string())
}
