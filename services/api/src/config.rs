//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Path to the static credential file (`{"users": [...]}`).
    pub users_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub session_ttl_hours: i64,
    pub cors_origin: String,
    /// Interpreter and script for the external transcription model.
    pub transcriber_python: String,
    pub transcriber_script: PathBuf,
    pub transcribe_timeout_secs: u64,
    pub transcribe_language: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Storage Paths ---
        let users_path = std::env::var("USERS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./users.json"));
        let uploads_dir = std::env::var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));
        let reports_dir = std::env::var("REPORTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./reports"));

        // --- Load Session and CORS Settings ---
        let session_ttl_hours = parse_var("SESSION_TTL_HOURS", 24)?;
        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        // --- Load Transcriber Settings ---
        let transcriber_python =
            std::env::var("TRANSCRIBER_PYTHON").unwrap_or_else(|_| "python3".to_string());
        let transcriber_script = std::env::var("TRANSCRIBER_SCRIPT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("server/run_model.py"));
        let transcribe_timeout_secs = parse_var("TRANSCRIBE_TIMEOUT_SECS", 60)?;
        let transcribe_language =
            std::env::var("TRANSCRIBE_LANGUAGE").unwrap_or_else(|_| "hi".to_string());

        Ok(Self {
            bind_address,
            log_level,
            users_path,
            uploads_dir,
            reports_dir,
            session_ttl_hours,
            cors_origin,
            transcriber_python,
            transcriber_script,
            transcribe_timeout_secs,
            transcribe_language,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(name.to_string(), format!("'{}' failed to parse", raw))
        }),
        Err(_) => Ok(default),
    }
}
