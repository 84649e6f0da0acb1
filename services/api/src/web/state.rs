//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use crate::config::Config;
use zoo_records_core::ports::{
    SessionService, SubmissionService, TranscriptionService, UserDirectory,
};

/// The shared application state, created once at startup and passed to all
/// handlers. The stores live here rather than in module-level globals, so
/// tests can build isolated instances per case.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionService>,
    pub store: Arc<dyn SubmissionService>,
    pub transcriber: Arc<dyn TranscriptionService>,
    pub users: Arc<dyn UserDirectory>,
    pub config: Arc<Config>,
    /// Serializes the update path's read / mutate / rewrite-report sequence
    /// so concurrent edits to a submission cannot interleave the store
    /// mutation with the artifact rewrite.
    pub update_gate: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionService>,
        store: Arc<dyn SubmissionService>,
        transcriber: Arc<dyn TranscriptionService>,
        users: Arc<dyn UserDirectory>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            sessions,
            store,
            transcriber,
            users,
            config,
            update_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}
