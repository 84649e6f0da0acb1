//! crates/zoo_records_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the
//! in-memory stores or the subprocess transcriber.

use async_trait::async_trait;

use crate::domain::{Comment, ObservationRecord, Session, Submission, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This is the full error taxonomy of the workflow; the web layer maps each
/// variant onto its HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Transcription failed: {0}")]
    Transcription(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The static credential store loaded once at startup. Lookups only; user
/// identities are never mutated by the system.
pub trait UserDirectory: Send + Sync {
    /// Returns the user iff both fields match exactly. A single failure mode
    /// (`None`) for unknown user and wrong password alike, so callers cannot
    /// enumerate accounts.
    fn authenticate(&self, user_id: &str, password: &str) -> Option<User>;

    fn find_by_id(&self, id: &str) -> Option<User>;
}

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Issues a new session on credential match. Every login gets its own
    /// token; concurrent sessions per user are permitted.
    async fn login(&self, user_id: &str, password: &str) -> PortResult<Session>;

    /// Resolves a token to its user. Expiry is enforced lazily here: an
    /// expired entry is evicted before `Unauthenticated` is returned.
    async fn validate(&self, token: &str) -> PortResult<User>;

    /// Removes the session if present. Idempotent.
    async fn logout(&self, token: &str) -> PortResult<()>;
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Appends a new submission with a fresh unique id and returns it.
    async fn create(
        &self,
        owner_id: &str,
        date: &str,
        audio_file_name: &str,
        structured_data: ObservationRecord,
        txt_file_name: &str,
    ) -> PortResult<Submission>;

    /// The owner's submissions, in insertion order.
    async fn list_by_owner(&self, owner_id: &str) -> PortResult<Vec<Submission>>;

    /// Every submission, in insertion order.
    async fn list_all(&self) -> PortResult<Vec<Submission>>;

    async fn get_by_id(&self, id: u64) -> PortResult<Submission>;

    /// Replaces only the structured data of an existing submission. Callers
    /// are responsible for the access check and the report regeneration that
    /// must follow every mutation.
    async fn update_structured_data(
        &self,
        id: u64,
        data: ObservationRecord,
    ) -> PortResult<Submission>;

    /// Appends a comment; fails `NotFound` if the submission does not exist.
    async fn add_comment(
        &self,
        submission_id: u64,
        author_id: &str,
        content: &str,
    ) -> PortResult<Comment>;

    /// Read-time join: all comments for the submission, in insertion order.
    async fn comments_for(&self, submission_id: u64) -> PortResult<Vec<Comment>>;
}

#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Turns raw audio into a structured observation record. Implementations
    /// are expected to bound their own runtime; callers absorb every failure
    /// into the fallback record.
    async fn transcribe(
        &self,
        audio: &[u8],
        date: &str,
        language: &str,
        mime_type: &str,
    ) -> PortResult<ObservationRecord>;
}
