//! crates/zoo_records_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage backend; serde derives only
//! describe their wire shape (camelCase on the submission surface, snake_case
//! inside the structured observation record, matching the model output).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of roles the workflow knows about. Credential files are
/// parsed through this enum at startup, so a misspelled role fails the load
/// instead of silently widening access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Zookeeper,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Zookeeper => "zookeeper",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }
}

/// Represents a user - looked up at login, never mutated by the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Represents a login session (auth cookie). Valid iff `now < expires_at`.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

/// Lifecycle status of a submission. Creation assigns `Processed`; later
/// edits replace the structured data but keep the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Processed,
}

/// The checklist-shaped structured record extracted from one audio
/// observation, by the model or by the fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub date_or_day: String,
    pub animal_observed_on_time: bool,
    pub clean_drinking_water_provided: bool,
    pub enclosure_cleaned_properly: bool,
    pub normal_behaviour_status: bool,
    #[serde(default)]
    pub normal_behaviour_details: Option<String>,
    pub feed_and_supplements_available: bool,
    pub feed_given_as_prescribed: bool,
    #[serde(default)]
    pub other_animal_requirements: Option<String>,
    pub incharge_signature: String,
    #[serde(default)]
    pub daily_animal_health_monitoring: String,
    #[serde(default)]
    pub carnivorous_animal_feeding_chart: String,
    #[serde(default)]
    pub medicine_stock_register: String,
    #[serde(default)]
    pub daily_wildlife_monitoring: String,
}

impl ObservationRecord {
    /// The deterministic placeholder substituted whenever transcription
    /// fails, so submission creation never blocks on the model. The
    /// `other_animal_requirements` text flags the record for manual review.
    pub fn manual_review_fallback(date: &str, keeper_name: &str) -> Self {
        Self {
            date_or_day: date.to_string(),
            animal_observed_on_time: true,
            clean_drinking_water_provided: true,
            enclosure_cleaned_properly: true,
            normal_behaviour_status: true,
            normal_behaviour_details: None,
            feed_and_supplements_available: true,
            feed_given_as_prescribed: true,
            other_animal_requirements: Some(
                "Audio processing error - manual review required".to_string(),
            ),
            incharge_signature: keeper_name.to_string(),
            daily_animal_health_monitoring: format!(
                "Observation recorded on {} - Audio processing encountered an error",
                date
            ),
            carnivorous_animal_feeding_chart: "Standard feeding schedule followed".to_string(),
            medicine_stock_register: "Stock levels adequate".to_string(),
            daily_wildlife_monitoring: format!("Wildlife monitoring completed on {}", date),
        }
    }
}

/// One keeper's audio-derived observation record for a given date.
///
/// `id` is monotonic and never reused; the owner is fixed at creation. The
/// on-disk report named by `txt_file_name` is regenerated after every
/// structured-data mutation so the artifact and the record never diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub user_id: String,
    pub date: String,
    pub audio_file_name: String,
    pub structured_data: ObservationRecord,
    pub txt_file_name: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

/// A supervisor's note on a submission. Append-only: never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub submission_id: u64,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
