//! services/api/src/adapters/credentials.rs
//!
//! The static credential store. Loads the `users.json`-shaped file once at
//! startup and implements the `UserDirectory` port. Passwords never leave
//! this module: the file records are converted to domain `User` values on
//! the way out.

use std::path::Path;

use serde::Deserialize;
use zoo_records_core::domain::{Role, User};
use zoo_records_core::ports::UserDirectory;

#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    #[error("Failed to read credential file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse credential file: {0}")]
    Parse(#[from] serde_json::Error),
}

//=========================================================================================
// "Impure" File Record Structs
//=========================================================================================

#[derive(Deserialize)]
struct CredentialFile {
    users: Vec<UserRecord>,
}

#[derive(Deserialize)]
struct UserRecord {
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    password: String,
    // Parsing through the Role enum means a typo in the file fails the load.
    role: Role,
    name: String,
    #[serde(default)]
    email: Option<String>,
}

impl UserRecord {
    fn to_domain(&self) -> User {
        User {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            role: self.role,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// The in-memory credential table, immutable after load.
pub struct CredentialStore {
    records: Vec<UserRecord>,
}

impl CredentialStore {
    /// Loads and validates the credential file.
    pub fn load(path: &Path) -> Result<Self, CredentialStoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses a credential file body. Split out from `load` so tests can
    /// seed a store without touching the filesystem.
    pub fn from_json(raw: &str) -> Result<Self, CredentialStoreError> {
        let file: CredentialFile = serde_json::from_str(raw)?;
        Ok(Self {
            records: file.users,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl UserDirectory for CredentialStore {
    fn authenticate(&self, user_id: &str, password: &str) -> Option<User> {
        self.records
            .iter()
            .find(|r| r.user_id == user_id && r.password == password)
            .map(UserRecord::to_domain)
    }

    fn find_by_id(&self, id: &str) -> Option<User> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(UserRecord::to_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "users": [
            {"id": "u1", "userId": "kp1", "password": "keeper-pass", "role": "zookeeper", "name": "Keeper One"},
            {"id": "u2", "userId": "dr1", "password": "doctor-pass", "role": "doctor", "name": "Doctor One", "email": "dr1@zoo.example"}
        ]
    }"#;

    #[test]
    fn authenticates_on_exact_match_only() {
        let store = CredentialStore::from_json(SAMPLE).unwrap();
        let user = store.authenticate("kp1", "keeper-pass").unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Zookeeper);

        // Wrong password and unknown user are indistinguishable.
        assert!(store.authenticate("kp1", "wrong").is_none());
        assert!(store.authenticate("nobody", "keeper-pass").is_none());
    }

    #[test]
    fn finds_users_by_internal_id() {
        let store = CredentialStore::from_json(SAMPLE).unwrap();
        assert_eq!(store.find_by_id("u2").unwrap().name, "Doctor One");
        assert!(store.find_by_id("u9").is_none());
    }

    #[test]
    fn unknown_role_fails_the_load() {
        let raw = r#"{"users": [{"id": "u1", "userId": "kp1", "password": "x", "role": "keeper", "name": "K"}]}"#;
        assert!(matches!(
            CredentialStore::from_json(raw),
            Err(CredentialStoreError::Parse(_))
        ));
    }
}
