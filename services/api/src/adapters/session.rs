//! services/api/src/adapters/session.rs
//!
//! In-memory session manager. Owns the process-wide session table; sessions
//! do not survive a restart. Expiry is enforced lazily on validation, there
//! is no background sweep.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use zoo_records_core::domain::{Session, User};
use zoo_records_core::ports::{PortError, PortResult, SessionService, UserDirectory};

struct SessionEntry {
    user: User,
    expires_at: DateTime<Utc>,
}

/// An adapter that implements the `SessionService` port over a mutex-guarded
/// hash map. The lock is held only for table operations, never across awaits.
pub struct MemorySessionManager {
    users: Arc<dyn UserDirectory>,
    ttl: Duration,
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl MemorySessionManager {
    /// Creates a session manager with the default 24 hour lifetime.
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self::with_ttl(users, Duration::hours(24))
    }

    /// Creates a session manager with an explicit session lifetime.
    pub fn with_ttl(users: Arc<dyn UserDirectory>, ttl: Duration) -> Self {
        Self {
            users,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry>> {
        // A poisoned lock means a panic mid-operation; nothing to salvage.
        self.sessions.lock().expect("session table lock poisoned")
    }
}

#[async_trait]
impl SessionService for MemorySessionManager {
    async fn login(&self, user_id: &str, password: &str) -> PortResult<Session> {
        let user = self
            .users
            .authenticate(user_id, password)
            .ok_or(PortError::InvalidCredentials)?;

        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;
        self.lock().insert(
            token.clone(),
            SessionEntry {
                user: user.clone(),
                expires_at,
            },
        );

        Ok(Session {
            token,
            user,
            expires_at,
        })
    }

    async fn validate(&self, token: &str) -> PortResult<User> {
        let mut sessions = self.lock();
        match sessions.get(token) {
            Some(entry) if Utc::now() < entry.expires_at => Ok(entry.user.clone()),
            Some(_) => {
                // Expired: evict before reporting "not found".
                sessions.remove(token);
                Err(PortError::Unauthenticated)
            }
            None => Err(PortError::Unauthenticated),
        }
    }

    async fn logout(&self, token: &str) -> PortResult<()> {
        self.lock().remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::credentials::CredentialStore;

    fn directory() -> Arc<dyn UserDirectory> {
        Arc::new(
            CredentialStore::from_json(
                r#"{"users": [
                    {"id": "u1", "userId": "kp1", "password": "keeper-pass", "role": "zookeeper", "name": "Keeper One"}
                ]}"#,
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn login_issues_validatable_session() {
        let manager = MemorySessionManager::new(directory());
        let session = manager.login("kp1", "keeper-pass").await.unwrap();
        assert!(session.expires_at > Utc::now());

        let user = manager.validate(&session.token).await.unwrap();
        assert_eq!(user.id, "u1");
    }

    #[tokio::test]
    async fn bad_credentials_are_indistinguishable() {
        let manager = MemorySessionManager::new(directory());
        let wrong_password = manager.login("kp1", "nope").await.unwrap_err();
        let unknown_user = manager.login("ghost", "keeper-pass").await.unwrap_err();
        assert!(matches!(wrong_password, PortError::InvalidCredentials));
        assert!(matches!(unknown_user, PortError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn expired_session_is_evicted_on_validate() {
        let manager = MemorySessionManager::with_ttl(directory(), Duration::seconds(-1));
        let session = manager.login("kp1", "keeper-pass").await.unwrap();

        assert!(matches!(
            manager.validate(&session.token).await,
            Err(PortError::Unauthenticated)
        ));
        // The entry is gone, not merely rejected.
        assert!(manager.lock().get(&session.token).is_none());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let manager = MemorySessionManager::new(directory());
        let session = manager.login("kp1", "keeper-pass").await.unwrap();
        manager.logout(&session.token).await.unwrap();
        manager.logout(&session.token).await.unwrap();
        assert!(manager.validate(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn concurrent_sessions_per_user_are_independent() {
        let manager = MemorySessionManager::new(directory());
        let first = manager.login("kp1", "keeper-pass").await.unwrap();
        let second = manager.login("kp1", "keeper-pass").await.unwrap();
        assert_ne!(first.token, second.token);

        manager.logout(&first.token).await.unwrap();
        assert!(manager.validate(&first.token).await.is_err());
        assert!(manager.validate(&second.token).await.is_ok());
    }
}
