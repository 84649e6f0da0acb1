//! services/api/src/adapters/store.rs
//!
//! The in-memory submission and comment tables. One mutex guards both, so
//! id assignment (`len + 1`) stays atomic with the append that follows it.
//! Nothing is ever deleted, which is what makes `len + 1` a safe id source.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use zoo_records_core::domain::{Comment, ObservationRecord, Submission, SubmissionStatus};
use zoo_records_core::ports::{PortError, PortResult, SubmissionService};

#[derive(Default)]
struct Tables {
    submissions: Vec<Submission>,
    comments: Vec<Comment>,
}

/// An adapter that implements the `SubmissionService` port over plain vectors.
/// The lock is held only for table operations, never across awaits.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().expect("submission table lock poisoned")
    }
}

#[async_trait]
impl SubmissionService for MemoryStore {
    async fn create(
        &self,
        owner_id: &str,
        date: &str,
        audio_file_name: &str,
        structured_data: ObservationRecord,
        txt_file_name: &str,
    ) -> PortResult<Submission> {
        let mut tables = self.lock();
        let submission = Submission {
            id: tables.submissions.len() as u64 + 1,
            user_id: owner_id.to_string(),
            date: date.to_string(),
            audio_file_name: audio_file_name.to_string(),
            structured_data,
            txt_file_name: txt_file_name.to_string(),
            status: SubmissionStatus::Processed,
            created_at: Utc::now(),
        };
        tables.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_by_owner(&self, owner_id: &str) -> PortResult<Vec<Submission>> {
        Ok(self
            .lock()
            .submissions
            .iter()
            .filter(|s| s.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> PortResult<Vec<Submission>> {
        Ok(self.lock().submissions.clone())
    }

    async fn get_by_id(&self, id: u64) -> PortResult<Submission> {
        self.lock()
            .submissions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("submission {id}")))
    }

    async fn update_structured_data(
        &self,
        id: u64,
        data: ObservationRecord,
    ) -> PortResult<Submission> {
        let mut tables = self.lock();
        let submission = tables
            .submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PortError::NotFound(format!("submission {id}")))?;
        submission.structured_data = data;
        Ok(submission.clone())
    }

    async fn add_comment(
        &self,
        submission_id: u64,
        author_id: &str,
        content: &str,
    ) -> PortResult<Comment> {
        let mut tables = self.lock();
        if !tables.submissions.iter().any(|s| s.id == submission_id) {
            return Err(PortError::NotFound(format!("submission {submission_id}")));
        }
        let comment = Comment {
            id: tables.comments.len() as u64 + 1,
            submission_id,
            user_id: author_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn comments_for(&self, submission_id: u64) -> PortResult<Vec<Comment>> {
        Ok(self
            .lock()
            .comments
            .iter()
            .filter(|c| c.submission_id == submission_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> ObservationRecord {
        ObservationRecord::manual_review_fallback(date, "Keeper One")
    }

    async fn seed(store: &MemoryStore, owner: &str, date: &str) -> Submission {
        store
            .create(owner, date, "a.wav", record(date), "a.txt")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_assigns_monotonic_unique_ids() {
        let store = MemoryStore::new();
        let first = seed(&store, "u1", "2024-01-15").await;
        let second = seed(&store, "u2", "2024-01-16").await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, SubmissionStatus::Processed);
    }

    #[tokio::test]
    async fn list_by_owner_returns_exactly_their_records() {
        let store = MemoryStore::new();
        seed(&store, "u1", "2024-01-15").await;
        seed(&store, "u2", "2024-01-15").await;
        seed(&store, "u1", "2024-01-16").await;

        let mine = store.list_by_owner("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|s| s.user_id == "u1"));
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_by_id_misses_with_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get_by_id(7).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_replaces_only_structured_data() {
        let store = MemoryStore::new();
        let created = seed(&store, "u1", "2024-01-15").await;

        let mut data = record("2024-01-15");
        data.normal_behaviour_status = false;
        data.normal_behaviour_details = Some("limping".to_string());
        let updated = store
            .update_structured_data(created.id, data.clone())
            .await
            .unwrap();

        assert_eq!(updated.structured_data, data);
        assert_eq!(updated.audio_file_name, created.audio_file_name);
        assert_eq!(updated.txt_file_name, created.txt_file_name);
        assert_eq!(updated.created_at, created.created_at);

        let reread = store.get_by_id(created.id).await.unwrap();
        assert_eq!(reread.structured_data, data);
    }

    #[tokio::test]
    async fn comments_join_in_insertion_order() {
        let store = MemoryStore::new();
        let submission = seed(&store, "u1", "2024-01-15").await;
        let other = seed(&store, "u1", "2024-01-16").await;

        store
            .add_comment(submission.id, "u2", "first")
            .await
            .unwrap();
        store.add_comment(other.id, "u2", "elsewhere").await.unwrap();
        store
            .add_comment(submission.id, "u3", "second")
            .await
            .unwrap();

        let comments = store.comments_for(submission.id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "first");
        assert_eq!(comments[1].content, "second");
        assert!(comments.iter().all(|c| c.submission_id == submission.id));
    }

    #[tokio::test]
    async fn comment_on_missing_submission_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.add_comment(42, "u2", "hello").await,
            Err(PortError::NotFound(_))
        ));
    }
}
