use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::podcast_summary::crud::{PodcastSummaryStore, StoreError};
use crate::modules::podcast_summary::model::{NewPodcastSummary, PodcastSummary};

/// Non-durable store kept in process memory, in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    summaries: RwLock<Vec<PodcastSummary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a few sample records for local development.
    pub fn with_examples() -> Self {
        let now = Utc::now();
        let summaries = [
            ("Introduction to Physics", "Basic physics concepts"),
            ("Advanced Mathematics", "Complex mathematical theorems"),
            ("History Overview", "Major historical events"),
        ]
        .into_iter()
        .map(|(title, content)| PodcastSummary {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
        })
        .collect();

        Self {
            summaries: RwLock::new(summaries),
        }
    }
}

#[async_trait]
impl PodcastSummaryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<PodcastSummary>, StoreError> {
        Ok(self.summaries.read().await.clone())
    }

    async fn create(&self, summary: NewPodcastSummary) -> Result<PodcastSummary, StoreError> {
        let record = PodcastSummary {
            id: Uuid::new_v4().to_string(),
            title: summary.title,
            content: summary.content,
            created_at: Utc::now(),
        };

        self.summaries.write().await.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<PodcastSummary, StoreError> {
        let mut summaries = self.summaries.write().await;
        let index = summaries
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Ok(summaries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn create_assigns_unique_ids_in_order() {
        let store = MemoryStore::new();
        let a = assert_ok!(store.create(NewPodcastSummary::new("A", "script a")).await);
        let b = assert_ok!(store.create(NewPodcastSummary::new("B", "script b")).await);
        assert_ne!(a.id, b.id);

        let titles: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_record() {
        let store = MemoryStore::with_examples();
        let before = store.list().await.unwrap();
        let target = before[1].clone();

        let deleted = assert_ok!(store.delete(&target.id).await);
        assert_eq!(deleted, target);

        let after = store.list().await.unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|s| s.id != target.id));
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[2]);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found_and_changes_nothing() {
        let store = MemoryStore::with_examples();
        let before = store.list().await.unwrap();

        let err = assert_err!(store.delete("no-such-id").await);
        assert!(matches!(err, StoreError::NotFound(ref id) if id == "no-such-id"));
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn concurrent_creates_do_not_collide() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(NewPodcastSummary::new(format!("T{i}"), "script"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let mut ids: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }
}
