use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use thiserror::Error;

use crate::modules::podcast_summary::model::{
    NewPodcastSummary, PodcastSummary, PodcastSummaryDocument,
};

pub const COLLECTION_NAME: &str = "podcast_summaries";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Podcast summary not found: {0}")]
    NotFound(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[async_trait]
pub trait PodcastSummaryStore: Send + Sync {
    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<PodcastSummary>, StoreError>;

    async fn create(&self, summary: NewPodcastSummary) -> Result<PodcastSummary, StoreError>;

    /// Removes the record with `id` and returns it. Unknown ids yield
    /// [`StoreError::NotFound`].
    async fn delete(&self, id: &str) -> Result<PodcastSummary, StoreError>;
}

pub struct PodcastSummaryCrud {
    collection: Collection<PodcastSummaryDocument>,
}

impl PodcastSummaryCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }
}

#[async_trait]
impl PodcastSummaryStore for PodcastSummaryCrud {
    async fn list(&self) -> Result<Vec<PodcastSummary>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?;

        let documents: Vec<PodcastSummaryDocument> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(|d| match d.id {
                Some(id) => Ok(d.into_summary(id)),
                None => Err(StoreError::Backend("document without _id".to_string())),
            })
            .collect()
    }

    async fn create(&self, summary: NewPodcastSummary) -> Result<PodcastSummary, StoreError> {
        let document = PodcastSummaryDocument::new(summary);
        let result = self.collection.insert_one(&document).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Backend(format!("unexpected inserted id: {}", result.inserted_id))
        })?;

        Ok(document.into_summary(id))
    }

    async fn delete(&self, id: &str) -> Result<PodcastSummary, StoreError> {
        // a non-ObjectId id can never match a stored record
        let oid = ObjectId::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))?;

        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": oid })
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Ok(deleted.into_summary(oid))
    }
}
