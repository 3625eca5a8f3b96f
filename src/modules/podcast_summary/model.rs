use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored podcast summary. `content` holds the generated script; the
/// source text it was generated from is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastSummary {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPodcastSummary {
    pub title: String,
    pub content: String,
}

impl NewPodcastSummary {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// MongoDB representation of a [`PodcastSummary`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PodcastSummaryDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl PodcastSummaryDocument {
    pub fn new(summary: NewPodcastSummary) -> Self {
        Self {
            id: None,
            title: summary.title,
            content: summary.content,
            created_at: bson::DateTime::now().to_chrono(),
        }
    }

    pub fn into_summary(self, id: ObjectId) -> PodcastSummary {
        PodcastSummary {
            id: id.to_hex(),
            title: self.title,
            content: self.content,
            created_at: self.created_at,
        }
    }
}
