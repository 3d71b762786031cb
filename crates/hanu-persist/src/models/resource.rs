use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host pattern that marks a URL as living in the product's object storage.
const OBJECT_STORAGE_HOST: &str = "s3.amazonaws.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Link,
    File,
}

impl ResourceKind {
    /// Uploaded files are recognized by the object-storage host in their
    /// URL; everything else is a plain link.
    pub fn classify(url: &str) -> Self {
        if url.contains(OBJECT_STORAGE_HOST) {
            ResourceKind::File
        } else {
            ResourceKind::Link
        }
    }
}

/// A user-saved reference (link or uploaded file) insertable into a
/// conversation. Independent of any thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub last_used: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}
