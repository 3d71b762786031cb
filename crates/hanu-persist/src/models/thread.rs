use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted conversation between a user and the backend agent.
///
/// `date` tracks recency, not creation: it is refreshed on every successful
/// message exchange and on rename, so newest-first ordering reflects
/// conversation activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}
