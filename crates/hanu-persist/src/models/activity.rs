use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user activity summary derived from the threads collection, shown on
/// the admin landing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub user_id: String,
    pub last_active: DateTime<Utc>,
    pub thread_count: usize,
}
