use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Resource, Thread, UserActivity};
use crate::repositories::{ResourceRepository, ThreadRepository};

/// Trait for thread persistence operations
///
/// Implementations provide store-specific CRUD; the session layer depends
/// only on this seam so it can run against fakes in tests.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// List a user's threads, newest `date` first
    async fn list(&self, user_id: &str) -> Result<Vec<Thread>>;

    /// Create a new thread with the given display title
    async fn create(&self, user_id: &str, title: &str) -> Result<Thread>;

    /// Update the title and refresh recency; returns the new `date`
    async fn rename(&self, thread_id: &str, new_title: &str) -> Result<DateTime<Utc>>;

    /// Refresh recency only; returns the new `date`
    async fn touch(&self, thread_id: &str) -> Result<DateTime<Utc>>;

    /// Aggregate per-user activity across all threads (admin landing view)
    async fn user_activity(&self) -> Result<Vec<UserActivity>>;
}

/// Trait for saved-resource persistence operations
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// List a user's resources, most recently used first
    async fn list(&self, user_id: &str) -> Result<Vec<Resource>>;

    /// Save a new resource; kind is classified from the URL
    async fn create(&self, user_id: &str, title: &str, url: &str) -> Result<Resource>;

    /// Refresh `last_used`; returns the new timestamp
    async fn touch_last_used(&self, resource_id: &str) -> Result<DateTime<Utc>>;
}

#[async_trait]
impl ThreadStore for ThreadRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<Thread>> {
        ThreadRepository::list(self, user_id).await
    }

    async fn create(&self, user_id: &str, title: &str) -> Result<Thread> {
        ThreadRepository::create(self, user_id, title).await
    }

    async fn rename(&self, thread_id: &str, new_title: &str) -> Result<DateTime<Utc>> {
        ThreadRepository::rename(self, thread_id, new_title).await
    }

    async fn touch(&self, thread_id: &str) -> Result<DateTime<Utc>> {
        ThreadRepository::touch(self, thread_id).await
    }

    async fn user_activity(&self) -> Result<Vec<UserActivity>> {
        ThreadRepository::user_activity(self).await
    }
}

#[async_trait]
impl ResourceStore for ResourceRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<Resource>> {
        ResourceRepository::list(self, user_id).await
    }

    async fn create(&self, user_id: &str, title: &str, url: &str) -> Result<Resource> {
        ResourceRepository::create(self, user_id, title, url).await
    }

    async fn touch_last_used(&self, resource_id: &str) -> Result<DateTime<Utc>> {
        ResourceRepository::touch_last_used(self, resource_id).await
    }
}
