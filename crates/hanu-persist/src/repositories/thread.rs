use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{PersistError, Result};
use crate::models::{Thread, UserActivity};

#[derive(Clone)]
pub struct ThreadRepository {
    collection: Collection<Thread>,
}

impl ThreadRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("threads");
        Self { collection }
    }

    /// Create a new thread owned by `user_id`
    pub async fn create(&self, user_id: &str, title: &str) -> Result<Thread> {
        if user_id.is_empty() {
            return Err(PersistError::MissingField("user_id"));
        }

        let thread = Thread {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            date: Utc::now(),
        };

        self.collection.insert_one(&thread).await?;
        Ok(thread)
    }

    /// List a user's threads, newest `date` first
    pub async fn list(&self, user_id: &str) -> Result<Vec<Thread>> {
        if user_id.is_empty() {
            return Err(PersistError::MissingField("user_id"));
        }

        let filter = doc! { "user_id": user_id };
        let threads = self
            .collection
            .find(filter)
            .sort(doc! { "date": -1 })
            .await
            .map_err(|e| PersistError::StoreUnavailable(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| PersistError::StoreUnavailable(e.to_string()))?;
        Ok(threads)
    }

    /// Rename a thread; recency is refreshed alongside the title
    pub async fn rename(&self, thread_id: &str, new_title: &str) -> Result<DateTime<Utc>> {
        if thread_id.is_empty() {
            return Err(PersistError::MissingField("thread_id"));
        }

        let now = Utc::now();
        let filter = doc! { "_id": thread_id };
        let update = doc! {
            "$set": {
                "title": new_title,
                "date": bson::DateTime::from_chrono(now)
            }
        };

        let updated = self.collection.update_one(filter, update).await?;
        if updated.matched_count == 0 {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(now)
    }

    /// Refresh a thread's `date` without touching the title; called after
    /// every successful message exchange
    pub async fn touch(&self, thread_id: &str) -> Result<DateTime<Utc>> {
        if thread_id.is_empty() {
            return Err(PersistError::MissingField("thread_id"));
        }

        let now = Utc::now();
        let filter = doc! { "_id": thread_id };
        let update = doc! { "$set": { "date": bson::DateTime::from_chrono(now) } };

        let updated = self.collection.update_one(filter, update).await?;
        if updated.matched_count == 0 {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(now)
    }

    /// Scan the whole collection and fold per-user activity, most recently
    /// active user first
    pub async fn user_activity(&self) -> Result<Vec<UserActivity>> {
        let threads: Vec<Thread> = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| PersistError::StoreUnavailable(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| PersistError::StoreUnavailable(e.to_string()))?;

        Ok(fold_activity(threads))
    }
}

pub(crate) fn fold_activity(threads: Vec<Thread>) -> Vec<UserActivity> {
    let mut by_user: HashMap<String, UserActivity> = HashMap::new();
    for thread in threads {
        let entry = by_user
            .entry(thread.user_id.clone())
            .or_insert_with(|| UserActivity {
                user_id: thread.user_id.clone(),
                last_active: thread.date,
                thread_count: 0,
            });
        entry.thread_count += 1;
        if thread.date > entry.last_active {
            entry.last_active = thread.date;
        }
    }

    let mut activity: Vec<UserActivity> = by_user.into_values().collect();
    activity.sort_by(|a, b| b.last_active.cmp(&a.last_active));
    activity
}
