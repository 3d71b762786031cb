use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};
use uuid::Uuid;

use crate::error::{PersistError, Result};
use crate::models::{Resource, ResourceKind};

#[derive(Clone)]
pub struct ResourceRepository {
    collection: Collection<Resource>,
}

impl ResourceRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("resources");
        Self { collection }
    }

    /// List a user's saved resources, most recently used first
    pub async fn list(&self, user_id: &str) -> Result<Vec<Resource>> {
        if user_id.is_empty() {
            return Err(PersistError::MissingField("user_id"));
        }

        let filter = doc! { "user_id": user_id };
        let resources = self
            .collection
            .find(filter)
            .sort(doc! { "last_used": -1 })
            .await
            .map_err(|e| PersistError::StoreUnavailable(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| PersistError::StoreUnavailable(e.to_string()))?;
        Ok(resources)
    }

    /// Save a new resource. The kind is classified from the URL: uploads in
    /// the object storage are files, everything else is a link.
    pub async fn create(&self, user_id: &str, title: &str, url: &str) -> Result<Resource> {
        if user_id.is_empty() {
            return Err(PersistError::MissingField("user_id"));
        }
        if title.is_empty() {
            return Err(PersistError::MissingField("title"));
        }
        if url.is_empty() {
            return Err(PersistError::MissingField("url"));
        }

        let resource = Resource {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            last_used: Utc::now(),
            kind: ResourceKind::classify(url),
        };

        self.collection.insert_one(&resource).await?;
        Ok(resource)
    }

    /// Refresh `last_used`; called whenever the resource is inserted into a
    /// conversation
    pub async fn touch_last_used(&self, resource_id: &str) -> Result<DateTime<Utc>> {
        if resource_id.is_empty() {
            return Err(PersistError::MissingField("resource_id"));
        }

        let now = Utc::now();
        let filter = doc! { "_id": resource_id };
        let update = doc! { "$set": { "last_used": bson::DateTime::from_chrono(now) } };

        let updated = self.collection.update_one(filter, update).await?;
        if updated.matched_count == 0 {
            return Err(PersistError::ResourceNotFound(resource_id.to_string()));
        }
        Ok(now)
    }
}
