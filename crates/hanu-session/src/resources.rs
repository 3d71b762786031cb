use hanu_persist::{Resource, ResourceStore};

use crate::error::SessionError;

/// The acting user's saved references, ready to insert into a conversation.
///
/// Listing never throws to the caller: with no user or a failing store the
/// panel simply shows nothing (the failure is logged).
#[derive(Debug, Default)]
pub struct ResourceLibrary {
    resources: Vec<Resource>,
}

impl ResourceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn clear(&mut self) {
        self.resources.clear();
    }

    pub async fn load(&mut self, store: &dyn ResourceStore, user_id: Option<&str>) {
        let Some(user_id) = user_id else {
            self.resources.clear();
            return;
        };

        match store.list(user_id).await {
            Ok(resources) => self.resources = resources,
            Err(e) => {
                tracing::error!(error = %e, user_id, "failed to fetch resources");
                self.resources.clear();
            }
        }
    }

    /// Save a new link or uploaded file. Both fields are required before any
    /// store call is made.
    pub async fn create(
        &mut self,
        store: &dyn ResourceStore,
        user_id: &str,
        title: &str,
        url: &str,
    ) -> Result<Resource, SessionError> {
        if title.trim().is_empty() {
            return Err(SessionError::MissingField("title"));
        }
        if url.trim().is_empty() {
            return Err(SessionError::MissingField("url"));
        }

        let resource = store.create(user_id, title, url).await?;
        self.resources.insert(0, resource.clone());
        Ok(resource)
    }

    /// Produce the composer snippet for one resource and bump its
    /// `last_used`. The bump is best-effort: a failure is logged and never
    /// blocks the insertion.
    pub async fn insert_snippet(
        &mut self,
        store: &dyn ResourceStore,
        resource_id: &str,
    ) -> Result<String, SessionError> {
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| SessionError::UnknownResource(resource_id.to_string()))?;

        match store.touch_last_used(resource_id).await {
            Ok(date) => resource.last_used = date,
            Err(e) => tracing::warn!(error = %e, resource_id, "failed to update resource last-used"),
        }

        Ok(format!("{} ({})", resource.title, resource.url))
    }
}
