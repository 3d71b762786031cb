use mongodb::Client;

use crate::builder::PersistClientBuilder;
use crate::error::{PersistError, Result};
use crate::repositories::{ResourceRepository, ThreadRepository};

pub struct PersistClient {
    thread_repo: ThreadRepository,
    resource_repo: ResourceRepository,
}

impl PersistClient {
    pub async fn connect(mongodb_uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            thread_repo: ThreadRepository::new(&client, db_name),
            resource_repo: ResourceRepository::new(&client, db_name),
        })
    }

    pub fn builder() -> PersistClientBuilder {
        PersistClientBuilder::new()
    }

    pub fn threads(&self) -> &ThreadRepository {
        &self.thread_repo
    }

    pub fn resources(&self) -> &ResourceRepository {
        &self.resource_repo
    }
}
