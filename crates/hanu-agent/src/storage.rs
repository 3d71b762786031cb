// Object-storage collaborator: upload bytes, get back a public URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use uuid::Uuid;

/// Opaque upload-and-get-URL contract. Callers never see bucket layout or
/// credentials, only the publicly fetchable URL of the stored object.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

/// Derive a unique storage key for an uploaded file, keeping its extension.
pub fn object_key(file_name: &str) -> String {
    let id = Uuid::new_v4();
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("uploads/{}.{}", id, ext),
        _ => format!("uploads/{}", id),
    }
}

/// S3-style HTTP store: `PUT` the object to its bucket URL and return that
/// URL for public fetching.
pub struct S3ObjectStore {
    http_client: reqwest::Client,
    bucket: String,
    region: String,
}

impl S3ObjectStore {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            bucket: bucket.into(),
            region: region.into(),
        })
    }

    pub fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = self.public_url(key);

        let response = self
            .http_client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .context("Failed to upload object")?;

        if !response.status().is_success() {
            anyhow::bail!("Object storage error ({})", response.status());
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_extension() {
        let key = object_key("report.final.pdf");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn object_key_without_extension() {
        let key = object_key("README");
        assert!(key.starts_with("uploads/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn public_url_points_at_bucket_host() {
        let store = S3ObjectStore::new("hanu-media", "eu-west-1").unwrap();
        assert_eq!(
            store.public_url("uploads/abc.png"),
            "https://hanu-media.s3.eu-west-1.amazonaws.com/uploads/abc.png"
        );
    }
}
