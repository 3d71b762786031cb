// HTTP implementation of the agent backend contract (direct, no SDK)

use crate::traits::{AgentClient, AgentExchange, ChatRequest, UpdateStateRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use hanu_types::TaskMap;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;

const DEFAULT_AGENT_BASE: &str = "http://127.0.0.1:8080";

pub struct HttpAgentClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpAgentClient {
    /// Create a client against the default local backend.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_AGENT_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post_exchange<T: Serialize>(&self, path: &str, payload: &T) -> Result<AgentExchange> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .json(payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Agent backend error ({}): {}", status, error_text);
        }

        response
            .json::<AgentExchange>()
            .await
            .context("Failed to parse response")
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn chat(&self, thread_id: &str, query: &str) -> Result<AgentExchange> {
        self.post_exchange("/chat", &ChatRequest { query, thread_id })
            .await
    }

    async fn update_state(&self, thread_id: &str, tasks: Option<&TaskMap>) -> Result<AgentExchange> {
        self.post_exchange("/update_state", &UpdateStateRequest { thread_id, tasks })
            .await
    }
}
