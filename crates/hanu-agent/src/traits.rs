use anyhow::Result;
use async_trait::async_trait;
use hanu_types::TaskMap;
use serde::{Deserialize, Serialize};

/// Trait for the backend agent endpoint
///
/// Implementations carry out one request/response exchange against the
/// chat backend; the session layer owns how responses are merged into view
/// state.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// `POST /chat` with the user's query. An empty query is the valid
    /// "fetch current state" call for an existing thread.
    async fn chat(&self, thread_id: &str, query: &str) -> Result<AgentExchange>;

    /// `POST /update_state`. With `tasks` set, persists an edited task
    /// mapping (admin mode); with `None`, refreshes state without sending a
    /// user message.
    async fn update_state(&self, thread_id: &str, tasks: Option<&TaskMap>) -> Result<AgentExchange>;
}

/// Response shape shared by both endpoints: the thread's messages plus the
/// full current task mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentExchange {
    #[serde(default)]
    pub messages: Vec<AgentMessage>,
    #[serde(default)]
    pub tasks: TaskMap,
}

/// One wire message. The backend may attach tool-call bookkeeping fields;
/// only role and content are consumed here, the rest is ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl AgentMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub query: &'a str,
    pub thread_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateStateRequest<'a> {
    pub thread_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<&'a TaskMap>,
}
