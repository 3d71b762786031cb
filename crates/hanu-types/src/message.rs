use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message as rendered in the conversation view.
///
/// Ids are positional: 0 is reserved for the synthetic welcome message and
/// `1..N` follow the order of the most recent backend response. They are
/// stable only within one fetch/response cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub id: usize,
    pub role: MessageRole,
    pub content: String,
}

impl DisplayMessage {
    pub fn new(id: usize, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
        }
    }
}
