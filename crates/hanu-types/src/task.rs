use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Full task mapping for one thread, keyed by task id.
///
/// The backend is authoritative: every successful `/chat` or `/update_state`
/// response carries the whole mapping and replaces the local copy wholesale.
pub type TaskMap = BTreeMap<String, Task>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Processing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub status: TaskStatus,
    /// Open-ended inputs reported by the agent. The backend contract is
    /// intentionally schemaless here; values are kept opaque and stringified
    /// only at display time (see [`display_value`]).
    #[serde(default)]
    pub args: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<TaskResult>,
}

impl Task {
    pub fn result(&self, result_id: &str) -> Option<&TaskResult> {
        self.results.iter().find(|r| r.id == result_id)
    }

    pub fn result_mut(&mut self, result_id: &str) -> Option<&mut TaskResult> {
        self.results.iter_mut().find(|r| r.id == result_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Images,
    Videos,
    Documents,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Images, MediaKind::Videos, MediaKind::Documents];

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Images => "images",
            MediaKind::Videos => "videos",
            MediaKind::Documents => "documents",
        }
    }
}

/// One deliverable produced by a task: text plus three independent ordered
/// media-URL lists. Any of the lists may be empty; a result with all three
/// empty still renders (no media tabs shown).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub images_url: Vec<String>,
    #[serde(default)]
    pub videos_url: Vec<String>,
    #[serde(default)]
    pub documents_url: Vec<String>,
}

impl TaskResult {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            body: String::new(),
            cta: String::new(),
            images_url: Vec::new(),
            videos_url: Vec::new(),
            documents_url: Vec::new(),
        }
    }

    pub fn media(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Images => &self.images_url,
            MediaKind::Videos => &self.videos_url,
            MediaKind::Documents => &self.documents_url,
        }
    }

    fn media_mut(&mut self, kind: MediaKind) -> &mut Vec<String> {
        match kind {
            MediaKind::Images => &mut self.images_url,
            MediaKind::Videos => &mut self.videos_url,
            MediaKind::Documents => &mut self.documents_url,
        }
    }

    /// Append a URL to one media list, leaving the other lists untouched.
    pub fn add_media(&mut self, kind: MediaKind, url: impl Into<String>) {
        self.media_mut(kind).push(url.into());
    }

    /// Replace the URL at `index`. Returns `false` when the index is out of
    /// bounds; other entries are never reordered.
    pub fn set_media(&mut self, kind: MediaKind, index: usize, url: impl Into<String>) -> bool {
        match self.media_mut(kind).get_mut(index) {
            Some(slot) => {
                *slot = url.into();
                true
            }
            None => false,
        }
    }

    /// Remove the URL at `index`, shifting subsequent entries down by one.
    pub fn remove_media(&mut self, kind: MediaKind, index: usize) -> Option<String> {
        let urls = self.media_mut(kind);
        if index < urls.len() {
            Some(urls.remove(index))
        } else {
            None
        }
    }
}

/// Display-time stringification for opaque task args: strings render as-is,
/// everything else falls back to its JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
