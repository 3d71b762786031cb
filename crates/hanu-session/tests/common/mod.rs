#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hanu_agent::{AgentClient, AgentExchange, AgentMessage, ObjectStore};
use hanu_persist::{
    PersistError, Resource, ResourceKind, ResourceStore, Thread, ThreadStore, UserActivity,
};
use hanu_types::TaskMap;
use uuid::Uuid;

/// Ordered record of collaborator calls, shared between mocks so tests can
/// assert cross-collaborator sequencing.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn exchange(messages: &[(&str, &str)], tasks: TaskMap) -> AgentExchange {
    AgentExchange {
        messages: messages
            .iter()
            .map(|(role, content)| AgentMessage::new(*role, *content))
            .collect(),
        tasks,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentCall {
    Chat { thread_id: String, query: String },
    UpdateState { thread_id: String, tasks: Option<TaskMap> },
}

/// Scripted agent backend: responses are consumed front-to-back, every call
/// is recorded.
pub struct MockAgent {
    responses: Mutex<VecDeque<anyhow::Result<AgentExchange>>>,
    pub calls: Mutex<Vec<AgentCall>>,
    journal: Journal,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::with_journal(journal())
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            journal,
        }
    }

    pub fn push_ok(&self, exchange: AgentExchange) {
        self.responses.lock().unwrap().push_back(Ok(exchange));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(anyhow!("{}", message.to_string())));
    }

    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> anyhow::Result<AgentExchange> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AgentExchange::default()))
    }
}

#[async_trait]
impl AgentClient for MockAgent {
    async fn chat(&self, thread_id: &str, query: &str) -> anyhow::Result<AgentExchange> {
        self.journal.lock().unwrap().push("chat".to_string());
        self.calls.lock().unwrap().push(AgentCall::Chat {
            thread_id: thread_id.to_string(),
            query: query.to_string(),
        });
        self.next_response()
    }

    async fn update_state(
        &self,
        thread_id: &str,
        tasks: Option<&TaskMap>,
    ) -> anyhow::Result<AgentExchange> {
        self.journal.lock().unwrap().push("update_state".to_string());
        self.calls.lock().unwrap().push(AgentCall::UpdateState {
            thread_id: thread_id.to_string(),
            tasks: tasks.cloned(),
        });
        self.next_response()
    }
}

/// In-memory thread store with failure injection.
pub struct MemoryThreadStore {
    pub threads: Mutex<Vec<Thread>>,
    pub listed_users: Mutex<Vec<String>>,
    pub touched: Mutex<Vec<String>>,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_touch: AtomicBool,
    pub fail_rename: AtomicBool,
    journal: Journal,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::with_journal(journal())
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            threads: Mutex::new(Vec::new()),
            listed_users: Mutex::new(Vec::new()),
            touched: Mutex::new(Vec::new()),
            fail_list: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_touch: AtomicBool::new(false),
            fail_rename: AtomicBool::new(false),
            journal,
        }
    }

    pub fn seed(&self, thread: Thread) {
        self.threads.lock().unwrap().push(thread);
    }

    pub fn all(&self) -> Vec<Thread> {
        self.threads.lock().unwrap().clone()
    }
}

pub fn make_thread(id: &str, user_id: &str, title: &str, secs: i64) -> Thread {
    Thread {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        date: DateTime::<Utc>::from_timestamp(secs, 0).unwrap(),
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Thread>, PersistError> {
        self.listed_users.lock().unwrap().push(user_id.to_string());
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(PersistError::StoreUnavailable("injected".to_string()));
        }
        let mut threads: Vec<Thread> = self
            .threads
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        threads.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(threads)
    }

    async fn create(&self, user_id: &str, title: &str) -> Result<Thread, PersistError> {
        self.journal.lock().unwrap().push("create".to_string());
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(PersistError::StoreUnavailable("injected".to_string()));
        }
        let thread = Thread {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            date: Utc::now(),
        };
        self.threads.lock().unwrap().push(thread.clone());
        Ok(thread)
    }

    async fn rename(&self, thread_id: &str, new_title: &str) -> Result<DateTime<Utc>, PersistError> {
        if self.fail_rename.load(Ordering::SeqCst) {
            return Err(PersistError::StoreUnavailable("injected".to_string()));
        }
        let now = Utc::now();
        let mut threads = self.threads.lock().unwrap();
        let thread = threads
            .iter_mut()
            .find(|t| t.id == thread_id)
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))?;
        thread.title = new_title.to_string();
        thread.date = now;
        Ok(now)
    }

    async fn touch(&self, thread_id: &str) -> Result<DateTime<Utc>, PersistError> {
        self.touched.lock().unwrap().push(thread_id.to_string());
        if self.fail_touch.load(Ordering::SeqCst) {
            return Err(PersistError::StoreUnavailable("injected".to_string()));
        }
        let now = Utc::now();
        let mut threads = self.threads.lock().unwrap();
        let thread = threads
            .iter_mut()
            .find(|t| t.id == thread_id)
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))?;
        thread.date = now;
        Ok(now)
    }

    async fn user_activity(&self) -> Result<Vec<UserActivity>, PersistError> {
        let threads = self.threads.lock().unwrap();
        let mut activity: Vec<UserActivity> = Vec::new();
        for thread in threads.iter() {
            match activity.iter_mut().find(|a| a.user_id == thread.user_id) {
                Some(entry) => {
                    entry.thread_count += 1;
                    if thread.date > entry.last_active {
                        entry.last_active = thread.date;
                    }
                }
                None => activity.push(UserActivity {
                    user_id: thread.user_id.clone(),
                    last_active: thread.date,
                    thread_count: 1,
                }),
            }
        }
        activity.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        Ok(activity)
    }
}

/// In-memory resource store with failure injection.
pub struct MemoryResourceStore {
    pub resources: Mutex<Vec<Resource>>,
    pub touched: Mutex<Vec<String>>,
    pub fail_list: AtomicBool,
    pub fail_touch: AtomicBool,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self {
            resources: Mutex::new(Vec::new()),
            touched: Mutex::new(Vec::new()),
            fail_list: AtomicBool::new(false),
            fail_touch: AtomicBool::new(false),
        }
    }

    pub fn seed(&self, resource: Resource) {
        self.resources.lock().unwrap().push(resource);
    }
}

pub fn make_resource(id: &str, user_id: &str, title: &str, url: &str, secs: i64) -> Resource {
    Resource {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        last_used: DateTime::<Utc>::from_timestamp(secs, 0).unwrap(),
        kind: ResourceKind::classify(url),
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Resource>, PersistError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(PersistError::StoreUnavailable("injected".to_string()));
        }
        let mut resources: Vec<Resource> = self
            .resources
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        resources.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        Ok(resources)
    }

    async fn create(&self, user_id: &str, title: &str, url: &str) -> Result<Resource, PersistError> {
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
        self.resources.lock().unwrap().push(resource.clone());
        Ok(resource)
    }

    async fn touch_last_used(&self, resource_id: &str) -> Result<DateTime<Utc>, PersistError> {
        self.touched.lock().unwrap().push(resource_id.to_string());
        if self.fail_touch.load(Ordering::SeqCst) {
            return Err(PersistError::StoreUnavailable("injected".to_string()));
        }
        let now = Utc::now();
        let mut resources = self.resources.lock().unwrap();
        let resource = resources
            .iter_mut()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| PersistError::ResourceNotFound(resource_id.to_string()))?;
        resource.last_used = now;
        Ok(now)
    }
}

/// Object store that records uploads and can be told to fail.
pub struct MockObjectStore {
    pub uploads: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(
        &self,
        key: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> anyhow::Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("injected upload failure");
        }
        self.uploads.lock().unwrap().push(key.to_string());
        Ok(format!("https://hanu-media.s3.eu-west-1.amazonaws.com/{}", key))
    }
}
