use hanu_agent::{AgentClient, AgentExchange, AgentMessage};
use hanu_persist::{Thread, ThreadStore};
use hanu_types::{DisplayMessage, MessageRole, TaskMap};

use crate::error::SessionError;
use crate::threads::ThreadList;
use crate::title::derive_title;

pub const WELCOME_CONTENT: &str =
    "Hello! 👋 I'm your AI assistant. How can I help you today?";

const LOAD_ERROR_TEXT: &str = "Failed to load messages";

/// The synthetic assistant greeting that opens every rendered conversation.
pub fn welcome_message() -> DisplayMessage {
    DisplayMessage::new(0, MessageRole::Assistant, WELCOME_CONTENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No thread selected; only the welcome message and topic picker show.
    Empty,
    /// A thread was selected via navigation and its state is being fetched.
    Loading,
    /// Messages and tasks for the selected thread are on screen.
    Active,
    /// The selection fetch failed; welcome message plus inline error text.
    /// Sending a new message is still allowed (retry path).
    Error,
}

/// Proof that a fetch belongs to the current thread selection. Applying a
/// result with a stale ticket is a no-op, which is how a late-arriving
/// response for a thread that is no longer displayed gets discarded.
#[must_use]
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
}

/// What a successful send produced: the thread it landed on (freshly created
/// for the first message of a new conversation) and the authoritative task
/// mapping from the response.
#[derive(Debug)]
pub struct SendOutcome {
    pub thread_id: String,
    pub created: Option<Thread>,
    pub tasks: TaskMap,
}

/// View state for exactly one active thread's conversation.
///
/// The backend is the source of truth on every (re)selection: switching
/// threads discards all in-memory state, and every successful exchange
/// replaces the message list wholesale. Message ids are positional (0 is
/// the welcome message, `1..N` follow response order).
pub struct ConversationSession {
    thread_id: Option<String>,
    messages: Vec<DisplayMessage>,
    phase: SessionPhase,
    error: Option<String>,
    is_sending: bool,
    generation: u64,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            thread_id: None,
            messages: vec![welcome_message()],
            phase: SessionPhase::Empty,
            error: None,
            is_sending: false,
            generation: 0,
        }
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a chat request is outstanding; the input control disables
    /// itself on this flag, so at most one send is in flight per session.
    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    /// Deselect (new chat): drop all state for the previous thread and
    /// cancel interest in any in-flight fetch.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.thread_id = None;
        self.messages = vec![welcome_message()];
        self.phase = SessionPhase::Empty;
        self.error = None;
        self.is_sending = false;
    }

    /// Select a thread via navigation. State for any previous selection is
    /// discarded before the fetch result arrives.
    pub fn begin_load(&mut self, thread_id: &str) -> FetchTicket {
        self.generation += 1;
        self.thread_id = Some(thread_id.to_string());
        self.messages = vec![welcome_message()];
        self.phase = SessionPhase::Loading;
        self.error = None;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of a selection fetch. Returns the task mapping to
    /// hand to the task panel, or `None` when the ticket is stale (the
    /// selection changed while the request was in flight).
    pub fn apply_load(
        &mut self,
        ticket: FetchTicket,
        result: anyhow::Result<AgentExchange>,
    ) -> Option<TaskMap> {
        if ticket.generation != self.generation {
            tracing::debug!("discarding fetch result for a deselected thread");
            return None;
        }

        match result {
            Ok(exchange) => {
                self.messages = format_messages(&exchange.messages);
                self.phase = SessionPhase::Active;
                self.error = None;
                Some(exchange.tasks)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load thread messages");
                self.messages = vec![welcome_message()];
                self.phase = SessionPhase::Error;
                self.error = Some(LOAD_ERROR_TEXT.to_string());
                Some(TaskMap::new())
            }
        }
    }

    /// Fetch an already-persisted thread's messages and tasks (the empty
    /// query is the backend's "current state" call).
    pub async fn load(&mut self, agent: &dyn AgentClient, thread_id: &str) -> Option<TaskMap> {
        let ticket = self.begin_load(thread_id);
        let result = agent.chat(thread_id, "").await;
        self.apply_load(ticket, result)
    }

    /// Send one user message.
    ///
    /// On a session with no thread selected this first creates the thread
    /// (title derived from the message) and then issues the chat call with
    /// the new id. The response replaces messages and tasks wholesale; the
    /// recency bump afterwards is best-effort. A failed chat call resets
    /// the visible messages to the welcome sequence.
    pub async fn send(
        &mut self,
        agent: &dyn AgentClient,
        threads: &dyn ThreadStore,
        list: &mut ThreadList,
        user_id: &str,
        text: &str,
    ) -> Result<SendOutcome, SessionError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let mut created = None;
        let thread_id = match &self.thread_id {
            Some(id) => id.clone(),
            None => {
                let thread = threads.create(user_id, &derive_title(query)).await?;
                list.insert(thread.clone());
                self.thread_id = Some(thread.id.clone());
                let id = thread.id.clone();
                created = Some(thread);
                id
            }
        };

        self.is_sending = true;
        let result = agent.chat(&thread_id, query).await;
        self.is_sending = false;

        let exchange = match result {
            Ok(exchange) => exchange,
            Err(e) => {
                if created.is_some() {
                    // First message of a new conversation failed: surface no
                    // partial thread, return to the empty state.
                    self.reset();
                } else {
                    self.messages = vec![welcome_message()];
                }
                return Err(SessionError::Agent(e));
            }
        };

        self.messages = format_messages(&exchange.messages);
        self.phase = SessionPhase::Active;
        self.error = None;

        // Recency bump so the navigation order reflects activity. The
        // exchange already succeeded, so a failure here is logged and
        // swallowed rather than surfaced.
        match threads.touch(&thread_id).await {
            Ok(date) => list.apply_touch(&thread_id, date),
            Err(e) => tracing::warn!(error = %e, thread_id, "failed to update thread date"),
        }

        Ok(SendOutcome {
            thread_id,
            created,
            tasks: exchange.tasks,
        })
    }

    /// Rename the active thread. Background metadata update: failures are
    /// logged and swallowed, never surfaced as a blocking error.
    pub async fn rename(
        &self,
        threads: &dyn ThreadStore,
        list: &mut ThreadList,
        new_title: &str,
    ) {
        let Some(thread_id) = &self.thread_id else {
            return;
        };
        let title = new_title.trim();
        if title.is_empty() {
            return;
        }

        match threads.rename(thread_id, title).await {
            Ok(date) => list.apply_rename(thread_id, title, date),
            Err(e) => tracing::warn!(error = %e, thread_id, "failed to update thread title"),
        }
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a backend message sequence into the rendered list: the welcome
/// message first, then content-bearing user/assistant messages renumbered
/// by position. Tool bookkeeping and empty messages are dropped.
fn format_messages(wire: &[AgentMessage]) -> Vec<DisplayMessage> {
    let mut messages = vec![welcome_message()];
    for message in wire {
        if message.content.trim().is_empty() {
            continue;
        }
        let role = match message.role.as_str() {
            "assistant" => MessageRole::Assistant,
            "user" => MessageRole::User,
            _ => continue,
        };
        let id = messages.len();
        messages.push(DisplayMessage::new(id, role, message.content.clone()));
    }
    messages
}
