use std::sync::Arc;

use hanu_agent::{AgentClient, ObjectStore};
use hanu_persist::{Resource, ResourceStore, ThreadStore, UserActivity};
use hanu_types::{DisplayMessage, MediaKind, TaskMap};

use crate::admin::AdminImpersonation;
use crate::auth::{AuthProvider, AuthUser};
use crate::error::SessionError;
use crate::resources::ResourceLibrary;
use crate::session::{ConversationSession, SessionPhase};
use crate::tasks::TaskBoard;
use crate::threads::ThreadList;

const DEFAULT_TITLE: &str = "New Chat";

/// Composition root for one signed-in window: navigation (thread list), the
/// active conversation, the task side panel, and the resource library, all
/// wired to injected collaborators.
///
/// All shared state lives here and is mutated only through these methods
/// (single writer), so views never observe partial updates.
pub struct Shell {
    auth: Arc<dyn AuthProvider>,
    agent: Arc<dyn AgentClient>,
    thread_store: Arc<dyn ThreadStore>,
    resource_store: Arc<dyn ResourceStore>,
    admin: AdminImpersonation,
    thread_list: ThreadList,
    list_error: Option<String>,
    session: ConversationSession,
    board: TaskBoard,
    library: ResourceLibrary,
}

impl Shell {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        agent: Arc<dyn AgentClient>,
        thread_store: Arc<dyn ThreadStore>,
        resource_store: Arc<dyn ResourceStore>,
        admin: AdminImpersonation,
    ) -> Self {
        Self {
            auth,
            agent,
            thread_store,
            resource_store,
            admin,
            thread_list: ThreadList::new(),
            list_error: None,
            session: ConversationSession::new(),
            board: TaskBoard::new(),
            library: ResourceLibrary::new(),
        }
    }

    // ========================================================================
    // IDENTITY
    // ========================================================================

    pub fn current_user(&self) -> Option<AuthUser> {
        self.auth.current_user()
    }

    pub fn is_privileged(&self) -> bool {
        self.current_user()
            .map(|u| self.admin.is_privileged(&u.id))
            .unwrap_or(false)
    }

    /// Whose data the stores and session operate on: the impersonation
    /// target for a privileged caller, otherwise the caller themself.
    pub fn acting_user_id(&self) -> Option<String> {
        let user = self.auth.current_user()?;
        Some(self.admin.acting_user(&user.id).to_string())
    }

    // ========================================================================
    // NAVIGATION (thread list)
    // ========================================================================

    pub fn threads(&self) -> &[hanu_persist::Thread] {
        self.thread_list.threads()
    }

    pub fn list_error(&self) -> Option<&str> {
        self.list_error.as_deref()
    }

    /// Re-fetch the acting user's threads. On failure the list renders
    /// empty with an inline error; it never crashes the shell.
    pub async fn refresh_threads(&mut self) {
        let Some(user_id) = self.acting_user_id() else {
            self.thread_list.clear();
            return;
        };

        match self.thread_store.list(&user_id).await {
            Ok(threads) => {
                self.thread_list.set_all(threads);
                self.list_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, user_id, "failed to fetch threads");
                self.thread_list.clear();
                self.list_error = Some("Failed to load threads".to_string());
            }
        }
    }

    // ========================================================================
    // CONVERSATION
    // ========================================================================

    pub fn messages(&self) -> &[DisplayMessage] {
        self.session.messages()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn session_error(&self) -> Option<&str> {
        self.session.error()
    }

    pub fn active_thread_id(&self) -> Option<&str> {
        self.session.thread_id()
    }

    pub fn title(&self) -> String {
        self.session
            .thread_id()
            .and_then(|id| self.thread_list.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Start a fresh conversation: previous session and task state is gone.
    pub fn new_chat(&mut self) {
        self.session.reset();
        self.board.clear();
    }

    /// Open an existing thread from the navigation list.
    pub async fn open_thread(&mut self, thread_id: &str) {
        let ticket = self.session.begin_load(thread_id);
        let result = self.agent.chat(thread_id, "").await;
        if let Some(tasks) = self.session.apply_load(ticket, result) {
            self.board.replace_all(thread_id, tasks);
        }
    }

    /// Send the composer text to the active thread, creating the thread
    /// first when none is selected.
    pub async fn send(&mut self, text: &str) -> Result<(), SessionError> {
        let user_id = self
            .acting_user_id()
            .ok_or(SessionError::NotAuthenticated)?;

        let outcome = self
            .session
            .send(
                self.agent.as_ref(),
                self.thread_store.as_ref(),
                &mut self.thread_list,
                &user_id,
                text,
            )
            .await?;

        self.board.replace_all(&outcome.thread_id, outcome.tasks);
        Ok(())
    }

    /// Rename the active thread; best-effort like every metadata update.
    pub async fn rename_thread(&mut self, new_title: &str) {
        self.session
            .rename(
                self.thread_store.as_ref(),
                &mut self.thread_list,
                new_title,
            )
            .await;
    }

    // ========================================================================
    // TASK PANEL
    // ========================================================================

    pub fn tasks(&self) -> &TaskMap {
        self.board.tasks()
    }

    pub fn tasks_dirty(&self) -> bool {
        self.board.is_dirty()
    }

    /// Mutable access to the task working copy; editing is a privileged
    /// operation.
    pub fn task_editor(&mut self) -> Result<&mut TaskBoard, SessionError> {
        if !self.is_privileged() {
            return Err(SessionError::NotPrivileged);
        }
        Ok(&mut self.board)
    }

    pub async fn save_tasks(&mut self) -> Result<(), SessionError> {
        if !self.is_privileged() {
            return Err(SessionError::NotPrivileged);
        }
        self.board.save(self.agent.as_ref()).await
    }

    pub async fn attach_task_upload(
        &mut self,
        store: &dyn ObjectStore,
        task_id: &str,
        result_id: &str,
        kind: MediaKind,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, SessionError> {
        if !self.is_privileged() {
            return Err(SessionError::NotPrivileged);
        }
        self.board
            .attach_upload(store, task_id, result_id, kind, file_name, bytes, content_type)
            .await
    }

    // ========================================================================
    // RESOURCES
    // ========================================================================

    pub fn resources(&self) -> &[Resource] {
        self.library.resources()
    }

    pub async fn refresh_resources(&mut self) {
        let user_id = self.acting_user_id();
        self.library
            .load(self.resource_store.as_ref(), user_id.as_deref())
            .await;
    }

    pub async fn add_resource(
        &mut self,
        title: &str,
        url: &str,
    ) -> Result<Resource, SessionError> {
        let user_id = self
            .acting_user_id()
            .ok_or(SessionError::NotAuthenticated)?;
        self.library
            .create(self.resource_store.as_ref(), &user_id, title, url)
            .await
    }

    /// Insert a saved resource into the composer; returns the text snippet.
    pub async fn insert_resource(&mut self, resource_id: &str) -> Result<String, SessionError> {
        self.library
            .insert_snippet(self.resource_store.as_ref(), resource_id)
            .await
    }

    // ========================================================================
    // ADMIN
    // ========================================================================

    /// Per-user activity for the admin landing view (target picker).
    pub async fn user_activity(&self) -> Result<Vec<UserActivity>, SessionError> {
        if !self.is_privileged() {
            return Err(SessionError::NotPrivileged);
        }
        Ok(self.thread_store.user_activity().await?)
    }

    /// Act on another user's data. Only who the reads and writes target
    /// changes; the authenticated identity stays the caller's.
    pub fn impersonate(&mut self, target_user_id: &str) -> Result<(), SessionError> {
        if !self.is_privileged() {
            return Err(SessionError::NotPrivileged);
        }
        self.admin.select_target(target_user_id);
        self.session.reset();
        self.board.clear();
        self.thread_list.clear();
        self.list_error = None;
        Ok(())
    }

    /// Return to the privileged user's own admin landing view.
    pub fn stop_impersonating(&mut self) {
        self.admin.clear_target();
        self.session.reset();
        self.board.clear();
        self.thread_list.clear();
        self.list_error = None;
    }

    pub fn impersonation_target(&self) -> Option<&str> {
        self.admin.target()
    }
}
