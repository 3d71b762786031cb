use hanu_agent::{AgentClient, ObjectStore};
use hanu_types::{MediaKind, Task, TaskMap, TaskResult, TaskStatus};

use crate::error::SessionError;

/// The task mapping most recently reported by the backend for the active
/// thread, plus a dirty working copy for privileged in-place editing.
///
/// Edits are invisible to other viewers until [`TaskBoard::save`] pushes the
/// whole mapping back; the response to that call (like every chat response)
/// replaces the local copy wholesale.
#[derive(Debug, Default)]
pub struct TaskBoard {
    thread_id: Option<String>,
    tasks: TaskMap,
    dirty: bool,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &TaskMap {
        &self.tasks
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Forget everything (thread deselected).
    pub fn clear(&mut self) {
        self.thread_id = None;
        self.tasks = TaskMap::new();
        self.dirty = false;
    }

    /// Adopt the authoritative mapping from a backend response. Local edits
    /// that were never saved are gone by design.
    pub fn replace_all(&mut self, thread_id: &str, tasks: TaskMap) {
        self.thread_id = Some(thread_id.to_string());
        self.tasks = tasks;
        self.dirty = false;
    }

    fn task_mut(&mut self, task_id: &str) -> Result<&mut Task, SessionError> {
        self.tasks
            .get_mut(task_id)
            .ok_or_else(|| SessionError::UnknownTask(task_id.to_string()))
    }

    fn result_mut(
        &mut self,
        task_id: &str,
        result_id: &str,
    ) -> Result<&mut TaskResult, SessionError> {
        self.task_mut(task_id)?
            .result_mut(result_id)
            .ok_or_else(|| SessionError::UnknownResult {
                task_id: task_id.to_string(),
                result_id: result_id.to_string(),
            })
    }

    pub fn set_status(&mut self, task_id: &str, status: TaskStatus) -> Result<(), SessionError> {
        self.task_mut(task_id)?.status = status;
        self.dirty = true;
        Ok(())
    }

    pub fn add_result(&mut self, task_id: &str, result: TaskResult) -> Result<(), SessionError> {
        self.task_mut(task_id)?.results.push(result);
        self.dirty = true;
        Ok(())
    }

    pub fn remove_result(&mut self, task_id: &str, result_id: &str) -> Result<(), SessionError> {
        let task = self.task_mut(task_id)?;
        let before = task.results.len();
        task.results.retain(|r| r.id != result_id);
        if task.results.len() == before {
            return Err(SessionError::UnknownResult {
                task_id: task_id.to_string(),
                result_id: result_id.to_string(),
            });
        }
        self.dirty = true;
        Ok(())
    }

    /// Edit one result's text fields in place.
    pub fn edit_result(
        &mut self,
        task_id: &str,
        result_id: &str,
        title: Option<&str>,
        body: Option<&str>,
        cta: Option<&str>,
    ) -> Result<(), SessionError> {
        let result = self.result_mut(task_id, result_id)?;
        if let Some(title) = title {
            result.title = title.to_string();
        }
        if let Some(body) = body {
            result.body = body.to_string();
        }
        if let Some(cta) = cta {
            result.cta = cta.to_string();
        }
        self.dirty = true;
        Ok(())
    }

    pub fn add_media(
        &mut self,
        task_id: &str,
        result_id: &str,
        kind: MediaKind,
        url: &str,
    ) -> Result<(), SessionError> {
        self.result_mut(task_id, result_id)?.add_media(kind, url);
        self.dirty = true;
        Ok(())
    }

    /// Replace one URL by index. Other indices and the other media lists are
    /// left exactly as they were.
    pub fn set_media(
        &mut self,
        task_id: &str,
        result_id: &str,
        kind: MediaKind,
        index: usize,
        url: &str,
    ) -> Result<(), SessionError> {
        if !self.result_mut(task_id, result_id)?.set_media(kind, index, url) {
            return Err(SessionError::MediaIndexOutOfBounds(index));
        }
        self.dirty = true;
        Ok(())
    }

    /// Remove one URL by index; subsequent entries shift down by one.
    pub fn remove_media(
        &mut self,
        task_id: &str,
        result_id: &str,
        kind: MediaKind,
        index: usize,
    ) -> Result<(), SessionError> {
        if self
            .result_mut(task_id, result_id)?
            .remove_media(kind, index)
            .is_none()
        {
            return Err(SessionError::MediaIndexOutOfBounds(index));
        }
        self.dirty = true;
        Ok(())
    }

    /// Upload a file through the object-storage collaborator and attach the
    /// returned URL to the chosen media list. An upload failure leaves the
    /// list (and every other pending edit) untouched.
    pub async fn attach_upload(
        &mut self,
        store: &dyn ObjectStore,
        task_id: &str,
        result_id: &str,
        kind: MediaKind,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, SessionError> {
        // Validate the destination before spending the upload.
        self.result_mut(task_id, result_id)?;

        let key = hanu_agent::object_key(file_name);
        let url = store
            .put_object(&key, bytes, content_type)
            .await
            .map_err(SessionError::Upload)?;

        self.add_media(task_id, result_id, kind, &url)?;
        Ok(url)
    }

    /// Push the entire working copy to the backend. On success the response
    /// mapping replaces the local one; on failure the unsaved edits are kept
    /// so nothing is lost while the error is reported.
    pub async fn save(&mut self, agent: &dyn AgentClient) -> Result<(), SessionError> {
        let thread_id = self
            .thread_id
            .clone()
            .ok_or(SessionError::NoActiveThread)?;

        let exchange = agent
            .update_state(&thread_id, Some(&self.tasks))
            .await
            .map_err(SessionError::Agent)?;

        self.tasks = exchange.tasks;
        self.dirty = false;
        Ok(())
    }

    /// Re-fetch the mapping without pushing edits (no `tasks` in the call).
    pub async fn refresh(&mut self, agent: &dyn AgentClient) -> Result<(), SessionError> {
        let thread_id = self
            .thread_id
            .clone()
            .ok_or(SessionError::NoActiveThread)?;

        let exchange = agent
            .update_state(&thread_id, None)
            .await
            .map_err(SessionError::Agent)?;

        self.tasks = exchange.tasks;
        self.dirty = false;
        Ok(())
    }
}
