use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("no authenticated user")]
    NotAuthenticated,

    #[error("no active thread")]
    NoActiveThread,

    #[error("not authorized for admin operations")]
    NotPrivileged,

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("unknown result {result_id} in task {task_id}")]
    UnknownResult { task_id: String, result_id: String },

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("media index {0} out of bounds")]
    MediaIndexOutOfBounds(usize),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("agent request failed: {0}")]
    Agent(anyhow::Error),

    #[error("upload failed: {0}")]
    Upload(anyhow::Error),

    #[error(transparent)]
    Store(#[from] hanu_persist::PersistError),
}
