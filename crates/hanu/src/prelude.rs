//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use hanu::prelude::*;
//! ```

pub use crate::{
    AdminImpersonation, AgentClient, AgentExchange, AuthProvider, AuthUser, ConversationSession,
    DisplayMessage, HttpAgentClient, MediaKind, MessageRole, ObjectStore, PersistClient,
    PersistError, Resource, ResourceKind, ResourceStore, S3ObjectStore, SessionError, SessionPhase,
    Shell, StaticAuthProvider, Task, TaskBoard, TaskMap, TaskResult, TaskStatus, Thread,
    ThreadList, ThreadStore, UserActivity,
};
