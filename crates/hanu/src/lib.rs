//! # Hanu
//!
//! Client core for the Hanu business assistant: threaded conversations with
//! a backend agent, an asynchronous task panel, saved resources, and an
//! admin impersonation mode.
//!
//! ## Overview
//!
//! The crates compose into a headless shell a front end can drive:
//!
//! - **Converse** with the backend agent over its chat endpoint
//! - **Persist** threads and resources in MongoDB
//! - **Track tasks** reported by the agent, and edit them in admin mode
//! - **Impersonate** another user's data from an allow-listed account
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hanu::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let persist = PersistClient::builder()
//!         .mongodb_uri(std::env::var("MONGODB_URI")?)
//!         .database("hanu")
//!         .build()
//!         .await?;
//!
//!     let auth = Arc::new(StaticAuthProvider::signed_in(AuthUser::new("u1")));
//!     let agent = Arc::new(HttpAgentClient::new()?);
//!
//!     let mut shell = Shell::new(
//!         auth,
//!         agent,
//!         Arc::new(persist.threads().clone()),
//!         Arc::new(persist.resources().clone()),
//!         AdminImpersonation::default(),
//!     );
//!
//!     shell.refresh_threads().await;
//!     shell.send("Plan my Q3 marketing").await?;
//!     for message in shell.messages() {
//!         println!("[{}] {:?}: {}", message.id, message.role, message.content);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`hanu-session`**: conversation session, task board, shell state
//! - **`hanu-agent`**: HTTP client for the agent backend and object storage
//! - **`hanu-persist`**: MongoDB persistence for threads and resources
//! - **`hanu-types`**: shared domain types
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use hanu_types::{
    display_value, DisplayMessage, MediaKind, MessageRole, Task, TaskMap, TaskResult, TaskStatus,
};

pub use hanu_agent::{
    object_key, AgentClient, AgentExchange, AgentMessage, HttpAgentClient, ObjectStore,
    S3ObjectStore,
};

pub use hanu_persist::{
    PersistClient, PersistClientBuilder, PersistError, Resource, ResourceKind, ResourceRepository,
    ResourceStore, Thread, ThreadRepository, ThreadStore, UserActivity,
};

pub use hanu_session::{
    derive_title, filter_activity, welcome_message, AdminImpersonation, AuthProvider, AuthUser,
    ConversationSession, FetchTicket, ResourceLibrary, SendOutcome, SessionError, SessionPhase,
    Shell, StaticAuthProvider, TaskBoard, ThreadList, WELCOME_CONTENT,
};
