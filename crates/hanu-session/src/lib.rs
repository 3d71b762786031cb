pub mod admin;
pub mod auth;
pub mod error;
pub mod resources;
pub mod session;
pub mod shell;
pub mod tasks;
pub mod threads;

mod title;

pub use admin::{filter_activity, AdminImpersonation};
pub use auth::{AuthProvider, AuthUser, StaticAuthProvider};
pub use error::SessionError;
pub use resources::ResourceLibrary;
pub use session::{
    welcome_message, ConversationSession, FetchTicket, SendOutcome, SessionPhase, WELCOME_CONTENT,
};
pub use shell::Shell;
pub use tasks::TaskBoard;
pub use threads::ThreadList;
pub use title::derive_title;
