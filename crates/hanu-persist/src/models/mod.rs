pub mod activity;
pub mod resource;
pub mod thread;

pub use activity::UserActivity;
pub use resource::{Resource, ResourceKind};
pub use thread::Thread;
