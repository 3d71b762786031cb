pub mod message;
pub mod task;

pub use message::{DisplayMessage, MessageRole};
pub use task::{display_value, MediaKind, Task, TaskMap, TaskResult, TaskStatus};
