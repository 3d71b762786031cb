pub mod http;
pub mod storage;
pub mod traits;

pub use http::HttpAgentClient;
pub use storage::{object_key, ObjectStore, S3ObjectStore};
pub use traits::{AgentClient, AgentExchange, AgentMessage};
