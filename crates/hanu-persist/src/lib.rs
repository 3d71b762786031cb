pub mod builder;
pub mod client;
pub mod error;
pub mod models;
pub mod repositories;
pub mod trait_client;

pub use builder::PersistClientBuilder;
pub use client::PersistClient;
pub use error::PersistError;
pub use models::{Resource, ResourceKind, Thread, UserActivity};
pub use repositories::{ResourceRepository, ThreadRepository};
pub use trait_client::{ResourceStore, ThreadStore};
