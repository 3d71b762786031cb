use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
