use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug, Clone)]
pub enum BridgeError {
    #[error("topic partition not assigned to this task: {0}")]
    PartitionNotAssigned(String),

    #[error("malformed offset-sync record: {0}")]
    CodecError(String),

    #[error("consumer error: {0}")]
    ConsumerError(String),

    #[error("producer error: {0}")]
    ProducerError(String),

    #[error("offset storage error: {0}")]
    OffsetStorageError(String),

    #[error("task startup failed: {0}")]
    StartupError(String),

    #[error("task is not running")]
    NotRunning,
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::ConsumerError(err.to_string())
    }
}
