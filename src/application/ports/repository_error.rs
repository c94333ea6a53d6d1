#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}
