use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Persistence I/O failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be serialized or deserialized.
    #[error("Storage serialization error: {0}")]
    Serde(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}
