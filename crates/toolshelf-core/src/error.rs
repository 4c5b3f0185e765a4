use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised while reading or writing the persisted record block.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The record block could not be located or parsed.
    #[error("record store is malformed: {0}")]
    Format(String),
    /// Writing the document failed.
    #[error("failed to persist record store: {0}")]
    Persistence(String),
    /// The document could not be read at all.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by catalog operations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid tool: {0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
