use thiserror::Error;

/// Failure modes of the Query Layer (§6).
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("search term must be at least 3 characters, got {0}")]
    SearchTermTooShort(usize),

    #[error("storage error while querying: {0}")]
    Storage(#[from] crate::storage::StorageError),
}
