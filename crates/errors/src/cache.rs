use thiserror::Error;

/// Failure modes of the Cache Manager (§4.7).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no quota configured for service {0}")]
    NoQuota(String),

    #[error("storage error while evicting: {0}")]
    Storage(#[from] crate::storage::StorageError),
}
