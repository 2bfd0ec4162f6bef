use thiserror::Error;

/// Top-level error aggregating every domain, mirroring the teacher's
/// `heavy_lifting::Error` aggregation pattern (its `rspc::Error` conversion
/// is not reproduced — see DESIGN.md).
#[derive(Debug, Error)]
pub enum FacadeError {
    #[error(transparent)]
    Device(#[from] crate::device::DeviceError),

    #[error(transparent)]
    Fs(#[from] crate::fs::FsError),

    #[error(transparent)]
    IndexerRule(#[from] crate::indexer_rules::IndexerRuleError),

    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),

    #[error(transparent)]
    Parser(#[from] crate::parser::ParserError),

    #[error(transparent)]
    Cache(#[from] crate::cache::CacheError),

    #[error(transparent)]
    Query(#[from] crate::query::QueryError),

    #[error("core already initialized")]
    AlreadyInitialized,

    #[error("core not yet initialized")]
    NotInitialized,

    #[error("media {0} not found")]
    MediaNotFound(i32),
}
