use thiserror::Error;

/// Failure modes of the Storage Engine (§7).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database is busy, retries exhausted")]
    Busy,

    #[error("unique constraint or foreign key violation: {0}")]
    Conflict(String),

    #[error("schema version {found} is older than the minimum supported {floor}; database reset required")]
    SchemaMismatch { found: i64, floor: i64 },

    #[error("migration {0} failed")]
    Migration(String),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}
