//! One `thiserror` enum per domain, following the one-file-per-domain
//! layout of a shared errors crate: each module owns the failure modes of
//! its corresponding subsystem.

pub mod cache;
pub mod device;
pub mod facade;
pub mod fs;
pub mod indexer_rules;
pub mod parser;
pub mod query;
pub mod storage;

pub use cache::CacheError;
pub use device::DeviceError;
pub use facade::FacadeError;
pub use fs::FsError;
pub use indexer_rules::IndexerRuleError;
pub use parser::ParserError;
pub use query::QueryError;
pub use storage::StorageError;
