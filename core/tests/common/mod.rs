//! Shared test scaffolding: an isolated on-disk sqlite database per test,
//! grounded on the `tokio::test` + temp-file idiom used throughout the
//! workspace's own unit tests (see `fs::tests` and `volume::registry::tests`).

use std::path::Path;
use std::sync::Arc;

use medialib_core::{Config, MediaLibrary, OpenOutcome};

/// A `Config` pointing every path at subdirectories of `dir`, so concurrent
/// tests never share a database file.
pub fn test_config(dir: &Path) -> Config {
    Config {
        db_path: dir.join("library.db"),
        thumbnail_dir: dir.join("thumbnails"),
        log_dir: dir.join("logs"),
        verbosity: "warn".to_string(),
        parser_retry_cap: 3,
        worker_counts: Default::default(),
        global_cache_quota_bytes: -1,
    }
}

pub async fn init_library(dir: &Path) -> (Arc<MediaLibrary>, OpenOutcome) {
    MediaLibrary::initialize(test_config(dir), Vec::new(), None)
        .await
        .expect("fresh database should initialize cleanly")
}

/// A second connection onto the same sqlite file, for asserting on tables
/// the Facade has no direct mutator for (album/artist/show/thumbnail —
/// populated in a full deployment by a host-injected `Linking` service).
pub async fn connect_raw(dir: &Path) -> sea_orm::DatabaseConnection {
    let url = format!("sqlite://{}?mode=rwc", dir.join("library.db").display());
    let db = sea_orm::Database::connect(&url)
        .await
        .expect("second connection to the same database file should succeed");
    sea_orm::ConnectionTrait::execute_unprepared(&db, "PRAGMA foreign_keys = ON;")
        .await
        .ok();
    db
}
