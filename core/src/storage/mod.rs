//! The Storage Engine: one logical `sea_orm::DatabaseConnection` per core
//! instance, opened with WAL + foreign keys on, plus the schema-version
//! gate of §4.8.

use std::path::Path;
use std::time::Duration;

use medialib_entity::settings;
use medialib_errors::StorageError;
use medialib_migration::{Migrator, SCHEMA_FLOOR, SCHEMA_VERSION};
use sea_orm::{
    ActiveValue::Set, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait,
};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Database was already at the current schema version.
    UpToDate,
    /// Database was stepped through one or more migrations.
    Migrated { from: i64, to: i64 },
    /// Database was below the supported floor and was reset.
    Reset,
}

#[instrument(skip_all, fields(path = %db_path.display()))]
pub async fn open(db_path: &Path) -> Result<(DatabaseConnection, OpenOutcome), StorageError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::Migration(e.to_string()))?;
    }

    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(8)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;

    db.execute_unprepared("PRAGMA journal_mode = WAL;").await.ok();
    db.execute_unprepared("PRAGMA synchronous = NORMAL;").await.ok();
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await.ok();

    let outcome = ensure_schema(&db).await?;
    Ok((db, outcome))
}

async fn current_version(db: &DatabaseConnection) -> Result<Option<i64>, DbErr> {
    let row = settings::Entity::find_by_id("db_model_version".to_string())
        .one(db)
        .await?;
    Ok(row.and_then(|m| m.value.parse::<i64>().ok()))
}

/// Applies the version check and migration gate of §4.8: migrate forward
/// if below the current version but at/above the floor, reset if below the
/// floor, no-op if already current.
#[instrument(skip_all)]
async fn ensure_schema(db: &DatabaseConnection) -> Result<OpenOutcome, StorageError> {
    let found = current_version(db).await.unwrap_or(None);

    match found {
        None => {
            // Fresh database: run every migration from scratch.
            Migrator::up(db, None)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
            info!(version = SCHEMA_VERSION, "initialized fresh schema");
            Ok(OpenOutcome::UpToDate)
        }
        Some(version) if version == SCHEMA_VERSION => Ok(OpenOutcome::UpToDate),
        Some(version) if version < SCHEMA_FLOOR => {
            warn!(found = version, floor = SCHEMA_FLOOR, "schema below floor, resetting");
            Migrator::down(db, None)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
            Migrator::up(db, None)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
            Ok(OpenOutcome::Reset)
        }
        Some(version) if version < SCHEMA_VERSION => {
            info!(from = version, to = SCHEMA_VERSION, "stepping schema forward");
            Migrator::up(db, None)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
            bump_version(db, SCHEMA_VERSION).await?;
            Ok(OpenOutcome::Migrated {
                from: version,
                to: SCHEMA_VERSION,
            })
        }
        Some(version) => Err(StorageError::SchemaMismatch {
            found: version,
            floor: SCHEMA_FLOOR,
        }),
    }
}

async fn bump_version(db: &DatabaseConnection, version: i64) -> Result<(), StorageError> {
    let model = settings::ActiveModel {
        key: Set("db_model_version".to_string()),
        value: Set(version.to_string()),
    };
    settings::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(settings::Column::Key)
                .update_column(settings::Column::Value)
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Translates a raw `sea_orm::DbErr` into the Storage Engine's domain
/// error, distinguishing constraint violations (`Conflict`) from busy/locked
/// conditions that a caller may retry (§7).
pub fn classify_db_error(err: DbErr) -> StorageError {
    let text = err.to_string();
    if text.contains("UNIQUE constraint") || text.contains("FOREIGN KEY constraint") {
        StorageError::Conflict(text)
    } else if text.contains("database is locked") || text.contains("SQLITE_BUSY") {
        StorageError::Busy
    } else {
        StorageError::Db(err)
    }
}
