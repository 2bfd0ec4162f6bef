pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_initial_tables;
mod m20240101_000002_create_triggers;
mod m20240101_000003_seed_settings;

/// Current schema version, written into `settings.db_model_version` by the
/// seed migration and compared against on every open (§4.8).
pub const SCHEMA_VERSION: i64 = 1;

/// Floor below which the database is reset instead of stepped through
/// upgrade migrations (§4.8).
pub const SCHEMA_FLOOR: i64 = 1;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_initial_tables::Migration),
            Box::new(m20240101_000002_create_triggers::Migration),
            Box::new(m20240101_000003_seed_settings::Migration),
        ]
    }
}
