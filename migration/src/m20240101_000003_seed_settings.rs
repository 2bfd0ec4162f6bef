use sea_orm_migration::prelude::*;

use crate::SCHEMA_VERSION;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(&format!(
            "INSERT INTO settings (key, value) VALUES ('db_model_version', '{SCHEMA_VERSION}')
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;"
        ))
        .await?;
        db.execute_unprepared(
            "INSERT INTO settings (key, value) VALUES ('global_cache_quota_bytes', '-1')
             ON CONFLICT(key) DO NOTHING;",
        )
        .await?;
        db.execute_unprepared(
            "INSERT INTO settings (key, value) VALUES ('discover_network_enabled', '0')
             ON CONFLICT(key) DO NOTHING;",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DELETE FROM settings WHERE key IN ('db_model_version', 'global_cache_quota_bytes', 'discover_network_enabled');",
        )
        .await?;
        Ok(())
    }
}
