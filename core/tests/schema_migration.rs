//! Scenario: the schema-version gate (§4.8) — a fresh database migrates to
//! the current version, reopening an up-to-date database is a no-op, and
//! every migration creates tables/triggers exactly once (idempotent
//! `Migrator::up` is never re-run against an already-migrated schema).

mod common;

use medialib_migration::SCHEMA_VERSION;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

#[tokio::test]
async fn fresh_database_reaches_current_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());

    let (db, outcome) = medialib_core::storage::open(&config.db_path).await.unwrap();
    assert_eq!(outcome, medialib_core::OpenOutcome::UpToDate);

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT value FROM settings WHERE key = 'db_model_version'".to_owned(),
        ))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    let value: String = rows[0].try_get("", "value").unwrap();
    assert_eq!(value.parse::<i64>().unwrap(), SCHEMA_VERSION);
}

#[tokio::test]
async fn reopening_an_up_to_date_database_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());

    let (_db, first) = medialib_core::storage::open(&config.db_path).await.unwrap();
    assert_eq!(first, medialib_core::OpenOutcome::UpToDate);

    let (_db2, second) = medialib_core::storage::open(&config.db_path).await.unwrap();
    assert_eq!(second, medialib_core::OpenOutcome::UpToDate);
}

#[tokio::test]
async fn every_catalogue_table_and_trigger_exists_after_migration() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());
    let (db, _outcome) = medialib_core::storage::open(&config.db_path).await.unwrap();

    let expect_exists = |kind: &'static str, name: &'static str| {
        let db = db.clone();
        async move {
            let rows = db
                .query_all(Statement::from_string(
                    DatabaseBackend::Sqlite,
                    format!("SELECT name FROM sqlite_master WHERE type = '{kind}' AND name = '{name}'"),
                ))
                .await
                .unwrap();
            assert_eq!(rows.len(), 1, "expected {kind} '{name}' to exist after migration");
        }
    };

    for table in [
        "media", "folder", "device", "device_mountpoint", "file", "media_group", "genre",
        "media_genre", "album", "album_track", "album_appearance", "artist", "show",
        "show_episode", "playlist", "playlist_item", "task", "thumbnail", "settings",
        "bookmark", "chapter", "subscription", "service",
    ] {
        expect_exists("table", table).await;
    }

    for trigger in [
        "trg_folder_media_insert",
        "trg_media_group_delete",
        "trg_device_presence",
        "trg_playlist_item_insert",
        "trg_album_thumb_delete",
        "trg_album_track_delete",
        "trg_show_episode_delete",
        "trg_media_genre_insert",
    ] {
        expect_exists("trigger", trigger).await;
    }
}
