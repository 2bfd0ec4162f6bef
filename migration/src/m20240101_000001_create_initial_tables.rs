use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Settings is a plain key/value table; built by hand rather than
        // sea-orm's table builder since there's nothing but two text columns.
        db.execute_unprepared(
            "CREATE TABLE settings (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE device (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid      TEXT NOT NULL,
                scheme    TEXT NOT NULL,
                name      TEXT NOT NULL,
                removable BOOLEAN NOT NULL DEFAULT 0,
                network   BOOLEAN NOT NULL DEFAULT 0,
                present   BOOLEAN NOT NULL DEFAULT 1,
                UNIQUE(uuid, scheme)
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE device_mountpoint (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id  INTEGER NOT NULL REFERENCES device(id) ON DELETE CASCADE,
                mrl        TEXT NOT NULL,
                last_seen  DATETIME NOT NULL,
                UNIQUE(device_id, mrl)
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE folder (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                mrl        TEXT NOT NULL UNIQUE,
                name       TEXT NOT NULL,
                device_id  INTEGER NOT NULL REFERENCES device(id) ON DELETE CASCADE,
                parent_id  INTEGER REFERENCES folder(id) ON DELETE CASCADE,
                banned     BOOLEAN NOT NULL DEFAULT 0,
                public     BOOLEAN NOT NULL DEFAULT 0,
                favorite   BOOLEAN NOT NULL DEFAULT 0,
                nb_video   INTEGER NOT NULL DEFAULT 0,
                nb_audio   INTEGER NOT NULL DEFAULT 0,
                nb_unknown INTEGER NOT NULL DEFAULT 0,
                duration   INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE artist (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                name              TEXT NOT NULL UNIQUE,
                nb_albums         INTEGER NOT NULL DEFAULT 0,
                nb_tracks         INTEGER NOT NULL DEFAULT 0,
                nb_present_tracks INTEGER NOT NULL DEFAULT 0,
                thumbnail_id      INTEGER REFERENCES thumbnail(id) ON DELETE SET NULL
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE thumbnail (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                mrl      TEXT NOT NULL,
                origin   INTEGER NOT NULL,
                refcount INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE album (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                name              TEXT NOT NULL,
                album_artist_id   INTEGER REFERENCES artist(id) ON DELETE SET NULL,
                nb_tracks         INTEGER NOT NULL DEFAULT 0,
                nb_present_tracks INTEGER NOT NULL DEFAULT 0,
                nb_discs          INTEGER NOT NULL DEFAULT 1,
                release_year      INTEGER,
                thumbnail_id      INTEGER REFERENCES thumbnail(id) ON DELETE SET NULL
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE album_appearance (
                album_id  INTEGER NOT NULL REFERENCES album(id) ON DELETE CASCADE,
                artist_id INTEGER NOT NULL REFERENCES artist(id) ON DELETE CASCADE,
                PRIMARY KEY (album_id, artist_id)
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE genre (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                name              TEXT NOT NULL UNIQUE,
                nb_tracks         INTEGER NOT NULL DEFAULT 0,
                nb_present_tracks INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE media_group (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                name             TEXT NOT NULL,
                forced_singleton BOOLEAN NOT NULL DEFAULT 0,
                nb_media         INTEGER NOT NULL DEFAULT 0,
                nb_present_media INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE show (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                name                TEXT NOT NULL UNIQUE,
                release_date        DATETIME,
                thumbnail_id        INTEGER REFERENCES thumbnail(id) ON DELETE SET NULL,
                nb_episodes         INTEGER NOT NULL DEFAULT 0,
                nb_present_episodes INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE media (
                id                      INTEGER PRIMARY KEY AUTOINCREMENT,
                title                   TEXT NOT NULL,
                title_forced            BOOLEAN NOT NULL DEFAULT 0,
                media_type              INTEGER NOT NULL DEFAULT 0,
                media_sub_type          INTEGER NOT NULL DEFAULT 0,
                duration                INTEGER NOT NULL DEFAULT 0,
                play_count              INTEGER NOT NULL DEFAULT 0,
                last_position           REAL NOT NULL DEFAULT -1,
                last_time               INTEGER NOT NULL DEFAULT -1,
                last_played_date        DATETIME,
                insertion_date          DATETIME NOT NULL,
                release_date            DATETIME,
                favorite                BOOLEAN NOT NULL DEFAULT 0,
                is_discovered           BOOLEAN NOT NULL DEFAULT 0,
                is_external             BOOLEAN NOT NULL DEFAULT 0,
                is_stream               BOOLEAN NOT NULL DEFAULT 0,
                is_present              BOOLEAN NOT NULL DEFAULT 1,
                cache_type              INTEGER NOT NULL DEFAULT 0,
                cache_handled           BOOLEAN NOT NULL DEFAULT 0,
                group_id                INTEGER NOT NULL REFERENCES media_group(id) ON DELETE RESTRICT,
                folder_id               INTEGER REFERENCES folder(id) ON DELETE SET NULL
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE album_track (
                media_id      INTEGER PRIMARY KEY REFERENCES media(id) ON DELETE CASCADE,
                album_id      INTEGER NOT NULL REFERENCES album(id) ON DELETE CASCADE,
                artist_id     INTEGER REFERENCES artist(id) ON DELETE SET NULL,
                disc_number   INTEGER NOT NULL DEFAULT 1,
                track_number  INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE show_episode (
                media_id       INTEGER PRIMARY KEY REFERENCES media(id) ON DELETE CASCADE,
                show_id        INTEGER NOT NULL REFERENCES show(id) ON DELETE CASCADE,
                episode_number INTEGER NOT NULL DEFAULT 0,
                season_number  INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE media_genre (
                media_id INTEGER NOT NULL REFERENCES media(id) ON DELETE CASCADE,
                genre_id INTEGER NOT NULL REFERENCES genre(id) ON DELETE CASCADE,
                PRIMARY KEY (media_id, genre_id)
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE file (
                id                      INTEGER PRIMARY KEY AUTOINCREMENT,
                media_id                INTEGER NOT NULL REFERENCES media(id) ON DELETE CASCADE,
                mrl                     TEXT NOT NULL,
                file_type               INTEGER NOT NULL DEFAULT 0,
                linked_file_type        INTEGER NOT NULL DEFAULT 0,
                linked_file_id          INTEGER REFERENCES file(id) ON DELETE SET NULL,
                size                    INTEGER NOT NULL DEFAULT 0,
                last_modification_date  DATETIME NOT NULL,
                is_network              BOOLEAN NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE bookmark (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                media_id       INTEGER NOT NULL REFERENCES media(id) ON DELETE CASCADE,
                name           TEXT NOT NULL,
                description    TEXT,
                time           INTEGER NOT NULL,
                creation_date  DATETIME NOT NULL,
                UNIQUE(media_id, time)
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE chapter (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                media_id INTEGER NOT NULL REFERENCES media(id) ON DELETE CASCADE,
                name     TEXT,
                offset   INTEGER NOT NULL
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE playlist (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                name              TEXT NOT NULL,
                file_id           INTEGER REFERENCES file(id) ON DELETE SET NULL,
                creation_date     DATETIME NOT NULL,
                artist_id         INTEGER REFERENCES artist(id) ON DELETE SET NULL,
                nb_media          INTEGER NOT NULL DEFAULT 0,
                nb_present_media  INTEGER NOT NULL DEFAULT 0,
                nb_video          INTEGER NOT NULL DEFAULT 0,
                nb_audio          INTEGER NOT NULL DEFAULT 0,
                nb_unknown        INTEGER NOT NULL DEFAULT 0,
                duration          INTEGER NOT NULL DEFAULT 0,
                favorite          BOOLEAN NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE playlist_item (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                playlist_id INTEGER NOT NULL REFERENCES playlist(id) ON DELETE CASCADE,
                media_id    INTEGER REFERENCES media(id) ON DELETE CASCADE,
                mrl         TEXT,
                position    INTEGER NOT NULL,
                UNIQUE(playlist_id, position)
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE service (
                id                      INTEGER PRIMARY KEY AUTOINCREMENT,
                service_type            TEXT NOT NULL UNIQUE,
                auto_download           BOOLEAN NOT NULL DEFAULT 1,
                new_media_notification  BOOLEAN NOT NULL DEFAULT 1,
                max_cached_size         INTEGER NOT NULL DEFAULT -1,
                nb_media                INTEGER NOT NULL DEFAULT 0,
                nb_unplayed_media       INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        // `parent_id` forms the subscription forest (§3); a root
        // subscription's parent is NULL and its quota/notification
        // settings fall back to the Service when left at -1/inherit.
        db.execute_unprepared(
            "CREATE TABLE subscription (
                id                      INTEGER PRIMARY KEY AUTOINCREMENT,
                service_id              INTEGER NOT NULL REFERENCES service(id) ON DELETE CASCADE,
                parent_id               INTEGER REFERENCES subscription(id) ON DELETE CASCADE,
                playlist_id             INTEGER NOT NULL REFERENCES playlist(id) ON DELETE CASCADE,
                name                    TEXT NOT NULL,
                cached_size             INTEGER NOT NULL DEFAULT 0,
                max_cached_media        INTEGER NOT NULL DEFAULT -1,
                max_cached_size         INTEGER NOT NULL DEFAULT -1,
                new_media_notification  INTEGER NOT NULL DEFAULT 0,
                nb_unplayed_media       INTEGER NOT NULL DEFAULT 0,
                nb_media                INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE task (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                media_id        INTEGER REFERENCES media(id) ON DELETE CASCADE,
                file_id         INTEGER REFERENCES file(id) ON DELETE CASCADE,
                completed_steps INTEGER NOT NULL DEFAULT 0,
                retry_count     INTEGER NOT NULL DEFAULT 0,
                status          INTEGER NOT NULL DEFAULT 0
            );",
        )
        .await?;

        db.execute_unprepared("CREATE INDEX idx_media_folder_id ON media(folder_id);")
            .await?;
        db.execute_unprepared("CREATE INDEX idx_media_group_id ON media(group_id);")
            .await?;
        db.execute_unprepared("CREATE INDEX idx_file_media_id ON file(media_id);")
            .await?;
        db.execute_unprepared("CREATE INDEX idx_folder_device_id ON folder(device_id);")
            .await?;
        db.execute_unprepared("CREATE INDEX idx_folder_parent_id ON folder(parent_id);")
            .await?;
        db.execute_unprepared(
            "CREATE INDEX idx_playlist_item_playlist_id ON playlist_item(playlist_id);",
        )
        .await?;
        db.execute_unprepared(
            "CREATE INDEX idx_playlist_item_media_id ON playlist_item(media_id);",
        )
        .await?;
        db.execute_unprepared("CREATE INDEX idx_subscription_service_id ON subscription(service_id);")
            .await?;
        db.execute_unprepared("CREATE INDEX idx_subscription_parent_id ON subscription(parent_id);")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in [
            "task",
            "subscription",
            "service",
            "playlist_item",
            "playlist",
            "chapter",
            "bookmark",
            "file",
            "media_genre",
            "show_episode",
            "album_track",
            "media",
            "show",
            "media_group",
            "genre",
            "album_appearance",
            "album",
            "thumbnail",
            "artist",
            "folder",
            "device_mountpoint",
            "device",
            "settings",
        ] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {table};"))
                .await?;
        }
        Ok(())
    }
}
