use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Hand-written trigger SQL for the bookkeeping sea-orm's schema builder
/// can't express (§4.6). Application code never writes the derived
/// counter/presence columns these maintain.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Folder per-type counters track media inserted/removed/reclassified
        // under that folder.
        db.execute_unprepared(
            "CREATE TRIGGER trg_folder_media_insert AFTER INSERT ON media
             WHEN NEW.folder_id IS NOT NULL
             BEGIN
                UPDATE folder SET
                    nb_video   = nb_video   + (NEW.media_type = 1),
                    nb_audio   = nb_audio   + (NEW.media_type = 2),
                    nb_unknown = nb_unknown + (NEW.media_type = 0),
                    duration   = duration + NEW.duration
                WHERE id = NEW.folder_id;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_folder_media_delete AFTER DELETE ON media
             WHEN OLD.folder_id IS NOT NULL
             BEGIN
                UPDATE folder SET
                    nb_video   = nb_video   - (OLD.media_type = 1),
                    nb_audio   = nb_audio   - (OLD.media_type = 2),
                    nb_unknown = nb_unknown - (OLD.media_type = 0),
                    duration   = duration - OLD.duration
                WHERE id = OLD.folder_id;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_folder_media_update AFTER UPDATE OF media_type, duration, folder_id ON media
             BEGIN
                UPDATE folder SET
                    nb_video   = nb_video   - (OLD.media_type = 1) + (NEW.media_type = 1 AND NEW.folder_id = OLD.folder_id),
                    nb_audio   = nb_audio   - (OLD.media_type = 2) + (NEW.media_type = 2 AND NEW.folder_id = OLD.folder_id),
                    nb_unknown = nb_unknown - (OLD.media_type = 0) + (NEW.media_type = 0 AND NEW.folder_id = OLD.folder_id),
                    duration   = duration - OLD.duration + (CASE WHEN NEW.folder_id = OLD.folder_id THEN NEW.duration ELSE 0 END)
                WHERE id = OLD.folder_id AND OLD.folder_id IS NOT NULL;
                UPDATE folder SET
                    nb_video   = nb_video   + (NEW.media_type = 1),
                    nb_audio   = nb_audio   + (NEW.media_type = 2),
                    nb_unknown = nb_unknown + (NEW.media_type = 0),
                    duration   = duration + NEW.duration
                WHERE id = NEW.folder_id AND NEW.folder_id IS NOT NULL AND NEW.folder_id != OLD.folder_id;
             END;",
        )
        .await?;

        // MediaGroup membership counters.
        db.execute_unprepared(
            "CREATE TRIGGER trg_media_group_insert AFTER INSERT ON media
             BEGIN
                UPDATE media_group SET
                    nb_media = nb_media + 1,
                    nb_present_media = nb_present_media + (NEW.is_present = 1)
                WHERE id = NEW.group_id;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_media_group_delete AFTER DELETE ON media
             BEGIN
                UPDATE media_group SET
                    nb_media = nb_media - 1,
                    nb_present_media = nb_present_media - (OLD.is_present = 1)
                WHERE id = OLD.group_id;
                DELETE FROM media_group
                WHERE id = OLD.group_id AND forced_singleton = 0 AND nb_media <= 0;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_media_group_update AFTER UPDATE OF group_id, is_present ON media
             BEGIN
                UPDATE media_group SET
                    nb_media = nb_media - 1,
                    nb_present_media = nb_present_media - (OLD.is_present = 1)
                WHERE id = OLD.group_id AND NEW.group_id != OLD.group_id;
                UPDATE media_group SET
                    nb_media = nb_media + 1,
                    nb_present_media = nb_present_media + (NEW.is_present = 1)
                WHERE id = NEW.group_id AND NEW.group_id != OLD.group_id;
                UPDATE media_group SET
                    nb_present_media = nb_present_media + (NEW.is_present = 1) - (OLD.is_present = 1)
                WHERE id = NEW.group_id AND NEW.group_id = OLD.group_id;
                DELETE FROM media_group
                WHERE id = OLD.group_id AND forced_singleton = 0 AND nb_media <= 0;
             END;",
        )
        .await?;

        // Device/folder presence propagates down to media; is_present is
        // forced true for external and stream media regardless of folder.
        db.execute_unprepared(
            "CREATE TRIGGER trg_device_presence AFTER UPDATE OF present ON device
             BEGIN
                UPDATE media SET is_present = NEW.present
                WHERE is_external = 0 AND is_stream = 0
                  AND folder_id IN (SELECT id FROM folder WHERE device_id = NEW.id);
             END;",
        )
        .await?;

        // Playlist per-type present-media counters.
        db.execute_unprepared(
            "CREATE TRIGGER trg_playlist_item_insert AFTER INSERT ON playlist_item
             WHEN NEW.media_id IS NOT NULL
             BEGIN
                UPDATE playlist SET
                    nb_media = nb_media + 1,
                    nb_present_media = nb_present_media +
                        (SELECT is_present FROM media WHERE id = NEW.media_id),
                    nb_video = nb_video +
                        (SELECT media_type = 1 FROM media WHERE id = NEW.media_id),
                    nb_audio = nb_audio +
                        (SELECT media_type = 2 FROM media WHERE id = NEW.media_id),
                    nb_unknown = nb_unknown +
                        (SELECT media_type = 0 FROM media WHERE id = NEW.media_id),
                    duration = duration +
                        (SELECT duration FROM media WHERE id = NEW.media_id)
                WHERE id = NEW.playlist_id;
             END;",
        )
        .await?;

        // Guarded to skip rows whose media was deleted in the same
        // statement (FK cascade from `media`): by the time this fires the
        // join target is already gone, so that case is instead handled by
        // trg_playlist_item_media_delete below, fired BEFORE the cascade.
        db.execute_unprepared(
            "CREATE TRIGGER trg_playlist_item_delete AFTER DELETE ON playlist_item
             WHEN OLD.media_id IS NOT NULL AND EXISTS (SELECT 1 FROM media WHERE id = OLD.media_id)
             BEGIN
                UPDATE playlist SET
                    nb_media = nb_media - 1,
                    nb_present_media = nb_present_media -
                        (SELECT is_present FROM media WHERE id = OLD.media_id),
                    nb_video = nb_video -
                        (SELECT media_type = 1 FROM media WHERE id = OLD.media_id),
                    nb_audio = nb_audio -
                        (SELECT media_type = 2 FROM media WHERE id = OLD.media_id),
                    nb_unknown = nb_unknown -
                        (SELECT media_type = 0 FROM media WHERE id = OLD.media_id),
                    duration = duration -
                        (SELECT duration FROM media WHERE id = OLD.media_id)
                WHERE id = OLD.playlist_id;
             END;",
        )
        .await?;

        // Captures OLD.* before the media row (and its cascaded
        // playlist_item rows) disappear, mirrored on original_source's own
        // DecrementUnplayedMediaOnDestroy trigger for the same reason: once
        // cascade has run there is nothing left to join back to.
        db.execute_unprepared(
            "CREATE TRIGGER trg_playlist_item_media_delete BEFORE DELETE ON media
             BEGIN
                UPDATE playlist SET
                    nb_media = nb_media -
                        (SELECT COUNT(*) FROM playlist_item WHERE media_id = OLD.id AND playlist_id = playlist.id),
                    nb_present_media = nb_present_media -
                        (SELECT COUNT(*) FROM playlist_item WHERE media_id = OLD.id AND playlist_id = playlist.id) * OLD.is_present,
                    nb_video = nb_video -
                        (SELECT COUNT(*) FROM playlist_item WHERE media_id = OLD.id AND playlist_id = playlist.id) * (OLD.media_type = 1),
                    nb_audio = nb_audio -
                        (SELECT COUNT(*) FROM playlist_item WHERE media_id = OLD.id AND playlist_id = playlist.id) * (OLD.media_type = 2),
                    nb_unknown = nb_unknown -
                        (SELECT COUNT(*) FROM playlist_item WHERE media_id = OLD.id AND playlist_id = playlist.id) * (OLD.media_type = 0),
                    duration = duration -
                        (SELECT COUNT(*) FROM playlist_item WHERE media_id = OLD.id AND playlist_id = playlist.id) * OLD.duration
                WHERE id IN (SELECT DISTINCT playlist_id FROM playlist_item WHERE media_id = OLD.id);
             END;",
        )
        .await?;

        // Propagates is_present toggles (e.g. trg_device_presence flipping
        // media on unmount) into playlist present-media counters.
        db.execute_unprepared(
            "CREATE TRIGGER trg_playlist_presence_update AFTER UPDATE OF is_present ON media
             WHEN NEW.is_present != OLD.is_present
             BEGIN
                UPDATE playlist SET
                    nb_present_media = nb_present_media +
                        (NEW.is_present - OLD.is_present) *
                        (SELECT COUNT(*) FROM playlist_item WHERE media_id = NEW.id AND playlist_id = playlist.id)
                WHERE id IN (SELECT DISTINCT playlist_id FROM playlist_item WHERE media_id = NEW.id);
             END;",
        )
        .await?;

        // Keeps a forced singleton's display name tracking its one media's
        // title (§4.6/§8 scenario 4).
        db.execute_unprepared(
            "CREATE TRIGGER trg_media_group_singleton_rename AFTER UPDATE OF title ON media
             WHEN NEW.title != OLD.title
               AND (SELECT forced_singleton FROM media_group WHERE id = NEW.group_id) = 1
             BEGIN
                UPDATE media_group SET name = NEW.title WHERE id = NEW.group_id;
             END;",
        )
        .await?;

        // Thumbnail refcount lifecycle: each owning table increments on
        // insert/update and decrements on delete/update-away; refcount 0
        // rows are removed.
        for (table, column) in [
            ("artist", "thumbnail_id"),
            ("album", "thumbnail_id"),
            ("show", "thumbnail_id"),
        ] {
            db.execute_unprepared(&format!(
                "CREATE TRIGGER trg_{table}_thumb_insert AFTER INSERT ON {table}
                 WHEN NEW.{column} IS NOT NULL
                 BEGIN
                    UPDATE thumbnail SET refcount = refcount + 1 WHERE id = NEW.{column};
                 END;"
            ))
            .await?;

            db.execute_unprepared(&format!(
                "CREATE TRIGGER trg_{table}_thumb_update AFTER UPDATE OF {column} ON {table}
                 BEGIN
                    UPDATE thumbnail SET refcount = refcount - 1
                    WHERE id = OLD.{column} AND OLD.{column} IS NOT NULL AND OLD.{column} != IFNULL(NEW.{column}, -1);
                    UPDATE thumbnail SET refcount = refcount + 1
                    WHERE id = NEW.{column} AND NEW.{column} IS NOT NULL AND NEW.{column} != IFNULL(OLD.{column}, -1);
                    DELETE FROM thumbnail WHERE refcount <= 0;
                 END;"
            ))
            .await?;

            db.execute_unprepared(&format!(
                "CREATE TRIGGER trg_{table}_thumb_delete AFTER DELETE ON {table}
                 WHEN OLD.{column} IS NOT NULL
                 BEGIN
                    UPDATE thumbnail SET refcount = refcount - 1 WHERE id = OLD.{column};
                    DELETE FROM thumbnail WHERE id = OLD.{column} AND refcount <= 0;
                 END;"
            ))
            .await?;
        }

        // Empty album/artist/show garbage collection once their last track
        // or episode is gone.
        db.execute_unprepared(
            "CREATE TRIGGER trg_album_track_delete AFTER DELETE ON album_track
             BEGIN
                UPDATE album SET nb_tracks = nb_tracks - 1 WHERE id = OLD.album_id;
                DELETE FROM album WHERE id = OLD.album_id AND nb_tracks <= 0;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_album_track_insert AFTER INSERT ON album_track
             BEGIN
                UPDATE album SET nb_tracks = nb_tracks + 1 WHERE id = NEW.album_id;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_show_episode_delete AFTER DELETE ON show_episode
             BEGIN
                UPDATE show SET nb_episodes = nb_episodes - 1 WHERE id = OLD.show_id;
                DELETE FROM show WHERE id = OLD.show_id AND nb_episodes <= 0;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_show_episode_insert AFTER INSERT ON show_episode
             BEGIN
                UPDATE show SET nb_episodes = nb_episodes + 1 WHERE id = NEW.show_id;
             END;",
        )
        .await?;

        // Genre track counters.
        db.execute_unprepared(
            "CREATE TRIGGER trg_media_genre_insert AFTER INSERT ON media_genre
             BEGIN
                UPDATE genre SET
                    nb_tracks = nb_tracks + 1,
                    nb_present_tracks = nb_present_tracks +
                        (SELECT is_present FROM media WHERE id = NEW.media_id)
                WHERE id = NEW.genre_id;
             END;",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TRIGGER trg_media_genre_delete AFTER DELETE ON media_genre
             BEGIN
                UPDATE genre SET nb_tracks = nb_tracks - 1 WHERE id = OLD.genre_id;
             END;",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for trigger in [
            "trg_folder_media_insert",
            "trg_folder_media_delete",
            "trg_folder_media_update",
            "trg_media_group_insert",
            "trg_media_group_delete",
            "trg_media_group_update",
            "trg_device_presence",
            "trg_playlist_item_insert",
            "trg_playlist_item_delete",
            "trg_playlist_item_media_delete",
            "trg_playlist_presence_update",
            "trg_media_group_singleton_rename",
            "trg_artist_thumb_insert",
            "trg_artist_thumb_update",
            "trg_artist_thumb_delete",
            "trg_album_thumb_insert",
            "trg_album_thumb_update",
            "trg_album_thumb_delete",
            "trg_show_thumb_insert",
            "trg_show_thumb_update",
            "trg_show_thumb_delete",
            "trg_album_track_delete",
            "trg_album_track_insert",
            "trg_show_episode_delete",
            "trg_show_episode_insert",
            "trg_media_genre_insert",
            "trg_media_genre_delete",
        ] {
            db.execute_unprepared(&format!("DROP TRIGGER IF EXISTS {trigger};"))
                .await?;
        }
        Ok(())
    }
}
