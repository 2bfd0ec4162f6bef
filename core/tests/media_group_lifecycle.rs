//! Covers two invariants from the trigger migration (§4.6): an album with
//! no remaining tracks is garbage-collected, and a forced-singleton
//! `MediaGroup` survives even once its one member is gone.

mod common;

use medialib_entity::sea_orm_active_enums::ThumbnailOrigin;
use medialib_entity::{album, album_track, thumbnail};
use sea_orm::EntityTrait;
use sea_orm::ActiveValue::Set;

#[tokio::test]
async fn album_is_deleted_once_its_last_track_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(dir.path()).await;
    let db = common::connect_raw(dir.path()).await;

    let media_id = library
        .add_external_media("file:///music/one.flac", "One", false)
        .await
        .unwrap();

    let album_active = album::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set("Test Album".to_string()),
        album_artist_id: Set(None),
        nb_tracks: Set(0),
        nb_present_tracks: Set(0),
        nb_discs: Set(1),
        release_year: Set(None),
        thumbnail_id: Set(None),
    };
    let album_id = album::Entity::insert(album_active)
        .exec(&db)
        .await
        .unwrap()
        .last_insert_id;

    let track_active = album_track::ActiveModel {
        media_id: Set(media_id),
        album_id: Set(album_id),
        artist_id: Set(None),
        disc_number: Set(1),
        track_number: Set(1),
    };
    album_track::Entity::insert(track_active).exec(&db).await.unwrap();

    let row = album::Entity::find_by_id(album_id).one(&db).await.unwrap().unwrap();
    assert_eq!(row.nb_tracks, 1, "trg_album_track_insert should bump nb_tracks");

    album_track::Entity::delete_by_id(media_id).exec(&db).await.unwrap();

    let row = album::Entity::find_by_id(album_id).one(&db).await.unwrap();
    assert!(
        row.is_none(),
        "trg_album_track_delete should garbage-collect the album once nb_tracks <= 0"
    );
}

#[tokio::test]
async fn forced_singleton_group_survives_its_member_being_removed() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(dir.path()).await;

    let media_id = library
        .add_external_media("file:///music/solo.flac", "Solo", false)
        .await
        .unwrap();

    let groups = library.media_groups().await.unwrap();
    let group = groups
        .iter()
        .find(|g| g.nb_media == 1)
        .expect("add_external_media should have created its forced-singleton group");
    assert!(group.forced_singleton);
    let group_id = group.id;

    library.remove_external_media(media_id).await.unwrap();

    let groups = library.media_groups().await.unwrap();
    let group = groups
        .iter()
        .find(|g| g.id == group_id)
        .expect("a forced-singleton group must not be auto-deleted when it empties out");
    assert_eq!(group.nb_media, 0);
    assert_eq!(group.nb_present_media, 0);
}

#[tokio::test]
async fn non_singleton_group_is_garbage_collected_when_its_last_member_leaves() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(dir.path()).await;
    let db = common::connect_raw(dir.path()).await;

    let group_id = library.create_media_group("Ungrouped").await.unwrap();
    // Move the singleton member created alongside a fresh external media
    // into this shared, non-forced group so its own group disappears and
    // we can observe this one surviving past it.
    let media_id = library
        .add_external_media("file:///music/shared.flac", "Shared", false)
        .await
        .unwrap();

    use medialib_entity::media;
    let row = media::Entity::find_by_id(media_id).one(&db).await.unwrap().unwrap();
    let mut active: media::ActiveModel = row.into();
    active.group_id = Set(group_id);
    media::Entity::update(active).exec(&db).await.unwrap();

    library.remove_external_media(media_id).await.unwrap();

    use medialib_entity::media_group;
    let group = media_group::Entity::find_by_id(group_id).one(&db).await.unwrap();
    assert!(
        group.is_none(),
        "a non-singleton group with no members left should be deleted by trg_media_group_delete"
    );
}

#[tokio::test]
async fn forced_singleton_round_trips_through_create_rename_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(dir.path()).await;
    let db = common::connect_raw(dir.path()).await;

    let shared_group_id = library.create_media_group("Compilation").await.unwrap();
    let media_id = library
        .add_external_media("file:///music/track.flac", "Track One", false)
        .await
        .unwrap();

    use medialib_entity::{media, media_group};

    // Move straight into the shared group: its own forced singleton
    // disappears (caller discarded it, nothing left to rename/readd to).
    library.move_media_to_group(media_id, shared_group_id).await.unwrap();

    // Pulling it back out creates a fresh forced singleton named after it.
    let singleton_id = library.remove_media_from_group(media_id).await.unwrap();
    let singleton = media_group::Entity::find_by_id(singleton_id)
        .one(&db)
        .await
        .unwrap()
        .expect("remove_media_from_group must create a singleton");
    assert!(singleton.forced_singleton);
    assert_eq!(singleton.name, "Track One");
    assert_eq!(singleton.nb_media, 1);

    // A title change renames the singleton (trg_media_group_singleton_rename).
    let row = media::Entity::find_by_id(media_id).one(&db).await.unwrap().unwrap();
    let mut active: media::ActiveModel = row.into();
    active.title = Set("Track One (Remastered)".to_string());
    media::Entity::update(active).exec(&db).await.unwrap();

    let singleton = media_group::Entity::find_by_id(singleton_id).one(&db).await.unwrap().unwrap();
    assert_eq!(singleton.name, "Track One (Remastered)");

    // Re-adding it elsewhere deletes the now-empty forced singleton.
    library.move_media_to_group(media_id, shared_group_id).await.unwrap();
    let singleton = media_group::Entity::find_by_id(singleton_id).one(&db).await.unwrap();
    assert!(
        singleton.is_none(),
        "move_media_to_group should delete a forced singleton once it empties on re-add"
    );

    let shared = media_group::Entity::find_by_id(shared_group_id).one(&db).await.unwrap().unwrap();
    assert_eq!(shared.nb_media, 1);
}

#[tokio::test]
async fn thumbnail_refcount_reaches_zero_and_row_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let (_library, _outcome) = common::init_library(dir.path()).await;
    let db = common::connect_raw(dir.path()).await;

    let thumb_active = thumbnail::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        mrl: Set("file:///thumbs/album1.jpg".to_string()),
        origin: Set(ThumbnailOrigin::Album),
        refcount: Set(0),
    };
    let thumb_id = thumbnail::Entity::insert(thumb_active)
        .exec(&db)
        .await
        .unwrap()
        .last_insert_id;

    let album_active = album::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set("Thumbed Album".to_string()),
        album_artist_id: Set(None),
        nb_tracks: Set(0),
        nb_present_tracks: Set(0),
        nb_discs: Set(1),
        release_year: Set(None),
        thumbnail_id: Set(Some(thumb_id)),
    };
    let album_id = album::Entity::insert(album_active)
        .exec(&db)
        .await
        .unwrap()
        .last_insert_id;

    let thumb = thumbnail::Entity::find_by_id(thumb_id).one(&db).await.unwrap().unwrap();
    assert_eq!(thumb.refcount, 1, "trg_album_thumb_insert should bump refcount");

    album::Entity::delete_by_id(album_id).exec(&db).await.unwrap();

    let thumb = thumbnail::Entity::find_by_id(thumb_id).one(&db).await.unwrap();
    assert!(
        thumb.is_none(),
        "trg_album_thumb_delete should drop the thumbnail once refcount hits zero"
    );
}
