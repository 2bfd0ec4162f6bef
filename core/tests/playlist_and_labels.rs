//! Playlist renumbering via `move_playlist_item` (§6 `move`), the genre
//! track-count triggers, and the label-as-genre alias decision recorded in
//! DESIGN.md.

mod common;

use medialib_entity::media_genre;
use sea_orm::{ActiveValue::Set, EntityTrait};

async fn ordered_media_ids(db: &sea_orm::DatabaseConnection, playlist_id: i32) -> Vec<i32> {
    use medialib_entity::playlist_item;
    use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};
    playlist_item::Entity::find()
        .filter(playlist_item::Column::PlaylistId.eq(playlist_id))
        .order_by_asc(playlist_item::Column::Position)
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.media_id.unwrap())
        .collect()
}

#[tokio::test]
async fn move_playlist_item_keeps_a_dense_zero_based_ordering() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(dir.path()).await;

    let playlist_id = library.create_playlist("Favorites").await.unwrap();
    let mut media_ids = Vec::new();
    for i in 0..4 {
        let id = library
            .add_external_media(&format!("file:///music/track{i}.flac"), &format!("Track {i}"), false)
            .await
            .unwrap();
        media_ids.push(id);
        library.append_to_playlist(playlist_id, id).await.unwrap();
    }

    let db = common::connect_raw(dir.path()).await;
    assert_eq!(ordered_media_ids(&db, playlist_id).await, media_ids);

    // Move the item at position 0 to position 2: [0,1,2,3] -> [1,2,0,3].
    library.move_playlist_item(playlist_id, 0, 2).await.unwrap();
    let expected = vec![media_ids[1], media_ids[2], media_ids[0], media_ids[3]];
    assert_eq!(ordered_media_ids(&db, playlist_id).await, expected);

    // Positions must remain a dense 0..n run with no gaps or duplicates.
    use medialib_entity::playlist_item;
    use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};
    let mut positions: Vec<i32> = playlist_item::Entity::find()
        .filter(playlist_item::Column::PlaylistId.eq(playlist_id))
        .order_by_asc(playlist_item::Column::Position)
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.position)
        .collect();
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn label_create_and_delete_alias_the_genre_table() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(dir.path()).await;

    let label_id = library.create_label("Live Recording").await.unwrap();
    let genres = library.genres().await.unwrap();
    assert!(genres.iter().any(|g| g.id == label_id && g.name == "Live Recording"));

    library.delete_label(label_id).await.unwrap();
    let genres = library.genres().await.unwrap();
    assert!(!genres.iter().any(|g| g.id == label_id));
}

#[tokio::test]
async fn genre_track_counter_follows_media_genre_membership() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(dir.path()).await;
    let db = common::connect_raw(dir.path()).await;

    let genre_id = library.create_label("Ambient").await.unwrap();
    let media_id = library
        .add_external_media("file:///music/drift.flac", "Drift", false)
        .await
        .unwrap();

    let link = media_genre::ActiveModel {
        media_id: Set(media_id),
        genre_id: Set(genre_id),
    };
    media_genre::Entity::insert(link).exec(&db).await.unwrap();

    let genres = library.genres().await.unwrap();
    let genre = genres.iter().find(|g| g.id == genre_id).unwrap();
    assert_eq!(genre.nb_tracks, 1, "trg_media_genre_insert should bump nb_tracks");
    assert_eq!(genre.nb_present_tracks, 1, "external media is always present");

    media_genre::Entity::delete_by_id((media_id, genre_id)).exec(&db).await.unwrap();
    let genres = library.genres().await.unwrap();
    let genre = genres.iter().find(|g| g.id == genre_id).unwrap();
    assert_eq!(genre.nb_tracks, 0, "trg_media_genre_delete should decrement nb_tracks");
}
