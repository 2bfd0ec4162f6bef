//! Scenario: a removable device is unmounted and later remounted at a
//! different path. Its `(uuid, scheme)` identity — and therefore every
//! `folder`/`media` row hung off it — must survive the round trip.

mod common;

use medialib_core::device_registry::DeviceRegistry;
use medialib_core::storage;
use uuid::Uuid;

#[tokio::test]
async fn removable_device_preserves_identity_across_unmount_remount() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());
    let (db, _outcome) = storage::open(&config.db_path).await.unwrap();

    let registry = DeviceRegistry::load(db.clone()).await.unwrap();
    let uuid = Uuid::new_v4();

    registry
        .on_device_mounted(uuid, "file", "file:///mnt/usb1", true)
        .await
        .unwrap();
    let (resolved_uuid, scheme, relative) = registry
        .from_mountpoint("file:///mnt/usb1/music/track.mp3")
        .await
        .unwrap();
    assert_eq!(resolved_uuid, uuid);
    assert_eq!(scheme, "file");
    assert_eq!(relative, "music/track.mp3");

    registry
        .on_device_unmounted(uuid, "file", "file:///mnt/usb1")
        .await
        .unwrap();
    assert!(registry
        .from_mountpoint("file:///mnt/usb1/music/track.mp3")
        .await
        .is_err());

    registry
        .on_device_mounted(uuid, "file", "file:///mnt/usb2", true)
        .await
        .unwrap();

    // Reload from scratch (simulating a process restart) to confirm the
    // identity was actually persisted, not just cached in memory.
    let reloaded = DeviceRegistry::load(db).await.unwrap();
    let (resolved_uuid, _, relative) = reloaded
        .from_mountpoint("file:///mnt/usb2/movies/film.mkv")
        .await
        .unwrap();
    assert_eq!(resolved_uuid, uuid);
    assert_eq!(relative, "movies/film.mkv");
}
