//! Discovers a real directory tree through the public Facade and checks
//! the universal invariants of §8 that follow from discovery: folder
//! per-type counters sum to the media actually filed under them, and every
//! media's `group_id` points at a group that exists.

mod common;

use std::fs::{self, File};

use medialib_core::device_registry::{DeviceDescriptor, DeviceLister};
use uuid::Uuid;

struct StaticLister(DeviceDescriptor);

impl DeviceLister for StaticLister {
    fn list(&self) -> Vec<DeviceDescriptor> {
        vec![self.0.clone()]
    }
}

#[tokio::test]
async fn discover_populates_folder_counters_and_group_references() {
    let workdir = tempfile::tempdir().unwrap();
    let media_root = workdir.path().join("media_root");
    fs::create_dir_all(media_root.join("album1")).unwrap();
    File::create(media_root.join("album1/track1.mp3")).unwrap();
    File::create(media_root.join("album1/track2.flac")).unwrap();
    File::create(media_root.join("album1/poster.jpg")).unwrap(); // not a media extension
    File::create(media_root.join("movie.mkv")).unwrap();

    let db_dir = tempfile::tempdir().unwrap();
    let (library, _outcome) = common::init_library(db_dir.path()).await;

    let root_mrl = format!("file://{}", media_root.display());
    let descriptor = DeviceDescriptor {
        uuid: Uuid::new_v4(),
        scheme: "file".to_string(),
        mountpoint: root_mrl.clone(),
        removable: false,
    };
    library.set_device_lister(std::sync::Arc::new(StaticLister(descriptor)));
    library.refresh_devices().await.unwrap();

    let visited = library.discover(&root_mrl).await.unwrap();
    assert_eq!(visited, 4, "every file under the root should be visited, including the skipped poster");

    let folders = library.folders().await.unwrap();
    assert_eq!(folders.len(), 2, "root + album1 subdirectory");

    for folder in &folders {
        let expected = folder.nb_video + folder.nb_audio + folder.nb_unknown;
        let query = medialib_core::query::QueryParameters {
            include_missing: true,
            ..Default::default()
        };
        let in_folder = library
            .media(query)
            .all()
            .await
            .unwrap()
            .into_iter()
            .filter(|m| m.folder_id == Some(folder.id))
            .count() as i32;
        assert_eq!(
            expected, in_folder,
            "folder {}'s per-type counters must sum to its actual media count",
            folder.mrl
        );
    }

    let groups = library.media_groups().await.unwrap();
    let group_ids: std::collections::HashSet<_> = groups.iter().map(|g| g.id).collect();
    let query = medialib_core::query::QueryParameters {
        include_missing: true,
        ..Default::default()
    };
    for media in library.media(query).all().await.unwrap() {
        assert!(
            group_ids.contains(&media.group_id),
            "media {} references a group_id that does not exist",
            media.id
        );
    }
}
