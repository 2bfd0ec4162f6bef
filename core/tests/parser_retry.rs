//! Scenario: a service that always reports `TemporaryUnavailable` runs a
//! task past the retry cap (§4.4, `MAX_RETRY_COUNT` = 3), landing it in
//! `Fatal`. `force_parser_retry` then gives it a fresh attempt.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use medialib_core::parser::{ParserService, ServiceName};
use medialib_core::MediaLibrary;
use medialib_entity::sea_orm_active_enums::TaskStatus;
use medialib_entity::task;
use medialib_errors::ParserError;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

struct AlwaysUnavailable {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ParserService for AlwaysUnavailable {
    fn name(&self) -> ServiceName {
        ServiceName::MetadataExtraction
    }

    async fn run(&self, _media_id: i32, _file_id: i32) -> Result<TaskStatus, ParserError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TaskStatus::TemporaryUnavailable)
    }
}

async fn task_status_for(db: &DatabaseConnection, media_id: i32) -> Option<TaskStatus> {
    task::Entity::find()
        .filter(task::Column::MediaId.eq(Some(media_id)))
        .one(db)
        .await
        .unwrap()
        .map(|row| row.status)
}

async fn wait_until(db: &DatabaseConnection, media_id: i32, target: TaskStatus) {
    for _ in 0..200 {
        if task_status_for(db, media_id).await == Some(target) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("task for media {media_id} never reached {target:?} within the test's wait budget");
}

#[tokio::test]
async fn task_reaches_fatal_after_the_retry_cap_then_force_retry_requeues_it() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    let config = common::test_config(dir.path());
    let services: Vec<Arc<dyn ParserService>> = vec![Arc::new(AlwaysUnavailable { calls: calls.clone() })];
    let (library, _outcome) = MediaLibrary::initialize(config, services, None).await.unwrap();
    let db = common::connect_raw(dir.path()).await;

    let media_id = library
        .add_external_media("file:///music/flaky.flac", "Flaky", false)
        .await
        .unwrap();

    wait_until(&db, media_id, TaskStatus::Fatal).await;
    assert!(calls.load(Ordering::SeqCst) >= 3, "should have exhausted MAX_RETRY_COUNT attempts");

    let requeued = library.force_parser_retry().await.unwrap();
    assert_eq!(requeued, 1);

    // The service still always fails, so it runs straight back to Fatal —
    // but only after its retry_count was reset to 0 by force_parser_retry.
    let calls_before_retry = calls.load(Ordering::SeqCst);
    wait_until(&db, media_id, TaskStatus::Fatal).await;
    assert!(calls.load(Ordering::SeqCst) > calls_before_retry, "retry should have run the service again");

    library.shutdown().await;
}
