//! The Parser Pipeline (§4.4/§4.5): three named services behind FIFO
//! queues built on `medialib_task_system`, each advancing a task's
//! step-bitmap and persisting `Task`/`Media` state transitions.

mod service;
mod task_impl;

pub use service::{ParserService, ServiceName};
pub use task_impl::ParseTask;

use std::sync::Arc;

use medialib_entity::sea_orm_active_enums::{ParserStep, TaskStatus};
use medialib_entity::task as task_entity;
use medialib_errors::ParserError;
use medialib_task_system::{BaseTaskDispatcher, TaskDispatcher};
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::{info, instrument, warn};

use crate::callbacks::Callbacks;

/// Max retry attempts before a task is promoted to `Fatal` (§4.4, decided:
/// 3, matching VLC medialibrary's `Parser::MAX_RETRY_COUNT`).
pub const MAX_RETRY_COUNT: i32 = 3;

pub struct ParserPipeline {
    db: DatabaseConnection,
    dispatcher: BaseTaskDispatcher<ParserError>,
    services: Arc<tokio::sync::RwLock<Vec<Arc<dyn ParserService>>>>,
}

impl ParserPipeline {
    pub fn new(db: DatabaseConnection, worker_count: usize, services: Vec<Arc<dyn ParserService>>) -> Self {
        Self {
            db,
            dispatcher: BaseTaskDispatcher::new(worker_count),
            services: Arc::new(tokio::sync::RwLock::new(services)),
        }
    }

    /// Registers an additional parser service, picked up by every task
    /// started after this call (§6 `add_parser_service`); tasks already
    /// mid-run keep the service snapshot they were dispatched with.
    pub async fn add_service(&self, service: Arc<dyn ParserService>) {
        self.services.write().await.push(service);
    }

    /// Enqueues a parse task for a freshly discovered (or refreshed)
    /// media/file pair, creating its persisted `Task` row.
    #[instrument(skip(self, callbacks))]
    pub async fn enqueue(
        &self,
        media_id: i32,
        file_id: i32,
        callbacks: Arc<dyn Callbacks>,
    ) -> Result<(), ParserError> {
        let active = task_entity::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            media_id: Set(Some(media_id)),
            file_id: Set(Some(file_id)),
            completed_steps: Set(0),
            retry_count: Set(0),
            status: Set(TaskStatus::Unknown),
        };
        let inserted = task_entity::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| ParserError::TaskSystem(e.to_string()))?;

        let task = ParseTask::new(
            inserted.last_insert_id,
            media_id,
            file_id,
            self.db.clone(),
            Arc::clone(&self.services),
            callbacks,
        );
        self.dispatcher
            .try_dispatch(Box::new(task))
            .await
            .map_err(|e| ParserError::TaskSystem(e.to_string()))?;
        Ok(())
    }

    /// Re-enqueues every task currently `Fatal` or below its retry cap,
    /// resetting its status so the pipeline gives it another pass.
    #[instrument(skip(self, callbacks))]
    pub async fn force_retry(&self, callbacks: Arc<dyn Callbacks>) -> Result<usize, ParserError> {
        use sea_orm::{ColumnTrait, QueryFilter};

        let rows = task_entity::Entity::find()
            .filter(task_entity::Column::Status.eq(TaskStatus::Fatal))
            .all(&self.db)
            .await
            .map_err(|e| ParserError::TaskSystem(e.to_string()))?;

        let count = rows.len();
        for row in rows {
            let task_row_id = row.id;
            let Some(media_id) = row.media_id else { continue };
            let Some(file_id) = row.file_id else { continue };

            let mut active: task_entity::ActiveModel = row.into();
            active.retry_count = Set(0);
            active.status = Set(TaskStatus::Unknown);
            task_entity::Entity::update(active)
                .exec(&self.db)
                .await
                .map_err(|e| ParserError::TaskSystem(e.to_string()))?;

            let task = ParseTask::new(
                task_row_id,
                media_id,
                file_id,
                self.db.clone(),
                Arc::clone(&self.services),
                callbacks.clone(),
            );
            self.dispatcher
                .try_dispatch(Box::new(task))
                .await
                .map_err(|e| ParserError::TaskSystem(e.to_string()))?;
        }
        info!(count, "requeued fatal tasks for retry");
        Ok(count)
    }

    pub async fn shutdown(&self) {
        self.dispatcher.shutdown().await;
    }
}

pub(crate) fn is_step_completed(completed_steps: i32, step: ParserStep) -> bool {
    completed_steps & step.bit() == step.bit()
}

pub(crate) fn warn_task_error(task_id: i32, error: &ParserError) {
    warn!(task_id, %error, "task step failed");
}
