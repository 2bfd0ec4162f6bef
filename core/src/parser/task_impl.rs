use std::sync::Arc;
use std::time::Duration;

use medialib_entity::sea_orm_active_enums::TaskStatus;
use medialib_entity::task as task_entity;
use medialib_errors::ParserError;
use medialib_task_system::{ExecStatus, Interrupter, InterruptionKind, Task, TaskId};
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use tokio::sync::RwLock;
use tracing::{instrument, warn};
use uuid::Uuid;

use super::service::ServiceName;
use super::{is_step_completed, warn_task_error, ParserService, MAX_RETRY_COUNT};
use crate::callbacks::Callbacks;

/// Wall-clock budget per step (§5, decided: 15s) before a step is treated
/// as `TemporaryUnavailable`.
const STEP_TIMEOUT: Duration = Duration::from_secs(15);

const STEP_ORDER: [ServiceName; 3] = [
    ServiceName::MetadataExtraction,
    ServiceName::MetadataAnalysis,
    ServiceName::Linking,
];

/// Durable identity is the persisted `Task` row id; `run` reloads the
/// step-bitmap from storage every time so a `Paused` task resumes from
/// exactly where it left off, even if requeued after a restart.
pub struct ParseTask {
    task_row_id: i32,
    media_id: i32,
    file_id: i32,
    uuid: Uuid,
    db: DatabaseConnection,
    services: Arc<RwLock<Vec<Arc<dyn ParserService>>>>,
    callbacks: Arc<dyn Callbacks>,
}

impl ParseTask {
    pub fn new(
        task_row_id: i32,
        media_id: i32,
        file_id: i32,
        db: DatabaseConnection,
        services: Arc<RwLock<Vec<Arc<dyn ParserService>>>>,
        callbacks: Arc<dyn Callbacks>,
    ) -> Self {
        Self {
            task_row_id,
            media_id,
            file_id,
            uuid: Uuid::new_v4(),
            db,
            services,
            callbacks,
        }
    }

    async fn service_for(&self, name: ServiceName) -> Option<Arc<dyn ParserService>> {
        self.services.read().await.iter().find(|s| s.name() == name).cloned()
    }

    async fn load_row(&self) -> Result<task_entity::Model, ParserError> {
        task_entity::Entity::find_by_id(self.task_row_id)
            .one(&self.db)
            .await
            .map_err(|e| ParserError::Storage(e.into()))?
            .ok_or_else(|| ParserError::TaskSystem(format!("task {} vanished", self.task_row_id)))
    }

    async fn save_row(&self, row: task_entity::Model) -> Result<(), ParserError> {
        let active: task_entity::ActiveModel = row.into();
        task_entity::Entity::update(active)
            .exec(&self.db)
            .await
            .map_err(|e| ParserError::Storage(e.into()))?;
        Ok(())
    }

    async fn run_step(&self, service: &Arc<dyn ParserService>) -> TaskStatus {
        let fut = service.run(self.media_id, self.file_id);
        match tokio::time::timeout(STEP_TIMEOUT, fut).await {
            Ok(Ok(status)) => status,
            Ok(Err(error)) => {
                warn_task_error(self.task_row_id, &error);
                TaskStatus::TemporaryUnavailable
            }
            Err(_elapsed) => {
                warn!(task_id = self.task_row_id, step = ?service.name(), "step timed out");
                TaskStatus::TemporaryUnavailable
            }
        }
    }
}

#[async_trait::async_trait]
impl Task<ParserError> for ParseTask {
    fn id(&self) -> TaskId {
        self.uuid
    }

    #[instrument(skip(self, interrupter), fields(task_id = self.task_row_id))]
    async fn run(&mut self, interrupter: &Interrupter) -> Result<ExecStatus, ParserError> {
        loop {
            let mut row = self.load_row().await?;

            if let Some(kind) = interrupter.is_interrupted() {
                return Ok(match kind {
                    InterruptionKind::Pause => ExecStatus::Paused,
                    InterruptionKind::Cancel => ExecStatus::Canceled,
                });
            }

            let Some(next) = STEP_ORDER
                .iter()
                .find(|step| !is_step_completed(row.completed_steps, step.step()))
            else {
                row.status = TaskStatus::Completed;
                self.save_row(row).await?;
                self.callbacks.parsing_progress(100);
                return Ok(ExecStatus::Done);
            };

            let Some(service) = self.service_for(*next).await else {
                return Err(ParserError::UnknownService(format!("{next:?}")));
            };

            let status = self.run_step(&service).await;

            match status {
                TaskStatus::Success => {
                    row.completed_steps |= next.step().bit();
                    row.status = TaskStatus::Success;
                    self.save_row(row).await?;
                }
                TaskStatus::TemporaryUnavailable | TaskStatus::Requeue => {
                    row.retry_count += 1;
                    if row.retry_count >= MAX_RETRY_COUNT {
                        row.status = TaskStatus::Fatal;
                        self.save_row(row).await?;
                        return Ok(ExecStatus::Done);
                    }
                    row.status = status;
                    self.save_row(row).await?;
                }
                TaskStatus::Fatal | TaskStatus::Discarded => {
                    row.status = status;
                    self.save_row(row).await?;
                    return Ok(ExecStatus::Done);
                }
                TaskStatus::Unknown | TaskStatus::Completed => {
                    // A service must never report these; treat as a bug
                    // surfaced via Fatal rather than looping forever.
                    row.status = TaskStatus::Fatal;
                    self.save_row(row).await?;
                    return Ok(ExecStatus::Done);
                }
            }
        }
    }
}
