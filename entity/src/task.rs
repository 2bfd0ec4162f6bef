use sea_orm::entity::prelude::*;

use crate::{ParserStep, TaskStatus};

/// Persisted parser task state, surviving process restarts so the pipeline
/// can resume interrupted work instead of rescanning (§4.5).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub media_id: Option<i32>,
    pub file_id: Option<i32>,
    pub completed_steps: i32,
    pub retry_count: i32,
    pub status: TaskStatus,
}

impl Model {
    pub fn is_step_completed(&self, step: ParserStep) -> bool {
        self.completed_steps & step.bit() == step.bit()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::media::Entity",
        from = "Column::MediaId",
        to = "super::media::Column::Id"
    )]
    Media,
    #[sea_orm(
        belongs_to = "super::file::Entity",
        from = "Column::FileId",
        to = "super::file::Column::Id"
    )]
    File,
}

impl ActiveModelBehavior for ActiveModel {}
