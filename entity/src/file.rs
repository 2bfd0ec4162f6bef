use sea_orm::entity::prelude::*;

use crate::{FileType, LinkedFileType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub media_id: i32,
    /// Relative to the owning device's current mountpoint (§4.1 policy).
    pub mrl: String,
    pub file_type: FileType,
    pub linked_file_type: LinkedFileType,
    pub linked_file_id: Option<i32>,
    pub size: i64,
    pub last_modification_date: DateTimeUtc,
    pub is_network: bool,
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
        belongs_to = "Entity",
        from = "Column::LinkedFileId",
        to = "Column::Id"
    )]
    LinkedFile,
}

impl Related<super::media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
