use sea_orm::entity::prelude::*;

use crate::ThumbnailOrigin;

/// Stored once per distinct image on disk; `refcount` lets the cleanup
/// trigger drop the file once the last owning row is deleted (§4.6).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "thumbnail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub mrl: String,
    pub origin: ThumbnailOrigin,
    pub refcount: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
