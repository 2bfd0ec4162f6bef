use sea_orm::entity::prelude::*;

use crate::{CacheType, MediaSubType, MediaType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub title_forced: bool,
    pub media_type: MediaType,
    pub media_sub_type: MediaSubType,
    pub duration: i64,
    pub play_count: i32,
    /// In `[0,1]`, or `-1` meaning "no saved position".
    pub last_position: f64,
    /// Milliseconds, or `-1` meaning "no saved time".
    pub last_time: i64,
    pub last_played_date: Option<DateTimeUtc>,
    pub insertion_date: DateTimeUtc,
    pub release_date: Option<DateTimeUtc>,
    pub favorite: bool,
    pub is_discovered: bool,
    pub is_external: bool,
    pub is_stream: bool,
    /// Maintained by trigger: mirrors the presence of the owning folder and
    /// its device; always true for external/stream media.
    pub is_present: bool,
    /// Whether and how this media is locally cached (§4.7); gates eviction
    /// eligibility in `CacheManager::eviction_candidates`.
    pub cache_type: CacheType,
    /// Set by `CacheManager::mark_cache_as_handled` so an automatically
    /// cached media isn't reconsidered within the same eviction pass.
    pub cache_handled: bool,
    pub group_id: i32,
    pub folder_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::folder::Entity",
        from = "Column::FolderId",
        to = "super::folder::Column::Id"
    )]
    Folder,
    #[sea_orm(
        belongs_to = "super::media_group::Entity",
        from = "Column::GroupId",
        to = "super::media_group::Column::Id"
    )]
    MediaGroup,
    #[sea_orm(has_many = "super::file::Entity")]
    File,
    #[sea_orm(has_many = "super::bookmark::Entity")]
    Bookmark,
    #[sea_orm(has_many = "super::chapter::Entity")]
    Chapter,
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
}

impl Related<super::media_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MediaGroup.def()
    }
}

impl Related<super::file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::File.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
