use sea_orm::entity::prelude::*;

use crate::NotificationSetting;

/// One node of the subscription forest rooted at a `Service` (§3, §4.7).
/// `parent_id` is `None` for a root subscription. Quota columns are `-1`
/// (or `Inherit` for notification) to mean "use the nearest ancestor's
/// value, or the global setting if none is set".
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_id: i32,
    pub parent_id: Option<i32>,
    pub playlist_id: i32,
    pub name: String,
    pub cached_size: i64,
    pub max_cached_media: i32,
    pub max_cached_size: i64,
    pub new_media_notification: NotificationSetting,
    pub nb_unplayed_media: i32,
    pub nb_media: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
    #[sea_orm(
        belongs_to = "super::playlist::Entity",
        from = "Column::PlaylistId",
        to = "super::playlist::Column::Id"
    )]
    Playlist,
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::playlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Playlist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
