use sea_orm::entity::prelude::*;

/// A configured remote content source (e.g. a podcast feed endpoint),
/// singleton per `service_type`, that subscriptions are scoped under.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub service_type: String,
    pub auto_download: bool,
    pub new_media_notification: bool,
    /// Bytes, or -1 for unbounded (§4.7; the root of the quota chain —
    /// unlike `Subscription`, a service has no ancestor to inherit from).
    pub max_cached_size: i64,
    pub nb_media: i32,
    pub nb_unplayed_media: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscription,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
