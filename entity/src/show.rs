use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "show")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub release_date: Option<DateTimeUtc>,
    pub thumbnail_id: Option<i32>,
    pub nb_episodes: i32,
    pub nb_present_episodes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show_episode::Entity")]
    ShowEpisode,
}

impl Related<super::show_episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowEpisode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
