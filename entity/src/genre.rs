use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "genre")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub nb_tracks: i32,
    pub nb_present_tracks: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::media_genre::Entity")]
    MediaGenre,
}

impl Related<super::media_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MediaGenre.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
