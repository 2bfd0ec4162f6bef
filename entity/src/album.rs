use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "album")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub album_artist_id: Option<i32>,
    pub nb_tracks: i32,
    pub nb_present_tracks: i32,
    pub nb_discs: i32,
    pub release_year: Option<i32>,
    pub thumbnail_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artist::Entity",
        from = "Column::AlbumArtistId",
        to = "super::artist::Column::Id"
    )]
    AlbumArtist,
    #[sea_orm(has_many = "super::album_track::Entity")]
    AlbumTrack,
    #[sea_orm(has_many = "super::album_appearance::Entity")]
    Appearance,
}

impl Related<super::album_track::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AlbumTrack.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
