use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "device")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub uuid: String,
    pub scheme: String,
    pub removable: bool,
    pub network: bool,
    pub present: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device_mountpoint::Entity")]
    Mountpoint,
    #[sea_orm(has_many = "super::folder::Entity")]
    Folder,
}

impl Related<super::device_mountpoint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mountpoint.def()
    }
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
