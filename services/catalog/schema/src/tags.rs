use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tag_tool::Entity")]
    TagTool,
}

impl Related<super::tag_tool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TagTool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
