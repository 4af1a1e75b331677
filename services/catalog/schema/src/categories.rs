use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::category_tool::Entity")]
    CategoryTool,
}

impl Related<super::category_tool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryTool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
