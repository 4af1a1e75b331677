use sea_orm::entity::prelude::*;

/// Catalog entry for an internal utility or link.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub link: Option<String>,
    pub documentation_url: Option<String>,
    pub video_url: Option<String>,
    pub difficulty: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub documentation: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub how_to_use: Option<String>,
    pub examples: Option<Json>,
    pub resource_links: Option<Json>,
    pub created_by: Uuid,
    /// Moderation status wire value (`pending`, `approved`, `rejected`).
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::tool_roles::Entity")]
    ToolRoles,
    #[sea_orm(has_many = "super::category_tool::Entity")]
    CategoryTool,
    #[sea_orm(has_many = "super::tag_tool::Entity")]
    TagTool,
    #[sea_orm(has_many = "super::tool_action_challenges::Entity")]
    ToolActionChallenges,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::tool_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ToolRoles.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::category_tool::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::category_tool::Relation::Tool.def().rev())
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::tag_tool::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::tag_tool::Relation::Tool.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
