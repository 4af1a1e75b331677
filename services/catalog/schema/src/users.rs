use sea_orm::entity::prelude::*;

/// Account that signs in to the catalog.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Role wire value (`owner`, `backend`, ...).
    pub role: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tools::Entity")]
    Tools,
    #[sea_orm(has_many = "super::tool_action_challenges::Entity")]
    ToolActionChallenges,
}

impl Related<super::tools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tools.def()
    }
}

impl Related<super::tool_action_challenges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ToolActionChallenges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
