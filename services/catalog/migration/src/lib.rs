pub use sea_orm_migration::prelude::*;

mod m20260201_000001_create_users;
mod m20260201_000002_create_tools;
mod m20260201_000003_create_tool_roles;
mod m20260201_000004_create_categories;
mod m20260201_000005_create_tags;
mod m20260201_000006_create_category_tool;
mod m20260201_000007_create_tag_tool;
mod m20260203_000001_create_tool_action_challenges;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260201_000001_create_users::Migration),
            Box::new(m20260201_000002_create_tools::Migration),
            Box::new(m20260201_000003_create_tool_roles::Migration),
            Box::new(m20260201_000004_create_categories::Migration),
            Box::new(m20260201_000005_create_tags::Migration),
            Box::new(m20260201_000006_create_category_tool::Migration),
            Box::new(m20260201_000007_create_tag_tool::Migration),
            Box::new(m20260203_000001_create_tool_action_challenges::Migration),
        ]
    }
}
