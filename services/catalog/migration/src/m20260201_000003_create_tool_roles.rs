use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ToolRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ToolRoles::ToolId).uuid().not_null())
                    .col(ColumnDef::new(ToolRoles::Role).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(ToolRoles::ToolId)
                            .col(ToolRoles::Role),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ToolRoles::Table, ToolRoles::ToolId)
                            .to(Tools::Table, Tools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ToolRoles::Table)
                    .col(ToolRoles::Role)
                    .name("idx_tool_roles_role")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ToolRoles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ToolRoles {
    Table,
    ToolId,
    Role,
}

#[derive(Iden)]
enum Tools {
    Table,
    Id,
}
