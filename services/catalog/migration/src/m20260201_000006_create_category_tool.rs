use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CategoryTool::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CategoryTool::CategoryId).integer().not_null())
                    .col(ColumnDef::new(CategoryTool::ToolId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(CategoryTool::CategoryId)
                            .col(CategoryTool::ToolId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CategoryTool::Table, CategoryTool::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CategoryTool::Table, CategoryTool::ToolId)
                            .to(Tools::Table, Tools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoryTool::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CategoryTool {
    Table,
    CategoryId,
    ToolId,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
}

#[derive(Iden)]
enum Tools {
    Table,
    Id,
}
