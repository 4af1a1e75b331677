use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TagTool::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TagTool::TagId).integer().not_null())
                    .col(ColumnDef::new(TagTool::ToolId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(TagTool::TagId)
                            .col(TagTool::ToolId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TagTool::Table, TagTool::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TagTool::Table, TagTool::ToolId)
                            .to(Tools::Table, Tools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TagTool::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TagTool {
    Table,
    TagId,
    ToolId,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
}

#[derive(Iden)]
enum Tools {
    Table,
    Id,
}
