use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tools::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tools::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tools::Name).string().not_null())
                    .col(ColumnDef::new(Tools::Link).string())
                    .col(ColumnDef::new(Tools::DocumentationUrl).string())
                    .col(ColumnDef::new(Tools::VideoUrl).string())
                    .col(ColumnDef::new(Tools::Difficulty).string())
                    .col(ColumnDef::new(Tools::Documentation).text())
                    .col(ColumnDef::new(Tools::Description).text())
                    .col(ColumnDef::new(Tools::HowToUse).text())
                    .col(ColumnDef::new(Tools::Examples).json_binary())
                    .col(ColumnDef::new(Tools::ResourceLinks).json_binary())
                    .col(ColumnDef::new(Tools::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Tools::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Tools::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tools::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tools::Table, Tools::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Tools::Table)
                    .col(Tools::CreatedBy)
                    .name("idx_tools_created_by")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Tools::Table)
                    .col(Tools::Status)
                    .name("idx_tools_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tools::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tools {
    Table,
    Id,
    Name,
    Link,
    DocumentationUrl,
    VideoUrl,
    Difficulty,
    Documentation,
    Description,
    HowToUse,
    Examples,
    ResourceLinks,
    CreatedBy,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
