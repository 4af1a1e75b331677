use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ToolActionChallenges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ToolActionChallenges::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ToolActionChallenges::UserId).uuid().not_null())
                    .col(ColumnDef::new(ToolActionChallenges::ToolId).uuid().not_null())
                    .col(ColumnDef::new(ToolActionChallenges::Action).string().not_null())
                    .col(
                        ColumnDef::new(ToolActionChallenges::CodeHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ToolActionChallenges::Attempts)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ToolActionChallenges::MaxAttempts)
                            .small_integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(ToolActionChallenges::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ToolActionChallenges::ConsumedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ToolActionChallenges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ToolActionChallenges::Table, ToolActionChallenges::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ToolActionChallenges::Table, ToolActionChallenges::ToolId)
                            .to(Tools::Table, Tools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup of the newest unconsumed challenge per (user, tool, action).
        manager
            .create_index(
                Index::create()
                    .table(ToolActionChallenges::Table)
                    .col(ToolActionChallenges::UserId)
                    .col(ToolActionChallenges::ToolId)
                    .col(ToolActionChallenges::Action)
                    .name("idx_tool_action_challenges_tuple")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ToolActionChallenges::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ToolActionChallenges {
    Table,
    Id,
    UserId,
    ToolId,
    Action,
    CodeHash,
    Attempts,
    MaxAttempts,
    ExpiresAt,
    ConsumedAt,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Tools {
    Table,
    Id,
}
