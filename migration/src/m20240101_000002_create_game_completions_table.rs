use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameCompletions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameCompletions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameCompletions::UserId).uuid().not_null())
                    .col(ColumnDef::new(GameCompletions::GameId).string().not_null())
                    .col(ColumnDef::new(GameCompletions::Category).string().not_null())
                    .col(ColumnDef::new(GameCompletions::Points).integer().not_null())
                    .col(ColumnDef::new(GameCompletions::ScorePercent).integer().null())
                    .col(
                        ColumnDef::new(GameCompletions::CompletedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_completions_user")
                            .from(GameCompletions::Table, GameCompletions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Summary queries filter by user and month
        manager
            .create_index(
                Index::create()
                    .name("idx_game_completions_user_completed_at")
                    .table(GameCompletions::Table)
                    .col(GameCompletions::UserId)
                    .col(GameCompletions::CompletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameCompletions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameCompletions {
    Table,
    Id,
    UserId,
    GameId,
    Category,
    Points,
    ScorePercent,
    CompletedAt,
}
