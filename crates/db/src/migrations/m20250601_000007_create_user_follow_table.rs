//! Create user follow table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserFollow::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserFollow::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserFollow::FollowerId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFollow::FollowingId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFollow::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (follower_id, following_id) - prevent duplicate follows
        manager
            .create_index(
                Index::create()
                    .name("idx_user_follow_follower_following")
                    .table(UserFollow::Table)
                    .col(UserFollow::FollowerId)
                    .col(UserFollow::FollowingId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: following_id (for follower listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_follow_following")
                    .table(UserFollow::Table)
                    .col(UserFollow::FollowingId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFollow::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserFollow {
    Table,
    Id,
    FollowerId,
    FollowingId,
    CreatedAt,
}
