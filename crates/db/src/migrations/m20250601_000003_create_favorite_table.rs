//! Create favorite table migration.
//!
//! The (user_id, kind, item_id) triple carries a real unique index so a
//! duplicate insert fails at the schema level instead of relying on a
//! check-then-insert sequence.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorite::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorite::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Favorite::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Favorite::ItemId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Favorite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user")
                            .from(Favorite::Table, Favorite::UserId)
                            .to(User::Table, User::Openid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, kind, item_id) - at most one favorite per target
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user_kind_item")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .col(Favorite::Kind)
                    .col(Favorite::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorite::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Favorite {
    Table,
    Id,
    UserId,
    Kind,
    ItemId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Openid,
}
