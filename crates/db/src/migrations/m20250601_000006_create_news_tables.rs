//! Create news, news like and news comment tables migration.
//!
//! (news_id, user_id) on the like table is a real unique index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(News::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(News::Title).string_len(200).not_null())
                    .col(ColumnDef::new(News::Content).text())
                    .col(ColumnDef::new(News::CoverImage).string_len(255))
                    .col(ColumnDef::new(News::AuthorId).string_len(100))
                    .col(ColumnDef::new(News::Category).string_len(50))
                    .col(ColumnDef::new(News::ViewCount).integer().not_null().default(0))
                    .col(ColumnDef::new(News::LikeCount).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(News::CommentCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(News::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(News::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (category, created_at) for the filtered feed
        manager
            .create_index(
                Index::create()
                    .name("idx_news_category_created")
                    .table(News::Table)
                    .col(News::Category)
                    .col(News::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NewsLike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsLike::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NewsLike::NewsId).string_len(32).not_null())
                    .col(ColumnDef::new(NewsLike::UserId).string_len(100).not_null())
                    .col(
                        ColumnDef::new(NewsLike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_like_news")
                            .from(NewsLike::Table, NewsLike::NewsId)
                            .to(News::Table, News::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (news_id, user_id) - one like per user
        manager
            .create_index(
                Index::create()
                    .name("idx_news_like_news_user")
                    .table(NewsLike::Table)
                    .col(NewsLike::NewsId)
                    .col(NewsLike::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NewsComment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsComment::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NewsComment::NewsId).string_len(32).not_null())
                    .col(ColumnDef::new(NewsComment::UserId).string_len(100).not_null())
                    .col(ColumnDef::new(NewsComment::Content).text().not_null())
                    .col(ColumnDef::new(NewsComment::ParentId).string_len(32))
                    .col(
                        ColumnDef::new(NewsComment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_comment_news")
                            .from(NewsComment::Table, NewsComment::NewsId)
                            .to(News::Table, News::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_comment_parent")
                            .from(NewsComment::Table, NewsComment::ParentId)
                            .to(NewsComment::Table, NewsComment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (news_id, parent_id, created_at) for the comment tree
        manager
            .create_index(
                Index::create()
                    .name("idx_news_comment_news_parent_created")
                    .table(NewsComment::Table)
                    .col(NewsComment::NewsId)
                    .col(NewsComment::ParentId)
                    .col(NewsComment::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsComment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NewsLike::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum News {
    Table,
    Id,
    Title,
    Content,
    CoverImage,
    AuthorId,
    Category,
    ViewCount,
    LikeCount,
    CommentCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum NewsLike {
    Table,
    Id,
    NewsId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum NewsComment {
    Table,
    Id,
    NewsId,
    UserId,
    Content,
    ParentId,
    CreatedAt,
}
