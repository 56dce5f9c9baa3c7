//! Create feedback and about-info tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::UserId).string_len(100).not_null())
                    .col(ColumnDef::new(Feedback::Kind).string_len(50).not_null())
                    .col(ColumnDef::new(Feedback::Content).text().not_null())
                    .col(ColumnDef::new(Feedback::Contact).string_len(100))
                    .col(ColumnDef::new(Feedback::Images).text())
                    .col(ColumnDef::new(Feedback::Status).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AboutInfo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AboutInfo::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AboutInfo::Kind)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AboutInfo::Title).string_len(100).not_null())
                    .col(ColumnDef::new(AboutInfo::Content).text().not_null())
                    .col(
                        ColumnDef::new(AboutInfo::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AboutInfo::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AboutInfo::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    UserId,
    Kind,
    Content,
    Contact,
    Images,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum AboutInfo {
    Table,
    Id,
    Kind,
    Title,
    Content,
    CreatedAt,
    UpdatedAt,
}
