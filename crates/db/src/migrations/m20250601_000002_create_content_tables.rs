//! Create travel guide and attraction tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TravelGuide::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TravelGuide::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TravelGuide::Title).string_len(100).not_null())
                    .col(ColumnDef::new(TravelGuide::CoverImage).string_len(255))
                    .col(ColumnDef::new(TravelGuide::Description).text())
                    .col(ColumnDef::new(TravelGuide::Content).text())
                    .col(ColumnDef::new(TravelGuide::Author).string_len(50))
                    .col(
                        ColumnDef::new(TravelGuide::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TravelGuide::LikeCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TravelGuide::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TravelGuide::UpdatedAt)
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
                    .table(Attraction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attraction::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attraction::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Attraction::CoverImage).string_len(255))
                    .col(
                        ColumnDef::new(Attraction::Images)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Attraction::Description).text())
                    .col(ColumnDef::new(Attraction::Address).string_len(255))
                    .col(ColumnDef::new(Attraction::Location).string_len(100))
                    .col(ColumnDef::new(Attraction::Price).double())
                    .col(ColumnDef::new(Attraction::OpeningHours).string_len(255))
                    .col(ColumnDef::new(Attraction::Tips).text())
                    .col(ColumnDef::new(Attraction::Category).string_len(50))
                    .col(
                        ColumnDef::new(Attraction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Attraction::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: category (for list filtering)
        manager
            .create_index(
                Index::create()
                    .name("idx_attraction_category")
                    .table(Attraction::Table)
                    .col(Attraction::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attraction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TravelGuide::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TravelGuide {
    Table,
    Id,
    Title,
    CoverImage,
    Description,
    Content,
    Author,
    ViewCount,
    LikeCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Attraction {
    Table,
    Id,
    Name,
    CoverImage,
    Images,
    Description,
    Address,
    Location,
    Price,
    OpeningHours,
    Tips,
    Category,
    CreatedAt,
    UpdatedAt,
}
