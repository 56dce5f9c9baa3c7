//! Create companion, tag, reservation and review tables migration.
//!
//! (reservation_id, user_id) on the review table is a real unique index:
//! one review per reservation per user, enforced by the schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companion::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companion::UserId).string_len(100).not_null())
                    .col(ColumnDef::new(Companion::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Companion::Description).text())
                    .col(ColumnDef::new(Companion::Avatar).string_len(255))
                    .col(ColumnDef::new(Companion::CoverImage).string_len(255))
                    .col(ColumnDef::new(Companion::Price).double().not_null())
                    .col(ColumnDef::new(Companion::Location).string_len(100))
                    .col(
                        ColumnDef::new(Companion::ExperienceYears)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Companion::Languages).string_len(255))
                    .col(
                        ColumnDef::new(Companion::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Companion::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Companion::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Companion::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Companion::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (status, rating) for the active listing ordered by rating
        manager
            .create_index(
                Index::create()
                    .name("idx_companion_status_rating")
                    .table(Companion::Table)
                    .col(Companion::Status)
                    .col(Companion::Rating)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanionTag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanionTag::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompanionTag::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanionTagRelation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanionTagRelation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompanionTagRelation::CompanionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanionTagRelation::TagId)
                            .string_len(32)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companion_tag_relation_companion")
                            .from(
                                CompanionTagRelation::Table,
                                CompanionTagRelation::CompanionId,
                            )
                            .to(Companion::Table, Companion::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companion_tag_relation_tag")
                            .from(CompanionTagRelation::Table, CompanionTagRelation::TagId)
                            .to(CompanionTag::Table, CompanionTag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (companion_id, tag_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_companion_tag_relation_pair")
                    .table(CompanionTagRelation::Table)
                    .col(CompanionTagRelation::CompanionId)
                    .col(CompanionTagRelation::TagId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanionReservation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanionReservation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompanionReservation::CompanionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanionReservation::UserId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanionReservation::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanionReservation::EndDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanionReservation::TravelerCount)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(CompanionReservation::SpecialNeeds).text())
                    .col(
                        ColumnDef::new(CompanionReservation::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CompanionReservation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CompanionReservation::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companion_reservation_companion")
                            .from(
                                CompanionReservation::Table,
                                CompanionReservation::CompanionId,
                            )
                            .to(Companion::Table, Companion::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, created_at) for a user's order history
        manager
            .create_index(
                Index::create()
                    .name("idx_companion_reservation_user_created")
                    .table(CompanionReservation::Table)
                    .col(CompanionReservation::UserId)
                    .col(CompanionReservation::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanionReview::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanionReview::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompanionReview::ReservationId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanionReview::UserId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanionReview::CompanionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CompanionReview::Rating).double().not_null())
                    .col(ColumnDef::new(CompanionReview::Content).text())
                    .col(ColumnDef::new(CompanionReview::Images).text())
                    .col(
                        ColumnDef::new(CompanionReview::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companion_review_reservation")
                            .from(CompanionReview::Table, CompanionReview::ReservationId)
                            .to(CompanionReservation::Table, CompanionReservation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companion_review_companion")
                            .from(CompanionReview::Table, CompanionReview::CompanionId)
                            .to(Companion::Table, Companion::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (reservation_id, user_id) - one review per reservation per user
        manager
            .create_index(
                Index::create()
                    .name("idx_companion_review_reservation_user")
                    .table(CompanionReview::Table)
                    .col(CompanionReview::ReservationId)
                    .col(CompanionReview::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (companion_id, created_at) for the recent-reviews panel
        manager
            .create_index(
                Index::create()
                    .name("idx_companion_review_companion_created")
                    .table(CompanionReview::Table)
                    .col(CompanionReview::CompanionId)
                    .col(CompanionReview::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompanionReview::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompanionReservation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompanionTagRelation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompanionTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companion::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Companion {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Avatar,
    CoverImage,
    Price,
    Location,
    ExperienceYears,
    Languages,
    Rating,
    ReviewCount,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CompanionTag {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum CompanionTagRelation {
    Table,
    Id,
    CompanionId,
    TagId,
}

#[derive(Iden)]
enum CompanionReservation {
    Table,
    Id,
    CompanionId,
    UserId,
    StartDate,
    EndDate,
    TravelerCount,
    SpecialNeeds,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CompanionReview {
    Table,
    Id,
    ReservationId,
    UserId,
    CompanionId,
    Rating,
    Content,
    Images,
    CreatedAt,
}
