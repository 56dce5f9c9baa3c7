//! Create solution and solution application tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Solution::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Solution::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Solution::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Solution::Description).text())
                    .col(ColumnDef::new(Solution::CoverImage).string_len(255))
                    .col(ColumnDef::new(Solution::Content).text())
                    .col(ColumnDef::new(Solution::Duration).integer())
                    .col(ColumnDef::new(Solution::PriceEstimate).double())
                    .col(ColumnDef::new(Solution::Difficulty).integer())
                    .col(
                        ColumnDef::new(Solution::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Solution::ApplyCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Solution::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Solution::UpdatedAt)
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
                    .table(SolutionApplication::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SolutionApplication::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SolutionApplication::SolutionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SolutionApplication::UserId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SolutionApplication::TravelDate).date())
                    .col(ColumnDef::new(SolutionApplication::Notes).text())
                    .col(ColumnDef::new(SolutionApplication::PlanId).string_len(32))
                    .col(
                        ColumnDef::new(SolutionApplication::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_solution_application_solution")
                            .from(SolutionApplication::Table, SolutionApplication::SolutionId)
                            .to(Solution::Table, Solution::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SolutionApplication::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Solution::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Solution {
    Table,
    Id,
    Title,
    Description,
    CoverImage,
    Content,
    Duration,
    PriceEstimate,
    Difficulty,
    ViewCount,
    ApplyCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SolutionApplication {
    Table,
    Id,
    SolutionId,
    UserId,
    TravelDate,
    Notes,
    PlanId,
    CreatedAt,
}
