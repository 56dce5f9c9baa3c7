//! Create travel plan and plan item tables migration.
//!
//! Plan items cascade with their plan. The attraction reference is
//! deliberately not a foreign key: a deleted attraction leaves a dangling
//! id that readers resolve to null.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TravelPlan::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TravelPlan::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TravelPlan::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(TravelPlan::Title).string_len(100).not_null())
                    .col(ColumnDef::new(TravelPlan::StartDate).date())
                    .col(ColumnDef::new(TravelPlan::EndDate).date())
                    .col(ColumnDef::new(TravelPlan::Description).text())
                    .col(
                        ColumnDef::new(TravelPlan::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TravelPlan::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_travel_plan_user")
                            .from(TravelPlan::Table, TravelPlan::UserId)
                            .to(User::Table, User::Openid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for plan listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_travel_plan_user_id")
                    .table(TravelPlan::Table)
                    .col(TravelPlan::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TravelPlanItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TravelPlanItem::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TravelPlanItem::PlanId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TravelPlanItem::Day).integer().not_null())
                    .col(ColumnDef::new(TravelPlanItem::AttractionId).string_len(32))
                    .col(ColumnDef::new(TravelPlanItem::TimePeriod).string_len(50))
                    .col(ColumnDef::new(TravelPlanItem::Note).text())
                    .col(
                        ColumnDef::new(TravelPlanItem::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TravelPlanItem::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_travel_plan_item_plan")
                            .from(TravelPlanItem::Table, TravelPlanItem::PlanId)
                            .to(TravelPlan::Table, TravelPlan::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index: (plan_id, day, id) for itinerary ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_travel_plan_item_plan_day_id")
                    .table(TravelPlanItem::Table)
                    .col(TravelPlanItem::PlanId)
                    .col(TravelPlanItem::Day)
                    .col(TravelPlanItem::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TravelPlanItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TravelPlan::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TravelPlan {
    Table,
    Id,
    UserId,
    Title,
    StartDate,
    EndDate,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TravelPlanItem {
    Table,
    Id,
    PlanId,
    Day,
    AttractionId,
    TimePeriod,
    Note,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Openid,
}
