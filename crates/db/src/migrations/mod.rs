//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_user_table;
mod m20250601_000002_create_content_tables;
mod m20250601_000003_create_favorite_table;
mod m20250601_000004_create_travel_plan_tables;
mod m20250601_000005_create_companion_tables;
mod m20250601_000006_create_news_tables;
mod m20250601_000007_create_user_follow_table;
mod m20250601_000008_create_solution_tables;
mod m20250601_000009_create_support_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_user_table::Migration),
            Box::new(m20250601_000002_create_content_tables::Migration),
            Box::new(m20250601_000003_create_favorite_table::Migration),
            Box::new(m20250601_000004_create_travel_plan_tables::Migration),
            Box::new(m20250601_000005_create_companion_tables::Migration),
            Box::new(m20250601_000006_create_news_tables::Migration),
            Box::new(m20250601_000007_create_user_follow_table::Migration),
            Box::new(m20250601_000008_create_solution_tables::Migration),
            Box::new(m20250601_000009_create_support_tables::Migration),
        ]
    }
}
