//! Travel plan and plan item repositories.

use std::sync::Arc;

use crate::entities::{travel_plan, travel_plan_item, TravelPlan, TravelPlanItem};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use travelcloud_common::{AppError, AppResult};

/// Travel plan repository for database operations.
#[derive(Clone)]
pub struct TravelPlanRepository {
    db: Arc<DatabaseConnection>,
}

impl TravelPlanRepository {
    /// Create a new travel plan repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a plan by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<travel_plan::Model>> {
        TravelPlan::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's plans, newest first.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<travel_plan::Model>> {
        TravelPlan::find()
            .filter(travel_plan::Column::UserId.eq(user_id))
            .order_by_desc(travel_plan::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a user's plans.
    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        TravelPlan::find()
            .filter(travel_plan::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new plan.
    pub async fn create(&self, model: travel_plan::ActiveModel) -> AppResult<travel_plan::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a plan. Items cascade away with it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let plan = self.find_by_id(id).await?;
        if let Some(p) = plan {
            p.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Insert a plan item.
    pub async fn create_item(
        &self,
        model: travel_plan_item::ActiveModel,
    ) -> AppResult<travel_plan_item::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Items of a plan ordered (day ASC, id ASC). With ULID keys, id order
    /// within a day is insertion order.
    pub async fn find_items(&self, plan_id: &str) -> AppResult<Vec<travel_plan_item::Model>> {
        TravelPlanItem::find()
            .filter(travel_plan_item::Column::PlanId.eq(plan_id))
            .order_by_asc(travel_plan_item::Column::Day)
            .order_by_asc(travel_plan_item::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_plan(id: &str, user_id: &str) -> travel_plan::Model {
        travel_plan::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Golden week".to_string(),
            start_date: None,
            end_date: None,
            description: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_item(id: &str, plan_id: &str, day: i32) -> travel_plan_item::Model {
        travel_plan_item::Model {
            id: id.to_string(),
            plan_id: plan_id.to_string(),
            day,
            attraction_id: None,
            time_period: Some("morning".to_string()),
            note: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let p1 = create_test_plan("p1", "user1");
        let p2 = create_test_plan("p2", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = TravelPlanRepository::new(db);
        let result = repo.find_by_user("user1", 10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_items_ordering_passthrough() {
        // Mock returns what the ORDER BY would produce: day ASC, id ASC.
        let i1 = create_test_item("01a", "p1", 1);
        let i2 = create_test_item("01b", "p1", 1);
        let i3 = create_test_item("019", "p1", 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[i1, i2, i3]])
                .into_connection(),
        );

        let repo = TravelPlanRepository::new(db);
        let result = repo.find_items("p1").await.unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].day, 1);
        assert_eq!(result[2].day, 2);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<travel_plan::Model>::new()])
                .into_connection(),
        );

        let repo = TravelPlanRepository::new(db);
        assert!(repo.delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let plan = create_test_plan("p1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[plan]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = TravelPlanRepository::new(db);
        assert!(repo.delete("p1").await.is_ok());
    }
}
