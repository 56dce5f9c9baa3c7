//! Solution repository.

use std::sync::Arc;

use crate::entities::{solution, solution_application, Solution};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use travelcloud_common::{AppError, AppResult};

/// Solution repository for database operations.
#[derive(Clone)]
pub struct SolutionRepository {
    db: Arc<DatabaseConnection>,
}

impl SolutionRepository {
    /// Create a new solution repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a solution by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<solution::Model>> {
        Solution::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List solutions, most viewed first, with optional filters.
    pub async fn list(
        &self,
        duration: Option<i32>,
        difficulty: Option<i32>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<solution::Model>> {
        let mut query = Solution::find().order_by_desc(solution::Column::ViewCount);

        if let Some(duration) = duration {
            query = query.filter(solution::Column::Duration.eq(duration));
        }
        if let Some(difficulty) = difficulty {
            query = query.filter(solution::Column::Difficulty.eq(difficulty));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count solutions under the same filters as `list`.
    pub async fn count(
        &self,
        duration: Option<i32>,
        difficulty: Option<i32>,
    ) -> AppResult<u64> {
        let mut query = Solution::find();

        if let Some(duration) = duration {
            query = query.filter(solution::Column::Duration.eq(duration));
        }
        if let Some(difficulty) = difficulty {
            query = query.filter(solution::Column::Difficulty.eq(difficulty));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment view count atomically (single UPDATE query, no fetch).
    pub async fn increment_view_count(&self, id: &str) -> AppResult<()> {
        Solution::update_many()
            .col_expr(
                solution::Column::ViewCount,
                Expr::col(solution::Column::ViewCount).add(1),
            )
            .filter(solution::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment apply count atomically.
    pub async fn increment_apply_count(&self, id: &str) -> AppResult<()> {
        Solution::update_many()
            .col_expr(
                solution::Column::ApplyCount,
                Expr::col(solution::Column::ApplyCount).add(1),
            )
            .filter(solution::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Record an application of a solution.
    pub async fn create_application(
        &self,
        model: solution_application::ActiveModel,
    ) -> AppResult<solution_application::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search solutions by keyword over title and description.
    pub async fn search(
        &self,
        keyword: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<solution::Model>> {
        Solution::find()
            .filter(Self::keyword_condition(keyword))
            .order_by_desc(solution::Column::ViewCount)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count solutions matching a keyword.
    pub async fn search_count(&self, keyword: &str) -> AppResult<u64> {
        Solution::find()
            .filter(Self::keyword_condition(keyword))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn keyword_condition(keyword: &str) -> Condition {
        Condition::any()
            .add(solution::Column::Title.contains(keyword))
            .add(solution::Column::Description.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_solution(id: &str, duration: Option<i32>) -> solution::Model {
        solution::Model {
            id: id.to_string(),
            title: "5 days around Kansai".to_string(),
            description: None,
            cover_image: None,
            content: None,
            duration,
            price_estimate: Some(4200.0),
            difficulty: Some(2),
            view_count: 0,
            apply_count: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let s1 = create_test_solution("s1", Some(5));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s1]])
                .into_connection(),
        );

        let repo = SolutionRepository::new(db);
        let result = repo.list(Some(5), Some(2), 10, 0).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].duration, Some(5));
    }

    #[tokio::test]
    async fn test_increment_apply_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = SolutionRepository::new(db);
        assert!(repo.increment_apply_count("s1").await.is_ok());
    }
}
