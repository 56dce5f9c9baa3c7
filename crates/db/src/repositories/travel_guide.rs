//! Travel guide repository.

use std::sync::Arc;

use crate::entities::{travel_guide, TravelGuide};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use travelcloud_common::{AppError, AppResult};

/// Travel guide repository for database operations.
#[derive(Clone)]
pub struct TravelGuideRepository {
    db: Arc<DatabaseConnection>,
}

impl TravelGuideRepository {
    /// Create a new travel guide repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a guide by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<travel_guide::Model>> {
        TravelGuide::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Batch-load guides in one query, for favorite resolution.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<travel_guide::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        TravelGuide::find()
            .filter(travel_guide::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List guides, newest first.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<travel_guide::Model>> {
        TravelGuide::find()
            .order_by_desc(travel_guide::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all guides.
    pub async fn count(&self) -> AppResult<u64> {
        TravelGuide::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new guide.
    pub async fn create(&self, model: travel_guide::ActiveModel) -> AppResult<travel_guide::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment view count atomically (single UPDATE query, no fetch).
    pub async fn increment_view_count(&self, id: &str) -> AppResult<()> {
        TravelGuide::update_many()
            .col_expr(
                travel_guide::Column::ViewCount,
                Expr::col(travel_guide::Column::ViewCount).add(1),
            )
            .filter(travel_guide::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_guide(id: &str, title: &str) -> travel_guide::Model {
        travel_guide::Model {
            id: id.to_string(),
            title: title.to_string(),
            cover_image: None,
            description: Some("a trip write-up".to_string()),
            content: None,
            author: None,
            view_count: 0,
            like_count: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let guide = create_test_guide("g1", "Three days in Kyoto");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[guide.clone()]])
                .into_connection(),
        );

        let repo = TravelGuideRepository::new(db);
        let result = repo.find_by_id("g1").await.unwrap();

        assert_eq!(result.unwrap().title, "Three days in Kyoto");
    }

    #[tokio::test]
    async fn test_list() {
        let g1 = create_test_guide("g1", "Kyoto");
        let g2 = create_test_guide("g2", "Osaka");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[g1, g2]])
                .into_connection(),
        );

        let repo = TravelGuideRepository::new(db);
        let result = repo.list(10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_increment_view_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = TravelGuideRepository::new(db);
        assert!(repo.increment_view_count("g1").await.is_ok());
    }
}
