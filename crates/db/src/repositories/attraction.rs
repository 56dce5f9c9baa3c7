//! Attraction repository.

use std::sync::Arc;

use crate::entities::{attraction, Attraction};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use travelcloud_common::{AppError, AppResult};

/// Attraction repository for database operations.
#[derive(Clone)]
pub struct AttractionRepository {
    db: Arc<DatabaseConnection>,
}

impl AttractionRepository {
    /// Create a new attraction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an attraction by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<attraction::Model>> {
        Attraction::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Batch-load attractions in one query, for plan item resolution.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<attraction::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Attraction::find()
            .filter(attraction::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List attractions with an optional category filter, newest first.
    pub async fn list(
        &self,
        category: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<attraction::Model>> {
        let mut query = Attraction::find().order_by_desc(attraction::Column::CreatedAt);

        if let Some(category) = category {
            query = query.filter(attraction::Column::Category.eq(category));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count attractions with an optional category filter.
    pub async fn count(&self, category: Option<&str>) -> AppResult<u64> {
        let mut query = Attraction::find();

        if let Some(category) = category {
            query = query.filter(attraction::Column::Category.eq(category));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new attraction.
    pub async fn create(&self, model: attraction::ActiveModel) -> AppResult<attraction::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search attractions by keyword over name, description and address.
    pub async fn search(
        &self,
        keyword: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<attraction::Model>> {
        Attraction::find()
            .filter(Self::keyword_condition(keyword))
            .order_by_desc(attraction::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count attractions matching a keyword.
    pub async fn search_count(&self, keyword: &str) -> AppResult<u64> {
        Attraction::find()
            .filter(Self::keyword_condition(keyword))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn keyword_condition(keyword: &str) -> Condition {
        Condition::any()
            .add(attraction::Column::Name.contains(keyword))
            .add(attraction::Column::Description.contains(keyword))
            .add(attraction::Column::Address.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn create_test_attraction(id: &str, name: &str) -> attraction::Model {
        attraction::Model {
            id: id.to_string(),
            name: name.to_string(),
            cover_image: None,
            images: json!([]),
            description: None,
            address: None,
            location: None,
            price: Some(60.0),
            opening_hours: None,
            tips: None,
            category: Some("temple".to_string()),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = AttractionRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_ids_batch() {
        let a1 = create_test_attraction("a1", "Kinkaku-ji");
        let a2 = create_test_attraction("a2", "Fushimi Inari");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[a1, a2]])
                .into_connection(),
        );

        let repo = AttractionRepository::new(db);
        let result = repo
            .find_by_ids(&["a1".to_string(), "a2".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_list_with_category() {
        let a1 = create_test_attraction("a1", "Kinkaku-ji");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[a1]])
                .into_connection(),
        );

        let repo = AttractionRepository::new(db);
        let result = repo.list(Some("temple"), 10, 0).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category.as_deref(), Some("temple"));
    }
}
