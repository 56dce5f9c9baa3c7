//! Attraction catalogue service.

use travelcloud_common::{AppError, AppResult};
use travelcloud_db::{entities::attraction, repositories::AttractionRepository};

/// Attraction service.
#[derive(Clone)]
pub struct AttractionService {
    attraction_repo: AttractionRepository,
}

impl AttractionService {
    /// Create a new attraction service.
    #[must_use]
    pub const fn new(attraction_repo: AttractionRepository) -> Self {
        Self { attraction_repo }
    }

    /// List attractions with an optional category filter.
    pub async fn list(
        &self,
        category: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<attraction::Model>, u64)> {
        let attractions = self.attraction_repo.list(category, limit, offset).await?;
        let total = self.attraction_repo.count(category).await?;
        Ok((attractions, total))
    }

    /// Attraction detail.
    pub async fn detail(&self, id: &str) -> AppResult<attraction::Model> {
        self.attraction_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("attraction not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_attraction(id: &str) -> attraction::Model {
        attraction::Model {
            id: id.to_string(),
            name: "Kinkaku-ji".to_string(),
            cover_image: None,
            images: json!([]),
            description: None,
            address: None,
            location: Some("35.0394,135.7292".to_string()),
            price: Some(500.0),
            opening_hours: None,
            tips: None,
            category: Some("temple".to_string()),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_detail_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_attraction("a1")]])
                .into_connection(),
        );

        let service = AttractionService::new(AttractionRepository::new(db));
        let result = service.detail("a1").await.unwrap();

        assert_eq!(result.name, "Kinkaku-ji");
    }

    #[tokio::test]
    async fn test_detail_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<attraction::Model>::new()])
                .into_connection(),
        );

        let service = AttractionService::new(AttractionRepository::new(db));
        let result = service.detail("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
