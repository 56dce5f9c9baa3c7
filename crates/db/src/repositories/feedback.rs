//! Feedback repository.

use std::sync::Arc;

use crate::entities::{feedback, Feedback};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use travelcloud_common::{AppError, AppResult};

/// Feedback repository for database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    db: Arc<DatabaseConnection>,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a feedback submission.
    pub async fn create(&self, model: feedback::ActiveModel) -> AppResult<feedback::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// A user's submissions, newest first.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<feedback::Model>> {
        Feedback::find()
            .filter(feedback::Column::UserId.eq(user_id))
            .order_by_desc(feedback::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a user's submissions.
    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        Feedback::find()
            .filter(feedback::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_user() {
        let f = feedback::Model {
            id: "fb1".to_string(),
            user_id: "open-1".to_string(),
            kind: "bug".to_string(),
            content: "map does not load".to_string(),
            contact: None,
            images: None,
            status: 0,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f]])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let result = repo.find_by_user("open-1", 10, 0).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, "bug");
    }
}
