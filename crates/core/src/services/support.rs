//! Feedback and about-info service.

use sea_orm::Set;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{about_info, feedback},
    repositories::{AboutInfoRepository, FeedbackRepository},
};

/// Fields of a feedback submission.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    /// Category such as "bug" or "suggestion".
    pub kind: String,
    /// What the user wrote.
    pub content: String,
    /// Optional way to reach them.
    pub contact: Option<String>,
    /// Screenshot URLs.
    pub images: Vec<String>,
}

/// Support service.
#[derive(Clone)]
pub struct SupportService {
    feedback_repo: FeedbackRepository,
    about_repo: AboutInfoRepository,
    id_gen: IdGenerator,
}

impl SupportService {
    /// Create a new support service.
    #[must_use]
    pub const fn new(feedback_repo: FeedbackRepository, about_repo: AboutInfoRepository) -> Self {
        Self {
            feedback_repo,
            about_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record a feedback submission, status starts unprocessed.
    pub async fn submit_feedback(
        &self,
        user_id: &str,
        new: NewFeedback,
    ) -> AppResult<feedback::Model> {
        if new.content.trim().is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        let images = if new.images.is_empty() {
            None
        } else {
            Some(new.images.join(","))
        };

        let model = feedback::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            kind: Set(new.kind),
            content: Set(new.content),
            contact: Set(new.contact),
            images: Set(images),
            status: Set(0),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.feedback_repo.create(model).await
    }

    /// The caller's own feedback submissions, newest first.
    pub async fn my_feedback(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<feedback::Model>, u64)> {
        let entries = self.feedback_repo.find_by_user(user_id, limit, offset).await?;
        let total = self.feedback_repo.count_by_user(user_id).await?;
        Ok((entries, total))
    }

    /// About-page content by kind.
    pub async fn about(&self, kind: &str) -> AppResult<about_info::Model> {
        self.about_repo
            .find_by_kind(kind)
            .await?
            .ok_or_else(|| AppError::NotFound("about info not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(
        feedback_db: Arc<sea_orm::DatabaseConnection>,
        about_db: Arc<sea_orm::DatabaseConnection>,
    ) -> SupportService {
        SupportService::new(
            FeedbackRepository::new(feedback_db),
            AboutInfoRepository::new(about_db),
        )
    }

    #[tokio::test]
    async fn test_submit_feedback_requires_content() {
        let feedback_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let about_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(feedback_db, about_db)
            .submit_feedback(
                "open-1",
                NewFeedback {
                    kind: "bug".to_string(),
                    content: " ".to_string(),
                    contact: None,
                    images: Vec::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_about_missing_kind() {
        let feedback_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let about_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<about_info::Model>::new()])
                .into_connection(),
        );

        let result = service(feedback_db, about_db).about("careers").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
