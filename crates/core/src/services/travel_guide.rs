//! Travel guide service.

use sea_orm::Set;
use serde::Serialize;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{favorite::FavoriteKind, travel_guide},
    repositories::{FavoriteRepository, TravelGuideRepository},
};

/// Guide detail with the viewer's favorite state resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideDetail {
    /// The guide itself.
    #[serde(flatten)]
    pub guide: travel_guide::Model,
    /// Whether the requesting identity has favorited it.
    pub is_favorite: bool,
}

/// Fields of a new guide.
#[derive(Debug, Clone)]
pub struct NewGuide {
    /// Required title.
    pub title: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Long-form body.
    pub content: Option<String>,
    /// Display name of the author.
    pub author: Option<String>,
}

/// Travel guide service.
#[derive(Clone)]
pub struct TravelGuideService {
    guide_repo: TravelGuideRepository,
    favorite_repo: FavoriteRepository,
    id_gen: IdGenerator,
}

impl TravelGuideService {
    /// Create a new travel guide service.
    #[must_use]
    pub const fn new(guide_repo: TravelGuideRepository, favorite_repo: FavoriteRepository) -> Self {
        Self {
            guide_repo,
            favorite_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List guides, newest first.
    pub async fn list(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<travel_guide::Model>, u64)> {
        let guides = self.guide_repo.list(limit, offset).await?;
        let total = self.guide_repo.count().await?;
        Ok((guides, total))
    }

    /// Guide detail. Bumps the view counter and resolves the viewer's
    /// favorite state when an identity is present.
    pub async fn detail(&self, id: &str, viewer: Option<&str>) -> AppResult<GuideDetail> {
        let guide = self
            .guide_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("guide not found".to_string()))?;

        self.guide_repo.increment_view_count(id).await?;

        let is_favorite = match viewer {
            Some(user_id) => {
                self.favorite_repo
                    .is_favorited(user_id, FavoriteKind::Guide, id)
                    .await?
            }
            None => false,
        };

        Ok(GuideDetail { guide, is_favorite })
    }

    /// Create a guide.
    pub async fn create(&self, new: NewGuide) -> AppResult<travel_guide::Model> {
        if new.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        let model = travel_guide::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(new.title),
            cover_image: Set(new.cover_image),
            description: Set(new.description),
            content: Set(new.content),
            author: Set(new.author),
            view_count: Set(0),
            like_count: Set(0),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };
        self.guide_repo.create(model).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use travelcloud_db::entities::favorite;

    fn create_test_guide(id: &str) -> travel_guide::Model {
        travel_guide::Model {
            id: id.to_string(),
            title: "Three days in Kyoto".to_string(),
            cover_image: None,
            description: None,
            content: None,
            author: None,
            view_count: 3,
            like_count: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_detail_missing_guide() {
        let guide_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<travel_guide::Model>::new()])
                .into_connection(),
        );
        let fav_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TravelGuideService::new(
            TravelGuideRepository::new(guide_db),
            FavoriteRepository::new(fav_db),
        );

        let result = service.detail("missing", None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_detail_anonymous_has_no_favorite() {
        let guide = create_test_guide("g1");

        let guide_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[guide]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let fav_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TravelGuideService::new(
            TravelGuideRepository::new(guide_db),
            FavoriteRepository::new(fav_db),
        );

        let detail = service.detail("g1", None).await.unwrap();
        assert!(!detail.is_favorite);
    }

    #[tokio::test]
    async fn test_detail_with_viewer_resolves_favorite() {
        let guide = create_test_guide("g1");
        let fav = favorite::Model {
            id: "f1".to_string(),
            user_id: "open-1".to_string(),
            kind: FavoriteKind::Guide,
            item_id: "g1".to_string(),
            created_at: Utc::now().into(),
        };

        let guide_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[guide]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let fav_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[fav]])
                .into_connection(),
        );

        let service = TravelGuideService::new(
            TravelGuideRepository::new(guide_db),
            FavoriteRepository::new(fav_db),
        );

        let detail = service.detail("g1", Some("open-1")).await.unwrap();
        assert!(detail.is_favorite);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let guide_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let fav_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TravelGuideService::new(
            TravelGuideRepository::new(guide_db),
            FavoriteRepository::new(fav_db),
        );

        let result = service
            .create(NewGuide {
                title: "  ".to_string(),
                cover_image: None,
                description: None,
                content: None,
                author: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
