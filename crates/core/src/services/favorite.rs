//! Favorites service over guides and attractions.

use std::collections::HashMap;

use sea_orm::Set;
use serde::Serialize;
use serde_json::json;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{favorite, favorite::FavoriteKind},
    repositories::{AttractionRepository, FavoriteRepository, TravelGuideRepository},
};

/// A favorite target parsed from the wire `type` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteTarget {
    /// A travel guide.
    Guide(String),
    /// An attraction.
    Attraction(String),
}

impl FavoriteTarget {
    /// Parse a (kind, id) pair. Unknown kinds are a validation error.
    pub fn parse(kind: &str, item_id: &str) -> AppResult<Self> {
        match FavoriteKind::parse(kind) {
            Some(FavoriteKind::Guide) => Ok(Self::Guide(item_id.to_string())),
            Some(FavoriteKind::Attraction) => Ok(Self::Attraction(item_id.to_string())),
            None => Err(AppError::Validation(format!(
                "unknown favorite type: {kind}"
            ))),
        }
    }

    /// The kind tag.
    #[must_use]
    pub const fn kind(&self) -> FavoriteKind {
        match self {
            Self::Guide(_) => FavoriteKind::Guide,
            Self::Attraction(_) => FavoriteKind::Attraction,
        }
    }

    /// The target row id.
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            Self::Guide(id) | Self::Attraction(id) => id,
        }
    }
}

/// A favorite with its target resolved to a display summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    /// Favorite row id.
    pub id: String,
    /// Kind tag ("guide" or "attraction").
    #[serde(rename = "type")]
    pub kind: String,
    /// Target row id.
    pub item_id: String,
    /// Resolved target summary.
    pub item: serde_json::Value,
    /// When the favorite was created.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Favorite service.
#[derive(Clone)]
pub struct FavoriteService {
    favorite_repo: FavoriteRepository,
    guide_repo: TravelGuideRepository,
    attraction_repo: AttractionRepository,
    id_gen: IdGenerator,
}

impl FavoriteService {
    /// Create a new favorite service.
    #[must_use]
    pub const fn new(
        favorite_repo: FavoriteRepository,
        guide_repo: TravelGuideRepository,
        attraction_repo: AttractionRepository,
    ) -> Self {
        Self {
            favorite_repo,
            guide_repo,
            attraction_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Favorite a target. The target row must exist; duplicates surface
    /// as `Conflict` from the unique index rather than a pre-check.
    pub async fn add(&self, user_id: &str, target: &FavoriteTarget) -> AppResult<favorite::Model> {
        match target {
            FavoriteTarget::Guide(id) => {
                self.guide_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("guide not found".to_string()))?;
            }
            FavoriteTarget::Attraction(id) => {
                self.attraction_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("attraction not found".to_string()))?;
            }
        }

        let model = favorite::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            kind: Set(target.kind()),
            item_id: Set(target.item_id().to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.favorite_repo.create(model).await
    }

    /// Unfavorite a target. Removing an absent favorite succeeds.
    pub async fn remove(&self, user_id: &str, target: &FavoriteTarget) -> AppResult<()> {
        self.favorite_repo
            .delete_by_triple(user_id, target.kind(), target.item_id())
            .await
    }

    /// A user's favorites with targets resolved. Favorites whose target
    /// row is gone are dropped from the listing.
    pub async fn list(
        &self,
        user_id: &str,
        kind: Option<FavoriteKind>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<FavoriteEntry>, u64)> {
        let favorites = self
            .favorite_repo
            .find_by_user(user_id, kind, limit, offset)
            .await?;
        let total = self.favorite_repo.count_by_user(user_id, kind).await?;

        let guide_ids: Vec<String> = favorites
            .iter()
            .filter(|f| f.kind == FavoriteKind::Guide)
            .map(|f| f.item_id.clone())
            .collect();
        let attraction_ids: Vec<String> = favorites
            .iter()
            .filter(|f| f.kind == FavoriteKind::Attraction)
            .map(|f| f.item_id.clone())
            .collect();

        let guides: HashMap<String, serde_json::Value> = self
            .guide_repo
            .find_by_ids(&guide_ids)
            .await?
            .into_iter()
            .map(|g| {
                (
                    g.id.clone(),
                    json!({
                        "id": g.id,
                        "title": g.title,
                        "coverImage": g.cover_image,
                        "description": g.description,
                        "viewCount": g.view_count,
                    }),
                )
            })
            .collect();
        let attractions: HashMap<String, serde_json::Value> = self
            .attraction_repo
            .find_by_ids(&attraction_ids)
            .await?
            .into_iter()
            .map(|a| {
                (
                    a.id.clone(),
                    json!({
                        "id": a.id,
                        "name": a.name,
                        "coverImage": a.cover_image,
                        "address": a.address,
                        "price": a.price,
                    }),
                )
            })
            .collect();

        let entries = favorites
            .into_iter()
            .filter_map(|f| {
                let item = match f.kind {
                    FavoriteKind::Guide => guides.get(&f.item_id),
                    FavoriteKind::Attraction => attractions.get(&f.item_id),
                }?;
                Some(FavoriteEntry {
                    id: f.id,
                    kind: f.kind.as_str().to_string(),
                    item_id: f.item_id,
                    item: item.clone(),
                    created_at: f.created_at,
                })
            })
            .collect();

        Ok((entries, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use travelcloud_db::entities::travel_guide;

    fn create_test_favorite(id: &str, kind: FavoriteKind, item_id: &str) -> favorite::Model {
        favorite::Model {
            id: id.to_string(),
            user_id: "open-1".to_string(),
            kind,
            item_id: item_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_guide(id: &str) -> travel_guide::Model {
        travel_guide::Model {
            id: id.to_string(),
            title: "Kyoto".to_string(),
            cover_image: None,
            description: None,
            content: None,
            author: None,
            view_count: 0,
            like_count: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn service(
        fav_db: Arc<sea_orm::DatabaseConnection>,
        guide_db: Arc<sea_orm::DatabaseConnection>,
        attraction_db: Arc<sea_orm::DatabaseConnection>,
    ) -> FavoriteService {
        FavoriteService::new(
            FavoriteRepository::new(fav_db),
            TravelGuideRepository::new(guide_db),
            AttractionRepository::new(attraction_db),
        )
    }

    #[test]
    fn test_parse_target() {
        assert!(matches!(
            FavoriteTarget::parse("guide", "g1"),
            Ok(FavoriteTarget::Guide(_))
        ));
        assert!(matches!(
            FavoriteTarget::parse("attraction", "a1"),
            Ok(FavoriteTarget::Attraction(_))
        ));
        assert!(matches!(
            FavoriteTarget::parse("hotel", "h1"),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_add_missing_target() {
        let fav_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let guide_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<travel_guide::Model>::new()])
                .into_connection(),
        );
        let attraction_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(fav_db, guide_db, attraction_db);
        let target = FavoriteTarget::Guide("missing".to_string());
        let result = service.add("open-1", &target).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_absent_is_ok() {
        let fav_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<favorite::Model>::new()])
                .into_connection(),
        );
        let guide_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let attraction_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(fav_db, guide_db, attraction_db);
        let target = FavoriteTarget::Attraction("a1".to_string());

        assert!(service.remove("open-1", &target).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_drops_dangling_targets() {
        let f1 = create_test_favorite("f1", FavoriteKind::Guide, "g1");
        let f2 = create_test_favorite("f2", FavoriteKind::Guide, "g-gone");

        let fav_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1, f2]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(2))
                }]])
                .into_connection(),
        );
        let guide_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_guide("g1")]])
                .into_connection(),
        );
        let attraction_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(fav_db, guide_db, attraction_db);
        let (entries, _) = service
            .list("open-1", Some(FavoriteKind::Guide), 10, 0)
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item_id, "g1");
    }
}
