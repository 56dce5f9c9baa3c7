//! User follow service.

use std::collections::{HashMap, HashSet};

use sea_orm::Set;
use serde::Serialize;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{user, user_follow},
    repositories::{UserFollowRepository, UserRepository},
};

/// A follow listing entry, resolved to a user profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEntry {
    /// The listed user's openid.
    pub openid: String,
    /// Display name.
    pub nickname: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// When the edge was created.
    pub followed_at: chrono::DateTime<chrono::FixedOffset>,
    /// Whether the requesting identity follows the listed user.
    pub is_following: bool,
}

/// Social graph service.
#[derive(Clone)]
pub struct SocialService {
    follow_repo: UserFollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl SocialService {
    /// Create a new social service.
    #[must_use]
    pub const fn new(follow_repo: UserFollowRepository, user_repo: UserRepository) -> Self {
        Self {
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow another user. Self-follow is rejected; a duplicate edge
    /// is `Conflict` from the unique pair.
    pub async fn follow(&self, follower_id: &str, following_id: &str) -> AppResult<()> {
        if follower_id == following_id {
            return Err(AppError::Validation(
                "cannot follow yourself".to_string(),
            ));
        }

        let model = user_follow::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower_id.to_string()),
            following_id: Set(following_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.follow_repo.create(model).await?;
        Ok(())
    }

    /// Unfollow. Removing an edge that does not exist is `NotFound`.
    pub async fn unfollow(&self, follower_id: &str, following_id: &str) -> AppResult<()> {
        if self
            .follow_repo
            .delete_by_pair(follower_id, following_id)
            .await?
        {
            Ok(())
        } else {
            Err(AppError::NotFound("not following this user".to_string()))
        }
    }

    /// Users that `openid` follows, resolved to profiles. Edges whose
    /// user row is unknown are skipped.
    pub async fn following(
        &self,
        openid: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<FollowEntry>, u64)> {
        let edges = self.follow_repo.find_following(openid, limit, offset).await?;
        let total = self.follow_repo.count_following(openid).await?;

        let targets: Vec<String> = edges.iter().map(|e| e.following_id.clone()).collect();
        let users = self.resolve_users(&targets).await?;

        // Viewer of their own following list follows every listed user.
        let entries = edges
            .into_iter()
            .filter_map(|edge| {
                let user = users.get(&edge.following_id)?;
                Some(FollowEntry {
                    openid: edge.following_id,
                    nickname: user.nickname.clone(),
                    avatar: user.avatar.clone(),
                    followed_at: edge.created_at,
                    is_following: true,
                })
            })
            .collect();

        Ok((entries, total))
    }

    /// Users following `openid`, each annotated with whether `openid`
    /// follows them back.
    pub async fn followers(
        &self,
        openid: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<FollowEntry>, u64)> {
        let edges = self.follow_repo.find_followers(openid, limit, offset).await?;
        let total = self.follow_repo.count_followers(openid).await?;

        let sources: Vec<String> = edges.iter().map(|e| e.follower_id.clone()).collect();
        let users = self.resolve_users(&sources).await?;

        let followed_back: HashSet<String> = self
            .follow_repo
            .find_pairs(openid, &sources)
            .await?
            .into_iter()
            .map(|e| e.following_id)
            .collect();

        let entries = edges
            .into_iter()
            .filter_map(|edge| {
                let user = users.get(&edge.follower_id)?;
                let is_following = followed_back.contains(&edge.follower_id);
                Some(FollowEntry {
                    openid: edge.follower_id,
                    nickname: user.nickname.clone(),
                    avatar: user.avatar.clone(),
                    followed_at: edge.created_at,
                    is_following,
                })
            })
            .collect();

        Ok((entries, total))
    }

    async fn resolve_users(&self, openids: &[String]) -> AppResult<HashMap<String, user::Model>> {
        Ok(self
            .user_repo
            .find_by_openids(openids)
            .await?
            .into_iter()
            .map(|u| (u.openid.clone(), u))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_edge(id: &str, follower: &str, following: &str) -> user_follow::Model {
        user_follow::Model {
            id: id.to_string(),
            follower_id: follower.to_string(),
            following_id: following.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_user(id: &str, openid: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            openid: openid.to_string(),
            nickname: Some("traveler".to_string()),
            avatar: None,
            gender: 0,
            phone: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn service(
        follow_db: Arc<sea_orm::DatabaseConnection>,
        user_db: Arc<sea_orm::DatabaseConnection>,
    ) -> SocialService {
        SocialService::new(
            UserFollowRepository::new(follow_db),
            UserRepository::new(user_db),
        )
    }

    #[tokio::test]
    async fn test_follow_self_rejected() {
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(follow_db, user_db).follow("open-1", "open-1").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unfollow_without_edge_is_not_found() {
        let follow_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user_follow::Model>::new()])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(follow_db, user_db)
            .unfollow("open-1", "open-2")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_following_skips_unknown_users() {
        let e1 = create_test_edge("e1", "open-1", "open-2");
        let e2 = create_test_edge("e2", "open-1", "open-ghost");

        let follow_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(2))
                }]])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u2", "open-2")]])
                .into_connection(),
        );

        let (entries, total) = service(follow_db, user_db)
            .following("open-1", 10, 0)
            .await
            .unwrap();

        assert_eq!(total, 2);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].openid, "open-2");
        assert!(entries[0].is_following);
    }

    #[tokio::test]
    async fn test_followers_annotates_follow_back() {
        let e1 = create_test_edge("e1", "open-2", "open-1");
        let e2 = create_test_edge("e2", "open-3", "open-1");
        let back = create_test_edge("e3", "open-1", "open-2");

        let follow_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(2))
                }]])
                .append_query_results([[back]])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_user("u2", "open-2"),
                    create_test_user("u3", "open-3"),
                ]])
                .into_connection(),
        );

        let (entries, _) = service(follow_db, user_db)
            .followers("open-1", 10, 0)
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        let by_openid: std::collections::HashMap<_, _> =
            entries.iter().map(|e| (e.openid.as_str(), e)).collect();
        assert!(by_openid["open-2"].is_following);
        assert!(!by_openid["open-3"].is_following);
    }
}
