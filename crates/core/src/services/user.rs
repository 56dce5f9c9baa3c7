//! User account service.

use sea_orm::Set;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{entities::user, repositories::UserRepository};

/// Profile fields carried by login and update requests.
#[derive(Debug, Default, Clone)]
pub struct UserProfilePatch {
    /// Display name.
    pub nickname: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// 0 unknown, 1 male, 2 female.
    pub gender: Option<i32>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// User service for login and profile management.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Log a user in by openid. Creates the account on first login,
    /// refreshes the profile otherwise.
    pub async fn login(&self, openid: &str, patch: UserProfilePatch) -> AppResult<user::Model> {
        if let Some(existing) = self.user_repo.find_by_openid(openid).await? {
            if patch.nickname.is_none() && patch.avatar.is_none() {
                return Ok(existing);
            }
            let mut active: user::ActiveModel = existing.into();
            if let Some(nickname) = patch.nickname {
                active.nickname = Set(Some(nickname));
            }
            if let Some(avatar) = patch.avatar {
                active.avatar = Set(Some(avatar));
            }
            active.updated_at = Set(chrono::Utc::now().into());
            return self.user_repo.update(active).await;
        }

        tracing::info!(openid = openid, "First login, creating user");

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            openid: Set(openid.to_string()),
            nickname: Set(patch.nickname),
            avatar: Set(patch.avatar),
            gender: Set(patch.gender.unwrap_or(0)),
            phone: Set(patch.phone),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };
        self.user_repo.create(model).await
    }

    /// Update the profile of an existing user.
    pub async fn update_profile(
        &self,
        openid: &str,
        patch: UserProfilePatch,
    ) -> AppResult<user::Model> {
        let existing = self
            .user_repo
            .find_by_openid(openid)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        let mut active: user::ActiveModel = existing.into();
        if let Some(nickname) = patch.nickname {
            active.nickname = Set(Some(nickname));
        }
        if let Some(avatar) = patch.avatar {
            active.avatar = Set(Some(avatar));
        }
        if let Some(gender) = patch.gender {
            active.gender = Set(gender);
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(Some(phone));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        self.user_repo.update(active).await
    }

    /// Fetch a user's profile by openid.
    pub async fn get_profile(&self, openid: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_openid(openid)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

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

    #[tokio::test]
    async fn test_login_existing_without_patch_returns_as_is() {
        let user = create_test_user("u1", "open-1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service
            .login("open-1", UserProfilePatch::default())
            .await
            .unwrap();

        assert_eq!(result.id, "u1");
        assert_eq!(result.nickname.as_deref(), Some("traveler"));
    }

    #[tokio::test]
    async fn test_login_first_time_creates_account() {
        let created = create_test_user("u1", "open-new");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .append_query_results([[created.clone()]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service
            .login("open-new", UserProfilePatch::default())
            .await
            .unwrap();

        assert_eq!(result.openid, "open-new");
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service
            .update_profile("unknown", UserProfilePatch::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
