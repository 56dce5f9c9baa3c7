//! User follow repository.

use std::sync::Arc;

use crate::entities::{user_follow, UserFollow};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use travelcloud_common::{AppError, AppResult};

/// User follow repository for database operations.
#[derive(Clone)]
pub struct UserFollowRepository {
    db: Arc<DatabaseConnection>,
}

impl UserFollowRepository {
    /// Create a new user follow repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a follow edge by its (follower, following) pair.
    pub async fn find_by_pair(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> AppResult<Option<user_follow::Model>> {
        UserFollow::find()
            .filter(user_follow::Column::FollowerId.eq(follower_id))
            .filter(user_follow::Column::FollowingId.eq(following_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether follower follows following.
    pub async fn is_following(&self, follower_id: &str, following_id: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(follower_id, following_id).await?.is_some())
    }

    /// Edges from one follower into a set of users, one query.
    pub async fn find_pairs(
        &self,
        follower_id: &str,
        following_ids: &[String],
    ) -> AppResult<Vec<user_follow::Model>> {
        if following_ids.is_empty() {
            return Ok(Vec::new());
        }
        UserFollow::find()
            .filter(user_follow::Column::FollowerId.eq(follower_id))
            .filter(
                user_follow::Column::FollowingId.is_in(following_ids.iter().map(String::as_str)),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a follow edge. The unique index on the pair turns a
    /// duplicate into `Conflict`.
    pub async fn create(&self, model: user_follow::ActiveModel) -> AppResult<user_follow::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("already following".to_string())
            }
            _ => AppError::Database(e.to_string()),
        })
    }

    /// Remove a follow edge. Returns whether an edge existed.
    pub async fn delete_by_pair(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> AppResult<bool> {
        let edge = self.find_by_pair(follower_id, following_id).await?;
        match edge {
            Some(e) => {
                e.delete(self.db.as_ref())
                    .await
                    .map_err(|err| AppError::Database(err.to_string()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Users a user follows, newest edge first.
    pub async fn find_following(
        &self,
        follower_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<user_follow::Model>> {
        UserFollow::find()
            .filter(user_follow::Column::FollowerId.eq(follower_id))
            .order_by_desc(user_follow::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Users following a user, newest edge first.
    pub async fn find_followers(
        &self,
        following_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<user_follow::Model>> {
        UserFollow::find()
            .filter(user_follow::Column::FollowingId.eq(following_id))
            .order_by_desc(user_follow::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count users a user follows.
    pub async fn count_following(&self, follower_id: &str) -> AppResult<u64> {
        UserFollow::find()
            .filter(user_follow::Column::FollowerId.eq(follower_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count followers of a user.
    pub async fn count_followers(&self, following_id: &str) -> AppResult<u64> {
        UserFollow::find()
            .filter(user_follow::Column::FollowingId.eq(following_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
