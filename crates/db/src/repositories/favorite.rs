//! Favorite repository.

use std::sync::Arc;

use crate::entities::{favorite, favorite::FavoriteKind, Favorite};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use travelcloud_common::{AppError, AppResult};

/// Favorite repository for database operations.
#[derive(Clone)]
pub struct FavoriteRepository {
    db: Arc<DatabaseConnection>,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a favorite by its (user, kind, item) triple.
    pub async fn find_by_triple(
        &self,
        user_id: &str,
        kind: FavoriteKind,
        item_id: &str,
    ) -> AppResult<Option<favorite::Model>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::Kind.eq(kind))
            .filter(favorite::Column::ItemId.eq(item_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user has favorited an item.
    pub async fn is_favorited(
        &self,
        user_id: &str,
        kind: FavoriteKind,
        item_id: &str,
    ) -> AppResult<bool> {
        Ok(self.find_by_triple(user_id, kind, item_id).await?.is_some())
    }

    /// Insert a favorite. The composite unique index on
    /// (user_id, kind, item_id) backs the duplicate check, so a racing
    /// double-insert surfaces as `Conflict` rather than a second row.
    pub async fn create(&self, model: favorite::ActiveModel) -> AppResult<favorite::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("already favorited".to_string())
            }
            _ => AppError::Database(e.to_string()),
        })
    }

    /// Remove a favorite by triple. Removing an absent favorite is a no-op.
    pub async fn delete_by_triple(
        &self,
        user_id: &str,
        kind: FavoriteKind,
        item_id: &str,
    ) -> AppResult<()> {
        let favorite = self.find_by_triple(user_id, kind, item_id).await?;
        if let Some(f) = favorite {
            f.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// List a user's favorites, newest first, optionally restricted to a kind.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        kind: Option<FavoriteKind>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<favorite::Model>> {
        let mut query = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::Id);

        if let Some(kind) = kind {
            query = query.filter(favorite::Column::Kind.eq(kind));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a user's favorites, optionally restricted to a kind.
    pub async fn count_by_user(
        &self,
        user_id: &str,
        kind: Option<FavoriteKind>,
    ) -> AppResult<u64> {
        let mut query = Favorite::find().filter(favorite::Column::UserId.eq(user_id));

        if let Some(kind) = kind {
            query = query.filter(favorite::Column::Kind.eq(kind));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
