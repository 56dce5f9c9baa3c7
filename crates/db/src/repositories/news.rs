//! News, like and comment repositories.

use std::sync::Arc;

use crate::entities::{
    news, news_comment, news_like, News, NewsComment, NewsLike,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use travelcloud_common::{AppError, AppResult};

/// News repository for database operations.
#[derive(Clone)]
pub struct NewsRepository {
    db: Arc<DatabaseConnection>,
}

impl NewsRepository {
    /// Create a new news repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a news post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<news::Model>> {
        News::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List news, newest first, with an optional category filter.
    pub async fn list(
        &self,
        category: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<news::Model>> {
        let mut query = News::find().order_by_desc(news::Column::CreatedAt);

        if let Some(category) = category {
            query = query.filter(news::Column::Category.eq(category));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count news, with an optional category filter.
    pub async fn count(&self, category: Option<&str>) -> AppResult<u64> {
        let mut query = News::find();

        if let Some(category) = category {
            query = query.filter(news::Column::Category.eq(category));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment view count atomically (single UPDATE query, no fetch).
    pub async fn increment_view_count(&self, id: &str) -> AppResult<()> {
        News::update_many()
            .col_expr(
                news::Column::ViewCount,
                Expr::col(news::Column::ViewCount).add(1),
            )
            .filter(news::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment like count atomically.
    pub async fn increment_like_count(&self, id: &str) -> AppResult<()> {
        News::update_many()
            .col_expr(
                news::Column::LikeCount,
                Expr::col(news::Column::LikeCount).add(1),
            )
            .filter(news::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement like count atomically, clamped at zero.
    pub async fn decrement_like_count(&self, id: &str) -> AppResult<()> {
        News::update_many()
            .col_expr(
                news::Column::LikeCount,
                Expr::cust("GREATEST(like_count - 1, 0)"),
            )
            .filter(news::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment comment count atomically.
    pub async fn increment_comment_count(&self, id: &str) -> AppResult<()> {
        News::update_many()
            .col_expr(
                news::Column::CommentCount,
                Expr::col(news::Column::CommentCount).add(1),
            )
            .filter(news::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Find a like by its (news, user) pair.
    pub async fn find_like(
        &self,
        news_id: &str,
        user_id: &str,
    ) -> AppResult<Option<news_like::Model>> {
        NewsLike::find()
            .filter(news_like::Column::NewsId.eq(news_id))
            .filter(news_like::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Likes a user holds over a set of news posts, one query.
    pub async fn find_likes_by_user(
        &self,
        news_ids: &[String],
        user_id: &str,
    ) -> AppResult<Vec<news_like::Model>> {
        if news_ids.is_empty() {
            return Ok(Vec::new());
        }
        NewsLike::find()
            .filter(news_like::Column::NewsId.is_in(news_ids.iter().map(String::as_str)))
            .filter(news_like::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a like. The unique index on (news_id, user_id) turns a
    /// duplicate into `Conflict`.
    pub async fn create_like(&self, model: news_like::ActiveModel) -> AppResult<news_like::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("already liked".to_string())
            }
            _ => AppError::Database(e.to_string()),
        })
    }

    /// Remove a like. Returns whether an edge existed.
    pub async fn delete_like(&self, news_id: &str, user_id: &str) -> AppResult<bool> {
        let like = self.find_like(news_id, user_id).await?;
        match like {
            Some(l) => {
                l.delete(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Find a comment by ID.
    pub async fn find_comment_by_id(&self, id: &str) -> AppResult<Option<news_comment::Model>> {
        NewsComment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a comment.
    pub async fn create_comment(
        &self,
        model: news_comment::ActiveModel,
    ) -> AppResult<news_comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Top-level comments of a post, newest first.
    pub async fn find_top_level_comments(
        &self,
        news_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<news_comment::Model>> {
        NewsComment::find()
            .filter(news_comment::Column::NewsId.eq(news_id))
            .filter(news_comment::Column::ParentId.is_null())
            .order_by_desc(news_comment::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count top-level comments of a post.
    pub async fn count_top_level_comments(&self, news_id: &str) -> AppResult<u64> {
        NewsComment::find()
            .filter(news_comment::Column::NewsId.eq(news_id))
            .filter(news_comment::Column::ParentId.is_null())
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replies under a set of parent comments, oldest first, one query.
    pub async fn find_replies(
        &self,
        parent_ids: &[String],
    ) -> AppResult<Vec<news_comment::Model>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        NewsComment::find()
            .filter(news_comment::Column::ParentId.is_in(parent_ids.iter().map(String::as_str)))
            .order_by_asc(news_comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search news by keyword over title and content.
    pub async fn search(
        &self,
        keyword: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<news::Model>> {
        News::find()
            .filter(Self::keyword_condition(keyword))
            .order_by_desc(news::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count news matching a keyword.
    pub async fn search_count(&self, keyword: &str) -> AppResult<u64> {
        News::find()
            .filter(Self::keyword_condition(keyword))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn keyword_condition(keyword: &str) -> Condition {
        Condition::any()
            .add(news::Column::Title.contains(keyword))
            .add(news::Column::Content.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_news(id: &str, title: &str) -> news::Model {
        news::Model {
            id: id.to_string(),
            title: title.to_string(),
            content: None,
            cover_image: None,
            author_id: None,
            category: None,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_comment(id: &str, parent_id: Option<&str>) -> news_comment::Model {
        news_comment::Model {
            id: id.to_string(),
            news_id: "n1".to_string(),
            user_id: "open-1".to_string(),
            content: "nice".to_string(),
            parent_id: parent_id.map(str::to_string),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_list() {
        let n1 = create_test_news("n1", "Cherry blossom forecast");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[n1]])
                .into_connection(),
        );

        let repo = NewsRepository::new(db);
        let result = repo.list(None, 10, 0).await.unwrap();

        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_like_absent_returns_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<news_like::Model>::new()])
                .into_connection(),
        );

        let repo = NewsRepository::new(db);
        let deleted = repo.delete_like("n1", "open-1").await.unwrap();

        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_delete_like_existing_returns_true() {
        let like = news_like::Model {
            id: "l1".to_string(),
            news_id: "n1".to_string(),
            user_id: "open-1".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = NewsRepository::new(db);
        let deleted = repo.delete_like("n1", "open-1").await.unwrap();

        assert!(deleted);
    }

    #[tokio::test]
    async fn test_find_replies_empty_skips_query() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = NewsRepository::new(db);
        let result = repo.find_replies(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_top_level_comments() {
        let c1 = create_test_comment("c2", None);
        let c2 = create_test_comment("c1", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = NewsRepository::new(db);
        let result = repo.find_top_level_comments("n1", 10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.parent_id.is_none()));
    }

    #[tokio::test]
    async fn test_decrement_like_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = NewsRepository::new(db);
        assert!(repo.decrement_like_count("n1").await.is_ok());
    }
}
