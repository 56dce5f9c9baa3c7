//! News feed service.

use std::collections::HashSet;

use sea_orm::Set;
use serde::Serialize;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{news, news_comment, news_like},
    repositories::NewsRepository,
};

/// A news post annotated with the viewer's like state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEntry {
    /// The post itself.
    #[serde(flatten)]
    pub news: news::Model,
    /// Whether the requesting identity has liked it.
    pub is_liked: bool,
}

/// A top-level comment with its replies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    /// The top-level comment.
    #[serde(flatten)]
    pub comment: news_comment::Model,
    /// Replies, oldest first.
    pub replies: Vec<news_comment::Model>,
}

/// News service.
#[derive(Clone)]
pub struct NewsService {
    news_repo: NewsRepository,
    id_gen: IdGenerator,
}

impl NewsService {
    /// Create a new news service.
    #[must_use]
    pub const fn new(news_repo: NewsRepository) -> Self {
        Self {
            news_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List news, newest first, annotated with the viewer's like state.
    pub async fn list(
        &self,
        category: Option<&str>,
        viewer: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<NewsEntry>, u64)> {
        let posts = self.news_repo.list(category, limit, offset).await?;
        let total = self.news_repo.count(category).await?;

        let liked: HashSet<String> = match viewer {
            Some(user_id) => {
                let ids: Vec<String> = posts.iter().map(|n| n.id.clone()).collect();
                self.news_repo
                    .find_likes_by_user(&ids, user_id)
                    .await?
                    .into_iter()
                    .map(|l| l.news_id)
                    .collect()
            }
            None => HashSet::new(),
        };

        let entries = posts
            .into_iter()
            .map(|news| {
                let is_liked = liked.contains(&news.id);
                NewsEntry { news, is_liked }
            })
            .collect();

        Ok((entries, total))
    }

    /// News detail. Bumps the view counter.
    pub async fn detail(&self, id: &str, viewer: Option<&str>) -> AppResult<NewsEntry> {
        let news = self
            .news_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("news not found".to_string()))?;

        self.news_repo.increment_view_count(id).await?;

        let is_liked = match viewer {
            Some(user_id) => self.news_repo.find_like(id, user_id).await?.is_some(),
            None => false,
        };

        Ok(NewsEntry { news, is_liked })
    }

    /// Like a post. A duplicate like is `Conflict` from the unique pair.
    pub async fn like(&self, news_id: &str, user_id: &str) -> AppResult<()> {
        self.news_repo
            .find_by_id(news_id)
            .await?
            .ok_or_else(|| AppError::NotFound("news not found".to_string()))?;

        let model = news_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            news_id: Set(news_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.news_repo.create_like(model).await?;
        self.news_repo.increment_like_count(news_id).await
    }

    /// Unlike a post. The counter only moves when an edge was removed,
    /// and never drops below zero.
    pub async fn unlike(&self, news_id: &str, user_id: &str) -> AppResult<()> {
        if self.news_repo.delete_like(news_id, user_id).await? {
            self.news_repo.decrement_like_count(news_id).await?;
        }
        Ok(())
    }

    /// Comment threads of a post: a page of top-level comments newest
    /// first, each with replies oldest first.
    pub async fn comments(
        &self,
        news_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<CommentThread>, u64)> {
        let top_level = self
            .news_repo
            .find_top_level_comments(news_id, limit, offset)
            .await?;
        let total = self.news_repo.count_top_level_comments(news_id).await?;

        let parent_ids: Vec<String> = top_level.iter().map(|c| c.id.clone()).collect();
        let replies = self.news_repo.find_replies(&parent_ids).await?;

        let mut by_parent: std::collections::HashMap<String, Vec<news_comment::Model>> =
            std::collections::HashMap::new();
        for reply in replies {
            if let Some(parent_id) = reply.parent_id.clone() {
                by_parent.entry(parent_id).or_default().push(reply);
            }
        }

        let threads = top_level
            .into_iter()
            .map(|comment| {
                let replies = by_parent.remove(&comment.id).unwrap_or_default();
                CommentThread { comment, replies }
            })
            .collect();

        Ok((threads, total))
    }

    /// Post a comment or a reply. A reply's parent must exist and
    /// belong to the same post.
    pub async fn comment(
        &self,
        news_id: &str,
        user_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> AppResult<news_comment::Model> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        self.news_repo
            .find_by_id(news_id)
            .await?
            .ok_or_else(|| AppError::NotFound("news not found".to_string()))?;

        if let Some(parent_id) = parent_id {
            let parent = self
                .news_repo
                .find_comment_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::NotFound("parent comment not found".to_string()))?;
            if parent.news_id != news_id {
                return Err(AppError::Validation(
                    "parent comment belongs to another post".to_string(),
                ));
            }
        }

        let model = news_comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            news_id: Set(news_id.to_string()),
            user_id: Set(user_id.to_string()),
            content: Set(content.to_string()),
            parent_id: Set(parent_id.map(str::to_string)),
            created_at: Set(chrono::Utc::now().into()),
        };
        let comment = self.news_repo.create_comment(model).await?;
        self.news_repo.increment_comment_count(news_id).await?;

        Ok(comment)
    }
}
