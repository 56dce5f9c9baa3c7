//! News entity (feed articles and posts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    #[sea_orm(nullable)]
    pub cover_image: Option<String>,

    /// Identity key of the author, when user-posted.
    #[sea_orm(nullable)]
    pub author_id: Option<String>,

    #[sea_orm(nullable)]
    pub category: Option<String>,

    #[sea_orm(default_value = 0)]
    pub view_count: i32,

    #[sea_orm(default_value = 0)]
    pub like_count: i32,

    #[sea_orm(default_value = 0)]
    pub comment_count: i32,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::news_like::Entity")]
    Likes,
    #[sea_orm(has_many = "super::news_comment::Entity")]
    Comments,
}

impl Related<super::news_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::news_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
