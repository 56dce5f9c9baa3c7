//! Feedback entity (support submissions).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Identity key of the submitting user.
    pub user_id: String,

    /// Feedback category, freeform ("bug", "suggestion", ...).
    pub kind: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(nullable)]
    pub contact: Option<String>,

    /// Comma-joined image URLs.
    #[sea_orm(nullable)]
    pub images: Option<String>,

    /// 0 = unprocessed.
    #[sea_orm(default_value = 0)]
    pub status: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
