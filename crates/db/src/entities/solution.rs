//! Solution entity (prepackaged itinerary template).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solution")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub cover_image: Option<String>,

    /// Template body. Never parsed into plan items here.
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    /// Trip duration in days.
    #[sea_orm(nullable)]
    pub duration: Option<i32>,

    #[sea_orm(nullable)]
    pub price_estimate: Option<f64>,

    /// 1-5.
    #[sea_orm(nullable)]
    pub difficulty: Option<i32>,

    #[sea_orm(default_value = 0)]
    pub view_count: i32,

    #[sea_orm(default_value = 0)]
    pub apply_count: i32,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::solution_application::Entity")]
    Applications,
}

impl Related<super::solution_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
