//! Companion entity (a bookable travel-guide profile).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companion")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Identity key of the user behind this profile.
    pub user_id: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub avatar: Option<String>,

    #[sea_orm(nullable)]
    pub cover_image: Option<String>,

    /// Price per day.
    pub price: f64,

    #[sea_orm(nullable)]
    pub location: Option<String>,

    #[sea_orm(default_value = 0)]
    pub experience_years: i32,

    /// Comma-joined language list.
    #[sea_orm(nullable)]
    pub languages: Option<String>,

    /// Running average of review ratings.
    #[sea_orm(default_value = 0.0)]
    pub rating: f64,

    #[sea_orm(default_value = 0)]
    pub review_count: i32,

    /// 1 = active and listed, 0 = hidden.
    #[sea_orm(default_value = 1)]
    pub status: i32,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::companion_reservation::Entity")]
    Reservations,
    #[sea_orm(has_many = "super::companion_review::Entity")]
    Reviews,
}

impl Related<super::companion_reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::companion_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
