//! Attraction entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attraction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(nullable)]
    pub cover_image: Option<String>,

    /// Ordered list of image URLs.
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub address: Option<String>,

    /// Geo coordinate as a "lat,lng" string.
    #[sea_orm(nullable)]
    pub location: Option<String>,

    /// Ticket price
    #[sea_orm(nullable)]
    pub price: Option<f64>,

    #[sea_orm(nullable)]
    pub opening_hours: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub tips: Option<String>,

    #[sea_orm(nullable)]
    pub category: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::travel_plan_item::Entity")]
    TravelPlanItems,
}

impl Related<super::travel_plan_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelPlanItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
