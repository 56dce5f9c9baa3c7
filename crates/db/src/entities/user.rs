//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Opaque identity key issued by the hosting platform.
    #[sea_orm(unique)]
    pub openid: String,

    /// Display name
    #[sea_orm(nullable)]
    pub nickname: Option<String>,

    /// Avatar URL
    #[sea_orm(nullable)]
    pub avatar: Option<String>,

    /// 0 = unknown, 1 = male, 2 = female
    #[sea_orm(default_value = 0)]
    pub gender: i32,

    #[sea_orm(nullable)]
    pub phone: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::travel_plan::Entity")]
    TravelPlans,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::travel_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelPlans.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
