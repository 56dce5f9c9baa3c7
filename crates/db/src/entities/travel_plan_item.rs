//! Travel plan item entity (one stop within an itinerary day).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "travel_plan_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning plan; rows cascade away with it.
    pub plan_id: String,

    /// 1-based day number within the plan. No upper bound is enforced.
    pub day: i32,

    /// Optional attraction reference. May dangle; readers resolve it
    /// defensively and surface null instead of an error.
    #[sea_orm(nullable)]
    pub attraction_id: Option<String>,

    /// Freeform label such as "morning" or "afternoon".
    #[sea_orm(nullable)]
    pub time_period: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::travel_plan::Entity",
        from = "Column::PlanId",
        to = "super::travel_plan::Column::Id",
        on_delete = "Cascade"
    )]
    Plan,

    #[sea_orm(
        belongs_to = "super::attraction::Entity",
        from = "Column::AttractionId",
        to = "super::attraction::Column::Id"
    )]
    Attraction,
}

impl Related<super::travel_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attraction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
