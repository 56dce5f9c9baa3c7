//! Solution application entity (a user applying a template).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solution_application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub solution_id: String,

    /// Identity key of the applying user.
    pub user_id: String,

    #[sea_orm(nullable)]
    pub travel_date: Option<Date>,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    /// Plan spawned from the application, when a travel date was given.
    #[sea_orm(nullable)]
    pub plan_id: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::solution::Entity",
        from = "Column::SolutionId",
        to = "super::solution::Column::Id",
        on_delete = "Cascade"
    )]
    Solution,

    #[sea_orm(
        belongs_to = "super::travel_plan::Entity",
        from = "Column::PlanId",
        to = "super::travel_plan::Column::Id"
    )]
    Plan,
}

impl Related<super::solution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Solution.def()
    }
}

impl Related<super::travel_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
