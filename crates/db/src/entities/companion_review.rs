//! Companion review entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companion_review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Reservation being reviewed. (reservation_id, user_id) is unique.
    pub reservation_id: String,

    /// Identity key of the reviewer.
    pub user_id: String,

    /// Denormalized for rating recomputation.
    pub companion_id: String,

    /// 1-5 inclusive.
    pub rating: f64,

    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    /// Comma-joined image URLs.
    #[sea_orm(nullable)]
    pub images: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companion_reservation::Entity",
        from = "Column::ReservationId",
        to = "super::companion_reservation::Column::Id",
        on_delete = "Cascade"
    )]
    Reservation,

    #[sea_orm(
        belongs_to = "super::companion::Entity",
        from = "Column::CompanionId",
        to = "super::companion::Column::Id",
        on_delete = "Cascade"
    )]
    Companion,
}

impl Related<super::companion_reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::companion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
