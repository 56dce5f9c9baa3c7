//! Companion reservation entity and its status lifecycle.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reservation lifecycle.
///
/// Legal transitions: Pending → Confirmed → Completed, and
/// Pending/Confirmed → Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ReservationStatus {
    #[sea_orm(num_value = 0)]
    Pending,
    #[sea_orm(num_value = 1)]
    Confirmed,
    #[sea_orm(num_value = 2)]
    Completed,
    #[sea_orm(num_value = 3)]
    Cancelled,
}

impl ReservationStatus {
    /// Whether moving to `next` is a legal lifecycle step.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Completed)
                | (Self::Pending | Self::Confirmed, Self::Cancelled)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companion_reservation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub companion_id: String,

    /// Identity key of the booking user.
    pub user_id: String,

    pub start_date: Date,

    pub end_date: Date,

    #[sea_orm(default_value = 1)]
    pub traveler_count: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub special_needs: Option<String>,

    pub status: ReservationStatus,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companion::Entity",
        from = "Column::CompanionId",
        to = "super::companion::Column::Id",
        on_delete = "Cascade"
    )]
    Companion,

    #[sea_orm(has_many = "super::companion_review::Entity")]
    Reviews,
}

impl Related<super::companion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companion.def()
    }
}

impl Related<super::companion_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::ReservationStatus;

    #[test]
    fn test_legal_transitions() {
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Confirmed));
        assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Completed));
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Cancelled));
        assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!ReservationStatus::Pending.can_transition_to(ReservationStatus::Completed));
        assert!(!ReservationStatus::Completed.can_transition_to(ReservationStatus::Confirmed));
        assert!(!ReservationStatus::Completed.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Pending));
    }
}
