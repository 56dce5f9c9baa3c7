//! Travel plan entity (a user-owned itinerary).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "travel_plan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Identity key (openid) of the owning user.
    pub user_id: String,

    pub title: String,

    #[sea_orm(nullable)]
    pub start_date: Option<Date>,

    #[sea_orm(nullable)]
    pub end_date: Option<Date>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Openid",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::travel_plan_item::Entity")]
    Items,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::travel_plan_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use sea_orm::{Identity, RelationTrait};

    use super::Relation;

    // user_id carries the openid identity key, not the ULID primary key.
    #[test]
    fn test_user_relation_joins_on_openid() {
        let def = Relation::User.def();
        match def.to_col {
            Identity::Unary(col) => assert_eq!(col.to_string(), "openid"),
            other => panic!("unexpected join target: {other:?}"),
        }
    }
}
