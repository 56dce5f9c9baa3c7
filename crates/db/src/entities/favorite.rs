//! Favorite entity (polymorphic: a guide or an attraction).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind tag of a favorite target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    #[sea_orm(string_value = "guide")]
    Guide,
    #[sea_orm(string_value = "attraction")]
    Attraction,
}

impl FavoriteKind {
    /// Parse the wire-level kind string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guide" => Some(Self::Guide),
            "attraction" => Some(Self::Attraction),
            _ => None,
        }
    }

    /// Wire-level kind string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guide => "guide",
            Self::Attraction => "attraction",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Identity key (openid) of the user who favorited the item.
    pub user_id: String,

    /// Target kind tag.
    pub kind: FavoriteKind,

    /// Target row id, interpreted according to `kind`.
    pub item_id: String,

    pub created_at: DateTimeWithTimeZone,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
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
