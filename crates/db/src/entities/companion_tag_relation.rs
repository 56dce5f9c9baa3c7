//! Companion/tag many-to-many join entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companion_tag_relation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub companion_id: String,

    pub tag_id: String,
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

    #[sea_orm(
        belongs_to = "super::companion_tag::Entity",
        from = "Column::TagId",
        to = "super::companion_tag::Column::Id",
        on_delete = "Cascade"
    )]
    Tag,
}

impl Related<super::companion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companion.def()
    }
}

impl Related<super::companion_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
