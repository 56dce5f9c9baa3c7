//! Companion tag vocabulary entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companion_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::companion_tag_relation::Entity")]
    Relations,
}

impl Related<super::companion_tag_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Relations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
