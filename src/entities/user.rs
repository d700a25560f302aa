use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(12))")]
    pub username: String,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub avatar: String,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub bio: String,
    pub created_on: DateTime,
    pub modified_on: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::social_id::Entity")]
    SocialId,
    #[sea_orm(has_one = "super::member::Entity")]
    Member,
}

impl Related<super::social_id::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialId.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

// The insert-time timestamp is stamped by `profile::before_insert`, called from
// the persistence layer, not from an ORM hook.
impl ActiveModelBehavior for ActiveModel {}
