use sea_orm::entity::prelude::*;
use serde::Serialize;

/// conversation groupings; members is a JSON array of user ids

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "chats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub members: Json,

    pub created_at: i64,
}

impl Model {
    pub fn member_ids(&self) -> Vec<i32> {
        serde_json::from_value(self.members.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
