use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub sender_id: i32,
    pub recipient_id: i32,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// JSON array of media urls
    pub media: Json,

    pub chat_id: Option<i32>,

    pub created_at: i64,
}

impl Model {
    pub fn media_urls(&self) -> Vec<String> {
        serde_json::from_value(self.media.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
