use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// blog posts; reports, comments and reactions mirror the donation aggregate

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub author_id: i32,

    pub category: Category,

    pub status: Status,

    /// JSON array of media urls, append order
    pub media: Json,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
    #[sea_orm(string_value = "approved")]
    Approved,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[sea_orm(string_value = "askforhelp")]
    AskForHelp,
    #[sea_orm(string_value = "tips")]
    Tips,
    #[sea_orm(string_value = "successstories")]
    SuccessStories,
    #[sea_orm(string_value = "updates")]
    Updates,
    #[sea_orm(string_value = "other")]
    Other,
}

impl Model {
    pub fn media_urls(&self) -> Vec<String> {
        serde_json::from_value(self.media.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
