use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// donated items, the root aggregate

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// offering user
    pub donor_id: i32,

    pub item: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub category: Category,

    pub status: Status,

    /// JSON array of media urls, append order
    pub media: Json,

    pub selected_recipient: Option<i32>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "shut_down")]
    ShutDown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(24))")]
pub enum Category {
    #[sea_orm(string_value = "Clothing")]
    Clothing,
    #[sea_orm(string_value = "Electronics")]
    Electronics,
    #[sea_orm(string_value = "Furniture")]
    Furniture,
    #[sea_orm(string_value = "Books")]
    Books,
    #[sea_orm(string_value = "Toys")]
    Toys,
    #[sea_orm(string_value = "Household Items")]
    #[serde(rename = "Household Items")]
    HouseholdItems,
    #[sea_orm(string_value = "Sports Equipment")]
    #[serde(rename = "Sports Equipment")]
    SportsEquipment,
    #[sea_orm(string_value = "Jewelry")]
    Jewelry,
    #[sea_orm(string_value = "Tools")]
    Tools,
    #[sea_orm(string_value = "Appliances")]
    Appliances,
    #[sea_orm(string_value = "Other")]
    Other,
}

impl Model {
    /// media urls in append order
    pub fn media_urls(&self) -> Vec<String> {
        serde_json::from_value(self.media.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::DonorId",
        to = "super::user::Column::Id"
    )]
    Donor,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
