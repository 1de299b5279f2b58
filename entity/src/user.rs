use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// platform accounts

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub last_name: String,

    #[sea_orm(column_type = "Text")]
    pub email: String,
    pub phone: String,

    /// argon2 hash, never serialized in responses
    #[serde(skip_serializing)]
    pub password: String,

    pub role: Role,

    pub profile_photo: Option<String>,
    pub background_image: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    pub country: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,

    /// unix seconds, optional
    pub birthday: Option<i64>,

    pub availability: bool,
    pub gender: Option<Gender>,
    pub anonymity: bool,

    /// JSON array of interest strings
    pub interests: Json,

    pub xp_points: i64,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "donor")]
    Donor,
    #[sea_orm(string_value = "sponsor")]
    Sponsor,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(8))")]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
}

impl Model {
    pub fn interests(&self) -> Vec<String> {
        serde_json::from_value(self.interests.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
