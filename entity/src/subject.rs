use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Owning document kind for the polymorphic sub-collections
/// (reports, comments, reactions).
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    #[sea_orm(string_value = "donation")]
    Donation,
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "user")]
    User,
}
