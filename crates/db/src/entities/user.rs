//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    /// Display name
    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    /// Contact email for notifications
    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Is this account banned?
    #[sea_orm(default_value = false)]
    pub is_banned: bool,

    /// When the ban was applied.
    #[sea_orm(nullable)]
    pub banned_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::issue::Entity")]
    Issue,

    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
}

impl ActiveModelBehavior for ActiveModel {}
