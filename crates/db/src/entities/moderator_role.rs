//! Moderator role entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Elevated-privilege grant for a user.
///
/// The `role` column is stored as a plain string and parsed fail-closed in
/// the core permission layer: a corrupt or stale value denies rather than
/// errors.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "moderator_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub user_id: String,

    /// One of "moderator", "admin", "super_admin".
    pub role: String,

    /// Must be true for any authorization check to succeed.
    #[sea_orm(default_value = true)]
    pub is_active: bool,

    /// Who granted this role (None for seeded grants).
    #[sea_orm(nullable)]
    pub granted_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}
