//! Moderator role repository.

use std::sync::Arc;

use crate::entities::{moderator_role, ModeratorRole};
use civicfix_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

/// Moderator role repository for database operations.
#[derive(Clone)]
pub struct ModeratorRoleRepository {
    db: Arc<DatabaseConnection>,
}

impl ModeratorRoleRepository {
    /// Create a new moderator role repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the role record for a user, if any.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Option<moderator_role::Model>> {
        ModeratorRole::find()
            .filter(moderator_role::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a role grant.
    pub async fn create(
        &self,
        model: moderator_role::ActiveModel,
    ) -> AppResult<moderator_role::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a role grant (e.g. deactivating it).
    pub async fn update(
        &self,
        model: moderator_role::ActiveModel,
    ) -> AppResult<moderator_role::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
