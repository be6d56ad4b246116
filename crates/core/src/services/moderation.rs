//! Moderation gate.
//!
//! Every mutating action authorizes first through the permission
//! hierarchy; on denial no state is touched. Hide and unhide require the
//! moderator role, account bans require admin. Deleting an issue is
//! authorized identically to hiding it.

use civicfix_common::{config::ModerationConfig, AppError, AppResult};
use civicfix_db::{
    entities::{issue, user},
    repositories::{IssueRepository, UserRepository},
};
use sea_orm::Set;

use super::permission::{PermissionService, Role};

/// Moderation service for visibility and account enforcement.
#[derive(Clone)]
pub struct ModerationService {
    permission: PermissionService,
    issue_repo: IssueRepository,
    user_repo: UserRepository,
    config: ModerationConfig,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(
        permission: PermissionService,
        issue_repo: IssueRepository,
        user_repo: UserRepository,
        config: ModerationConfig,
    ) -> Self {
        Self {
            permission,
            issue_repo,
            user_repo,
            config,
        }
    }

    /// Hide an issue from public listings.
    ///
    /// Idempotent: hiding an already-hidden issue succeeds without
    /// further side effects.
    pub async fn hide_issue(&self, actor_id: &str, issue_id: &str) -> AppResult<issue::Model> {
        self.permission.require(actor_id, Role::Moderator).await?;
        self.set_hidden(issue_id, true).await
    }

    /// Restore a hidden issue to public listings. Idempotent.
    pub async fn unhide_issue(&self, actor_id: &str, issue_id: &str) -> AppResult<issue::Model> {
        self.permission.require(actor_id, Role::Moderator).await?;
        self.set_hidden(issue_id, false).await
    }

    async fn set_hidden(&self, issue_id: &str, hidden: bool) -> AppResult<issue::Model> {
        let issue = self.issue_repo.get_by_id(issue_id).await?;
        if issue.is_hidden == hidden {
            return Ok(issue);
        }

        let mut model: issue::ActiveModel = issue.into();
        model.is_hidden = Set(hidden);
        let updated = self.issue_repo.update(model).await?;

        tracing::info!(issue_id = %updated.id, hidden, "Issue visibility changed");
        Ok(updated)
    }

    /// Ban a user account.
    pub async fn ban_user(&self, actor_id: &str, user_id: &str) -> AppResult<user::Model> {
        self.permission.require(actor_id, Role::Admin).await?;

        if actor_id == user_id {
            return Err(AppError::BadRequest("Cannot ban yourself".to_string()));
        }

        let user = self.user_repo.get_by_id(user_id).await?;
        if user.is_banned {
            return Err(AppError::BadRequest("User already banned".to_string()));
        }

        let mut model: user::ActiveModel = user.into();
        model.is_banned = Set(true);
        model.banned_at = Set(Some(chrono::Utc::now().into()));
        let banned = self.user_repo.update(model).await?;

        tracing::info!(user_id = %banned.id, actor_id, "User banned");
        Ok(banned)
    }

    /// Lift a user's ban.
    pub async fn unban_user(&self, actor_id: &str, user_id: &str) -> AppResult<user::Model> {
        self.permission.require(actor_id, Role::Admin).await?;

        let user = self.user_repo.get_by_id(user_id).await?;
        if !user.is_banned {
            return Err(AppError::BadRequest("User is not banned".to_string()));
        }

        let mut model: user::ActiveModel = user.into();
        model.is_banned = Set(false);
        model.banned_at = Set(None);
        let unbanned = self.user_repo.update(model).await?;

        tracing::info!(user_id = %unbanned.id, actor_id, "User ban lifted");
        Ok(unbanned)
    }

    /// Permanently delete an issue. Dependent flags, log entries, and
    /// notifications cascade away with it.
    pub async fn delete_issue(&self, actor_id: &str, issue_id: &str) -> AppResult<()> {
        self.permission.require(actor_id, Role::Moderator).await?;

        // Ensure the id refers to a real issue so a bad id surfaces as
        // NotFound rather than a silent no-op.
        self.issue_repo.get_by_id(issue_id).await?;
        self.issue_repo.delete(issue_id).await?;

        tracing::info!(issue_id, actor_id, "Issue deleted");
        Ok(())
    }

    /// Ranked worklist of flagged content for moderators.
    ///
    /// Without an explicit `limit` the configured worklist size applies.
    pub async fn flagged_worklist(
        &self,
        actor_id: &str,
        limit: Option<u64>,
    ) -> AppResult<Vec<issue::Model>> {
        self.permission.require(actor_id, Role::Moderator).await?;
        let limit = limit.unwrap_or(self.config.worklist_limit);
        self.issue_repo.find_flagged(limit).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civicfix_db::entities::moderator_role;
    use civicfix_db::repositories::ModeratorRoleRepository;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn grant(user_id: &str, role: &str) -> moderator_role::Model {
        moderator_role::Model {
            id: format!("role_{user_id}"),
            user_id: user_id.to_string(),
            role: role.to_string(),
            is_active: true,
            granted_by: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_issue(id: &str, is_hidden: bool) -> issue::Model {
        issue::Model {
            id: id.to_string(),
            title: "Blocked drain".to_string(),
            description: "Standing water after rain".to_string(),
            category_id: "cat1".to_string(),
            reporter_id: "u1".to_string(),
            latitude: 24.6339,
            longitude: 73.2496,
            status_id: "st1".to_string(),
            flag_count: 0,
            is_hidden,
            is_resolved: false,
            resolved_at: None,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> ModerationService {
        service_with_config(db, ModerationConfig::default())
    }

    fn service_with_config(
        db: Arc<sea_orm::DatabaseConnection>,
        config: ModerationConfig,
    ) -> ModerationService {
        ModerationService::new(
            PermissionService::new(ModeratorRoleRepository::new(db.clone())),
            IssueRepository::new(db.clone()),
            UserRepository::new(db),
            config,
        )
    }

    #[tokio::test]
    async fn test_hide_requires_role() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<moderator_role::Model>::new()])
            .into_connection();

        let service = service(Arc::new(db));
        let err = service.hide_issue("nobody", "i1").await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    }

    #[tokio::test]
    async fn test_hide_issue() {
        let mut hidden = test_issue("i1", true);
        hidden.is_hidden = true;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[grant("mod1", "moderator")]])
            .append_query_results([[test_issue("i1", false)]])
            .append_query_results([[hidden]])
            .into_connection();

        let service = service(Arc::new(db));
        let issue = service.hide_issue("mod1", "i1").await.unwrap();
        assert!(issue.is_hidden);
    }

    #[tokio::test]
    async fn test_hide_already_hidden_is_noop() {
        // No update query result appended: the second hide must not write.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[grant("mod1", "moderator")]])
            .append_query_results([[test_issue("i1", true)]])
            .into_connection();

        let service = service(Arc::new(db));
        let issue = service.hide_issue("mod1", "i1").await.unwrap();
        assert!(issue.is_hidden);
    }

    #[tokio::test]
    async fn test_ban_requires_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[grant("mod1", "moderator")]])
            .into_connection();

        let service = service(Arc::new(db));
        let err = service.ban_user("mod1", "u9").await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    }

    #[tokio::test]
    async fn test_ban_self_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[grant("admin1", "admin")]])
            .into_connection();

        let service = service(Arc::new(db));
        let err = service.ban_user("admin1", "admin1").await.unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_worklist_defaults_to_configured_limit() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[grant("mod1", "moderator")]])
                .append_query_results([[test_issue("i1", false)]])
                .into_connection(),
        );
        let config = ModerationConfig {
            worklist_limit: 7,
            ..ModerationConfig::default()
        };

        let service = service_with_config(db.clone(), config);
        let issues = service.flagged_worklist("mod1", None).await.unwrap();
        assert_eq!(issues.len(), 1);

        // The configured limit, not a hard-coded one, reaches the query.
        drop(service);
        let db = Arc::try_unwrap(db).unwrap();
        let log = db.into_transaction_log();
        let worklist_query = format!("{:?}", log.last().unwrap());
        assert!(worklist_query.contains('7'), "{worklist_query}");
    }
}
