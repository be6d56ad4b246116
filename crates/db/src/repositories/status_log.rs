//! Issue status log repository.
//!
//! The log is append-only: no update or delete methods exist.

use std::sync::Arc;

use crate::entities::{issue_status_log, IssueStatusLog};
use civicfix_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

/// Status log repository for database operations.
#[derive(Clone)]
pub struct StatusLogRepository {
    db: Arc<DatabaseConnection>,
}

impl StatusLogRepository {
    /// Create a new status log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a log entry on the given connection (usable inside a
    /// transaction).
    pub async fn append_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: issue_status_log::ActiveModel,
    ) -> AppResult<issue_status_log::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the audit trail for an issue, newest first.
    pub async fn find_by_issue(&self, issue_id: &str) -> AppResult<Vec<issue_status_log::Model>> {
        IssueStatusLog::find()
            .filter(issue_status_log::Column::IssueId.eq(issue_id))
            .order_by_desc(issue_status_log::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count log entries for an issue.
    pub async fn count_for_issue(&self, issue_id: &str) -> AppResult<u64> {
        IssueStatusLog::find()
            .filter(issue_status_log::Column::IssueId.eq(issue_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_entry(id: &str, issue_id: &str) -> issue_status_log::Model {
        issue_status_log::Model {
            id: id.to_string(),
            issue_id: issue_id.to_string(),
            old_status_id: Some("st1".to_string()),
            new_status_id: "st2".to_string(),
            actor_id: Some("mod1".to_string()),
            reason: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_issue() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_entry("l1", "i1"), test_entry("l2", "i1")]])
                .into_connection(),
        );

        let repo = StatusLogRepository::new(db);
        let entries = repo.find_by_issue("i1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].issue_id, "i1");
    }
}
