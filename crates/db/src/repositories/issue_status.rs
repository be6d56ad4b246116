//! Issue status repository.

use std::sync::Arc;

use crate::entities::{issue_status, IssueStatus};
use civicfix_common::{AppError, AppResult};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder};

/// Issue status repository for database operations.
#[derive(Clone)]
pub struct IssueStatusRepository {
    db: Arc<DatabaseConnection>,
}

impl IssueStatusRepository {
    /// Create a new issue status repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a status by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<issue_status::Model>> {
        self.find_by_id_on(self.db.as_ref(), id).await
    }

    /// Find a status by ID on the given connection (usable inside a
    /// transaction).
    pub async fn find_by_id_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> AppResult<Option<issue_status::Model>> {
        IssueStatus::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all statuses in display order.
    pub async fn list(&self) -> AppResult<Vec<issue_status::Model>> {
        IssueStatus::find()
            .order_by_asc(issue_status::Column::SortOrder)
            .all(self.db.as_ref())
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

    fn test_status(id: &str, name: &str, marks_resolved: bool) -> issue_status::Model {
        issue_status::Model {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            marks_resolved,
            sort_order: 0,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_status("st1", "Reported", false)]])
                .into_connection(),
        );

        let repo = IssueStatusRepository::new(db);
        let status = repo.find_by_id("st1").await.unwrap();
        assert_eq!(status.map(|s| s.name), Some("Reported".to_string()));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<issue_status::Model>::new()])
                .into_connection(),
        );

        let repo = IssueStatusRepository::new(db);
        let status = repo.find_by_id("nope").await.unwrap();
        assert!(status.is_none());
    }
}
