//! Issue flag repository.

use std::sync::Arc;

use crate::entities::{issue_flag, IssueFlag};
use civicfix_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

/// Flag repository for database operations.
#[derive(Clone)]
pub struct FlagRepository {
    db: Arc<DatabaseConnection>,
}

impl FlagRepository {
    /// Create a new flag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a flag on the given connection (usable inside a transaction).
    ///
    /// A violation of the (issue, flagger) uniqueness constraint maps to
    /// [`AppError::DuplicateFlag`]; this is the authoritative duplicate
    /// guard under concurrency.
    pub async fn insert_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: issue_flag::ActiveModel,
    ) -> AppResult<issue_flag::Model> {
        let issue_id = match &model.issue_id {
            sea_orm::ActiveValue::Set(v) => v.clone(),
            _ => String::new(),
        };
        let flagger_id = match &model.flagger_id {
            sea_orm::ActiveValue::Set(v) => v.clone(),
            _ => String::new(),
        };

        model.insert(conn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::DuplicateFlag {
                    issue_id,
                    flagger_id,
                }
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Does a flag by this user against this issue already exist?
    pub async fn exists(&self, issue_id: &str, flagger_id: &str) -> AppResult<bool> {
        self.exists_on(self.db.as_ref(), issue_id, flagger_id).await
    }

    /// Duplicate check on the given connection.
    pub async fn exists_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        issue_id: &str,
        flagger_id: &str,
    ) -> AppResult<bool> {
        let found = IssueFlag::find()
            .filter(issue_flag::Column::IssueId.eq(issue_id))
            .filter(issue_flag::Column::FlaggerId.eq(flagger_id))
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Flags filed against an issue, newest first.
    pub async fn find_by_issue(
        &self,
        issue_id: &str,
        limit: u64,
    ) -> AppResult<Vec<issue_flag::Model>> {
        IssueFlag::find()
            .filter(issue_flag::Column::IssueId.eq(issue_id))
            .order_by_desc(issue_flag::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count flags for an issue.
    pub async fn count_for_issue(&self, issue_id: &str) -> AppResult<u64> {
        IssueFlag::find()
            .filter(issue_flag::Column::IssueId.eq(issue_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::issue_flag::FlagReason;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_flag(id: &str, issue_id: &str, flagger_id: &str) -> issue_flag::Model {
        issue_flag::Model {
            id: id.to_string(),
            issue_id: issue_id.to_string(),
            flagger_id: flagger_id.to_string(),
            reason: FlagReason::Spam,
            detail: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_exists_true() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_flag("f1", "i1", "u1")]])
                .into_connection(),
        );

        let repo = FlagRepository::new(db);
        assert!(repo.exists("i1", "u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<issue_flag::Model>::new()])
                .into_connection(),
        );

        let repo = FlagRepository::new(db);
        assert!(!repo.exists("i1", "u2").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_issue() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_flag("f1", "i1", "u1"), test_flag("f2", "i1", "u2")]])
                .into_connection(),
        );

        let repo = FlagRepository::new(db);
        let flags = repo.find_by_issue("i1", 10).await.unwrap();
        assert_eq!(flags.len(), 2);
    }
}
