//! Flag ledger.
//!
//! Records at most one moderation flag per (issue, flagger) pair and keeps
//! the issue's denormalized flag count in step with the ledger.

use std::sync::Arc;

use civicfix_common::{config::ModerationConfig, AppError, AppResult, IdGenerator};
use civicfix_db::{
    entities::{issue, issue_flag, issue_flag::FlagReason},
    repositories::{FlagRepository, IssueRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

/// Input for filing a flag.
#[derive(Debug, Clone)]
pub struct FileFlagInput {
    pub issue_id: String,
    pub flagger_id: String,
    pub reason: FlagReason,
    pub detail: Option<String>,
}

/// Flag ledger service.
#[derive(Clone)]
pub struct FlagService {
    db: Arc<DatabaseConnection>,
    flag_repo: FlagRepository,
    issue_repo: IssueRepository,
    config: ModerationConfig,
    id_gen: IdGenerator,
}

impl FlagService {
    /// Create a new flag service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        flag_repo: FlagRepository,
        issue_repo: IssueRepository,
        config: ModerationConfig,
    ) -> Self {
        Self {
            db,
            flag_repo,
            issue_repo,
            config,
            id_gen: IdGenerator::new(),
        }
    }

    /// File a flag against an issue.
    ///
    /// The flag insert and the flag-count increment commit together or not
    /// at all. The duplicate check is advisory; the uniqueness constraint
    /// on (issue, flagger) is what holds under concurrent attempts, and a
    /// constraint violation surfaces as `DuplicateFlag` with nothing
    /// committed.
    pub async fn file_flag(&self, input: FileFlagInput) -> AppResult<issue_flag::Model> {
        let detail = match input.detail {
            Some(d) => {
                let trimmed = d.trim();
                if trimmed.len() > self.config.max_flag_detail_len {
                    return Err(AppError::BadRequest("Flag detail too long".to_string()));
                }
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            None => None,
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        // Issue must exist before anything is written.
        self.issue_repo.get_by_id_on(&txn, &input.issue_id).await?;

        if self
            .flag_repo
            .exists_on(&txn, &input.issue_id, &input.flagger_id)
            .await?
        {
            return Err(AppError::DuplicateFlag {
                issue_id: input.issue_id,
                flagger_id: input.flagger_id,
            });
        }

        let model = issue_flag::ActiveModel {
            id: Set(self.id_gen.generate()),
            issue_id: Set(input.issue_id.clone()),
            flagger_id: Set(input.flagger_id.clone()),
            reason: Set(input.reason),
            detail: Set(detail),
            created_at: Set(chrono::Utc::now().into()),
        };
        let flag = self.flag_repo.insert_on(&txn, model).await?;

        self.issue_repo
            .increment_flag_count_on(&txn, &input.issue_id)
            .await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        tracing::info!(
            issue_id = %flag.issue_id,
            flagger_id = %flag.flagger_id,
            "Issue flagged"
        );

        Ok(flag)
    }

    /// Flagged, non-hidden issues ranked most-flagged first (ties broken
    /// by newest). Each call re-reads current state.
    pub async fn list_flagged(&self, limit: u64) -> AppResult<Vec<issue::Model>> {
        self.issue_repo.find_flagged(limit).await
    }

    /// Flags filed against one issue, newest first.
    pub async fn flags_for_issue(
        &self,
        issue_id: &str,
        limit: u64,
    ) -> AppResult<Vec<issue_flag::Model>> {
        self.flag_repo.find_by_issue(issue_id, limit).await
    }

    /// Count of flags on record for an issue.
    pub async fn count_for_issue(&self, issue_id: &str) -> AppResult<u64> {
        self.flag_repo.count_for_issue(issue_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn test_issue(id: &str, flag_count: i32) -> issue::Model {
        issue::Model {
            id: id.to_string(),
            title: "Overflowing bin".to_string(),
            description: "Bin at the park entrance".to_string(),
            category_id: "cat1".to_string(),
            reporter_id: "u1".to_string(),
            latitude: 24.6339,
            longitude: 73.2496,
            status_id: "st1".to_string(),
            flag_count,
            is_hidden: false,
            is_resolved: false,
            resolved_at: None,
            created_at: Utc::now().into(),
        }
    }

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

    fn service(db: sea_orm::DatabaseConnection) -> FlagService {
        service_with_config(db, ModerationConfig::default())
    }

    fn service_with_config(db: sea_orm::DatabaseConnection, config: ModerationConfig) -> FlagService {
        let db = Arc::new(db);
        FlagService::new(
            db.clone(),
            FlagRepository::new(db.clone()),
            IssueRepository::new(db),
            config,
        )
    }

    #[tokio::test]
    async fn test_file_flag_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_issue("i1", 0)]])
            .append_query_results([Vec::<issue_flag::Model>::new()])
            .append_query_results([[test_flag("f1", "i1", "u2")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service(db);
        let flag = service
            .file_flag(FileFlagInput {
                issue_id: "i1".to_string(),
                flagger_id: "u2".to_string(),
                reason: FlagReason::Spam,
                detail: None,
            })
            .await
            .unwrap();
        assert_eq!(flag.issue_id, "i1");
        assert_eq!(flag.flagger_id, "u2");
    }

    #[tokio::test]
    async fn test_file_flag_duplicate_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_issue("i1", 1)]])
            .append_query_results([[test_flag("f1", "i1", "u2")]])
            .into_connection();

        let service = service(db);
        let err = service
            .file_flag(FileFlagInput {
                issue_id: "i1".to_string(),
                flagger_id: "u2".to_string(),
                reason: FlagReason::Inappropriate,
                detail: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_FLAG");
    }

    #[tokio::test]
    async fn test_file_flag_missing_issue() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<issue::Model>::new()])
            .into_connection();

        let service = service(db);
        let err = service
            .file_flag(FileFlagInput {
                issue_id: "ghost".to_string(),
                flagger_id: "u2".to_string(),
                reason: FlagReason::Other,
                detail: Some("never seen this issue".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "ISSUE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_file_flag_detail_too_long() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = service(db);
        let err = service
            .file_flag(FileFlagInput {
                issue_id: "i1".to_string(),
                flagger_id: "u2".to_string(),
                reason: FlagReason::Spam,
                detail: Some("x".repeat(2001)),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_file_flag_detail_limit_is_configurable() {
        // A detail under the default limit but over the configured one
        // must be rejected.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let config = ModerationConfig {
            max_flag_detail_len: 10,
            ..ModerationConfig::default()
        };

        let service = service_with_config(db, config);
        let err = service
            .file_flag(FileFlagInput {
                issue_id: "i1".to_string(),
                flagger_id: "u2".to_string(),
                reason: FlagReason::Spam,
                detail: Some("x".repeat(11)),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
