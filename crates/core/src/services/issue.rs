//! Issue reporting and read path.

use std::sync::Arc;

use civicfix_common::{geo, AppError, AppResult, IdGenerator};
use civicfix_db::{
    entities::{issue, issue_status_log},
    repositories::{IssueRepository, IssueStatusRepository, StatusLogRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

/// Input for reporting a new issue.
#[derive(Debug, Clone)]
pub struct ReportIssueInput {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub reporter_id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// The workflow status the issue starts in.
    pub initial_status_id: String,
}

/// Issue service for creation and reads.
#[derive(Clone)]
pub struct IssueService {
    db: Arc<DatabaseConnection>,
    issue_repo: IssueRepository,
    status_repo: IssueStatusRepository,
    log_repo: StatusLogRepository,
    id_gen: IdGenerator,
}

impl IssueService {
    /// Create a new issue service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        issue_repo: IssueRepository,
        status_repo: IssueStatusRepository,
        log_repo: StatusLogRepository,
    ) -> Self {
        Self {
            db,
            issue_repo,
            status_repo,
            log_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Report a new issue.
    ///
    /// The issue row and its initial status-log entry (old status `None`,
    /// no actor) are written in one transaction.
    pub async fn report_issue(&self, input: ReportIssueInput) -> AppResult<issue::Model> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("Issue title is required".to_string()));
        }
        if title.len() > 256 {
            return Err(AppError::BadRequest("Issue title too long".to_string()));
        }
        let description = input.description.trim();
        if description.is_empty() {
            return Err(AppError::BadRequest(
                "Issue description is required".to_string(),
            ));
        }
        geo::validate_coordinate(input.latitude, input.longitude)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        let status = self
            .status_repo
            .find_by_id_on(&txn, &input.initial_status_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("status {} not found", input.initial_status_id))
            })?;

        let now = chrono::Utc::now();
        let issue_id = self.id_gen.generate();
        let model = issue::ActiveModel {
            id: Set(issue_id.clone()),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            category_id: Set(input.category_id.clone()),
            reporter_id: Set(input.reporter_id.clone()),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            status_id: Set(status.id.clone()),
            flag_count: Set(0),
            is_hidden: Set(false),
            is_resolved: Set(status.marks_resolved),
            resolved_at: Set(status.marks_resolved.then(|| now.into())),
            created_at: Set(now.into()),
        };
        let created = self.issue_repo.create_on(&txn, model).await?;

        let log_entry = issue_status_log::ActiveModel {
            id: Set(self.id_gen.generate()),
            issue_id: Set(issue_id),
            old_status_id: Set(None),
            new_status_id: Set(status.id),
            actor_id: Set(None),
            reason: Set(None),
            created_at: Set(now.into()),
        };
        self.log_repo.append_on(&txn, log_entry).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        tracing::info!(issue_id = %created.id, reporter_id = %created.reporter_id, "Issue reported");
        Ok(created)
    }

    /// Get an issue by ID.
    pub async fn get_issue(&self, id: &str) -> AppResult<issue::Model> {
        self.issue_repo.get_by_id(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn service(db: sea_orm::DatabaseConnection) -> IssueService {
        let db = Arc::new(db);
        IssueService::new(
            db.clone(),
            IssueRepository::new(db.clone()),
            IssueStatusRepository::new(db.clone()),
            StatusLogRepository::new(db),
        )
    }

    fn input() -> ReportIssueInput {
        ReportIssueInput {
            title: "Pothole on 5th Ave".to_string(),
            description: "Front axle deep, growing weekly".to_string(),
            category_id: "cat1".to_string(),
            reporter_id: "u1".to_string(),
            latitude: 24.6339,
            longitude: 73.2496,
            initial_status_id: "st1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_report_requires_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let mut bad = input();
        bad.title = "   ".to_string();
        let err = service.report_issue(bad).await.unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_report_rejects_bad_coordinate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let mut bad = input();
        bad.longitude = 181.0;
        let err = service.report_issue(bad).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COORDINATE");
    }
}
