//! Status transition manager.
//!
//! A transition mutates the issue, appends an audit log entry, and
//! notifies the reporter as one atomic unit. Partial visibility is
//! forbidden: other readers observe either none or all of the three
//! writes.

use std::sync::Arc;

use civicfix_common::{AppError, AppResult, IdGenerator};
use civicfix_db::{
    entities::{issue, issue_status_log, notification, notification::NotificationType},
    repositories::{
        IssueRepository, IssueStatusRepository, NotificationRepository, StatusLogRepository,
    },
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

/// Input for a status transition.
#[derive(Debug, Clone)]
pub struct TransitionInput {
    pub issue_id: String,
    pub new_status_id: String,
    /// Who performed the transition (None for system-initiated ones).
    pub actor_id: Option<String>,
    pub reason: Option<String>,
}

/// Status transition service.
///
/// The status graph is unconstrained: any status may follow any other,
/// including itself. A transition fails only when the issue or the target
/// status does not exist.
#[derive(Clone)]
pub struct StatusTransitionService {
    db: Arc<DatabaseConnection>,
    issue_repo: IssueRepository,
    status_repo: IssueStatusRepository,
    log_repo: StatusLogRepository,
    notification_repo: NotificationRepository,
    id_gen: IdGenerator,
}

impl StatusTransitionService {
    /// Create a new status transition service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        issue_repo: IssueRepository,
        status_repo: IssueStatusRepository,
        log_repo: StatusLogRepository,
        notification_repo: NotificationRepository,
    ) -> Self {
        Self {
            db,
            issue_repo,
            status_repo,
            log_repo,
            notification_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Transition an issue to a new status.
    ///
    /// Atomically: updates the issue's status and resolution pair, appends
    /// an `issue_status_log` entry, and inserts a notification addressed
    /// to the reporter. Any failure rolls the whole unit back.
    pub async fn transition(&self, input: TransitionInput) -> AppResult<issue::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        let issue = self.issue_repo.get_by_id_on(&txn, &input.issue_id).await?;
        let old_status_id = issue.status_id.clone();

        let new_status = self
            .status_repo
            .find_by_id_on(&txn, &input.new_status_id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidTransition(format!(
                    "status {} does not exist",
                    input.new_status_id
                ))
            })?;

        let was_resolved = issue.is_resolved;
        let now = chrono::Utc::now();

        let mut model: issue::ActiveModel = issue.clone().into();
        model.status_id = Set(input.new_status_id.clone());
        if new_status.marks_resolved && !was_resolved {
            model.is_resolved = Set(true);
            model.resolved_at = Set(Some(now.into()));
        } else if !new_status.marks_resolved && was_resolved {
            model.is_resolved = Set(false);
            model.resolved_at = Set(None);
        }
        let updated = self.issue_repo.update_on(&txn, model).await?;

        let log_entry = issue_status_log::ActiveModel {
            id: Set(self.id_gen.generate()),
            issue_id: Set(issue.id.clone()),
            old_status_id: Set(Some(old_status_id.clone())),
            new_status_id: Set(input.new_status_id.clone()),
            actor_id: Set(input.actor_id.clone()),
            reason: Set(input.reason.clone()),
            created_at: Set(now.into()),
        };
        self.log_repo.append_on(&txn, log_entry).await?;

        let notification_type = if new_status.marks_resolved {
            NotificationType::Resolution
        } else {
            NotificationType::StatusChange
        };
        let notification = notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            recipient_id: Set(issue.reporter_id.clone()),
            issue_id: Set(issue.id.clone()),
            notification_type: Set(notification_type),
            title: Set(format!("Status update: {}", issue.title)),
            message: Set(format!(
                "Your report \"{}\" is now \"{}\".",
                issue.title, new_status.name
            )),
            is_read: Set(false),
            read_at: Set(None),
            created_at: Set(now.into()),
        };
        self.notification_repo.create_on(&txn, notification).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        tracing::info!(
            issue_id = %updated.id,
            old_status_id = %old_status_id,
            new_status_id = %updated.status_id,
            "Issue status transitioned"
        );

        Ok(updated)
    }

    /// Read the audit trail for an issue, newest first.
    pub async fn status_history(
        &self,
        issue_id: &str,
    ) -> AppResult<Vec<issue_status_log::Model>> {
        self.log_repo.find_by_issue(issue_id).await
    }
}
