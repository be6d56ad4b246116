//! Issue repository.

use std::sync::Arc;

use crate::entities::{issue, Issue};
use civicfix_common::{AppError, AppResult};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Optional filters for proximity candidate queries.
#[derive(Debug, Clone, Default)]
pub struct IssueCandidateFilter {
    /// Restrict to a category.
    pub category_id: Option<String>,
    /// Restrict to a status.
    pub status_id: Option<String>,
}

/// Issue repository for database operations.
#[derive(Clone)]
pub struct IssueRepository {
    db: Arc<DatabaseConnection>,
}

impl IssueRepository {
    /// Create a new issue repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get an issue by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<issue::Model> {
        self.get_by_id_on(self.db.as_ref(), id).await
    }

    /// Get an issue by ID on the given connection (usable inside a
    /// transaction).
    pub async fn get_by_id_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> AppResult<issue::Model> {
        Issue::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::IssueNotFound(id.to_string()))
    }

    /// Insert a new issue on the given connection.
    pub async fn create_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: issue::ActiveModel,
    ) -> AppResult<issue::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an issue on the given connection.
    pub async fn update_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: issue::ActiveModel,
    ) -> AppResult<issue::Model> {
        model
            .update(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an issue.
    pub async fn update(&self, model: issue::ActiveModel) -> AppResult<issue::Model> {
        self.update_on(self.db.as_ref(), model).await
    }

    /// Hard-delete an issue. Dependent flags, log entries, and
    /// notifications cascade at the storage layer.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Issue::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment the denormalized flag count on the given connection.
    ///
    /// Runs as a single UPDATE so it composes with the flag insert inside
    /// one transaction.
    pub async fn increment_flag_count_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        issue_id: &str,
    ) -> AppResult<()> {
        Issue::update_many()
            .col_expr(
                issue::Column::FlagCount,
                Expr::col(issue::Column::FlagCount).add(1),
            )
            .filter(issue::Column::Id.eq(issue_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Fetch non-hidden issues matching the optional category/status
    /// filters, for proximity ranking.
    pub async fn find_visible(
        &self,
        filter: &IssueCandidateFilter,
    ) -> AppResult<Vec<issue::Model>> {
        let mut query = Issue::find().filter(issue::Column::IsHidden.eq(false));

        if let Some(ref category_id) = filter.category_id {
            query = query.filter(issue::Column::CategoryId.eq(category_id));
        }
        if let Some(ref status_id) = filter.status_id {
            query = query.filter(issue::Column::StatusId.eq(status_id));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Non-hidden issues with at least one flag, most-flagged first,
    /// newest first among equals.
    pub async fn find_flagged(&self, limit: u64) -> AppResult<Vec<issue::Model>> {
        Issue::find()
            .filter(issue::Column::FlagCount.gt(0))
            .filter(issue::Column::IsHidden.eq(false))
            .order_by_desc(issue::Column::FlagCount)
            .order_by_desc(issue::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
