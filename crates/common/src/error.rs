//! Error types for civicfix.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Business-rule rejections ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The actor's moderation role is missing, inactive, or insufficient.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The (issue, flagger) pair already has a flag on record.
    #[error("Duplicate flag: issue {issue_id} already flagged by {flagger_id}")]
    DuplicateFlag {
        issue_id: String,
        flagger_id: String,
    },

    /// The requested target status does not exist.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Latitude or longitude outside the valid range.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // === System errors ===
    #[error("Database error: {0}")]
    Database(String),

    /// A multi-step atomic unit failed and was rolled back.
    #[error("Transaction failure: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::IssueNotFound(_) => "ISSUE_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::NotAuthorized(_) => "NOT_AUTHORIZED",
            Self::DuplicateFlag { .. } => "DUPLICATE_FLAG",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::InvalidCoordinate(_) => "INVALID_COORDINATE",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Transaction(_) => "TRANSACTION_FAILURE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error indicates a system-level problem.
    ///
    /// Business-rule rejections (duplicate flag, insufficient role) are
    /// expected outcomes and should be logged at low severity by callers;
    /// the rest warrant error-level logging.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Transaction(_) | Self::Config(_) | Self::Internal(_)
        )
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::NotFound("issue x".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            AppError::DuplicateFlag {
                issue_id: "i1".to_string(),
                flagger_id: "u1".to_string(),
            }
            .error_code(),
            "DUPLICATE_FLAG"
        );
        assert_eq!(
            AppError::Transaction("commit failed".to_string()).error_code(),
            "TRANSACTION_FAILURE"
        );
    }

    #[test]
    fn test_severity_split() {
        assert!(!AppError::DuplicateFlag {
            issue_id: "i1".to_string(),
            flagger_id: "u1".to_string(),
        }
        .is_server_error());
        assert!(!AppError::NotAuthorized("moderator required".to_string()).is_server_error());
        assert!(AppError::Transaction("rollback".to_string()).is_server_error());
        assert!(AppError::Database("connection reset".to_string()).is_server_error());
    }
}
