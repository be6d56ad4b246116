//! Database repositories.

#![allow(missing_docs)]

pub mod flag;
pub mod issue;
pub mod issue_status;
pub mod moderator_role;
pub mod notification;
pub mod status_log;
pub mod user;

pub use flag::FlagRepository;
pub use issue::{IssueCandidateFilter, IssueRepository};
pub use issue_status::IssueStatusRepository;
pub use moderator_role::ModeratorRoleRepository;
pub use notification::NotificationRepository;
pub use status_log::StatusLogRepository;
pub use user::UserRepository;
