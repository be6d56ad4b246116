//! Database entities.

pub mod category;
pub mod issue;
pub mod issue_flag;
pub mod issue_status;
pub mod issue_status_log;
pub mod moderator_role;
pub mod notification;
pub mod user;

pub use category::Entity as Category;
pub use issue::Entity as Issue;
pub use issue_flag::Entity as IssueFlag;
pub use issue_status::Entity as IssueStatus;
pub use issue_status_log::Entity as IssueStatusLog;
pub use moderator_role::Entity as ModeratorRole;
pub use notification::Entity as Notification;
pub use user::Entity as User;
