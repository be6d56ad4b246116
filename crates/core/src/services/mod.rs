//! Business logic services.

#![allow(missing_docs)]

pub mod flag;
pub mod issue;
pub mod moderation;
pub mod notification;
pub mod permission;
pub mod proximity;
pub mod status_transition;

pub use flag::{FileFlagInput, FlagService};
pub use issue::{IssueService, ReportIssueInput};
pub use moderation::ModerationService;
pub use notification::NotificationService;
pub use permission::{role_satisfies, PermissionService, Role};
pub use proximity::{rank_by_distance, NearbyIssue, NearbyQuery, ProximityService};
pub use status_transition::{StatusTransitionService, TransitionInput};
