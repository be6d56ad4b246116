//! Permission hierarchy for moderation actions.
//!
//! Roles form a total order: moderator < admin < super admin. An action
//! requiring role R is authorized for any actor holding an active grant at
//! or above R. Unknown role strings deny rather than error, so a corrupt
//! or stale role value fails closed.

use civicfix_common::{AppError, AppResult};
use civicfix_db::{entities::moderator_role, repositories::ModeratorRoleRepository};

/// Moderation role, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Moderator,
    Admin,
    SuperAdmin,
}

impl Role {
    /// The full hierarchy, least privileged first. Adding a role means
    /// adding one entry here, in order.
    pub const HIERARCHY: [Self; 3] = [Self::Moderator, Self::Admin, Self::SuperAdmin];

    /// Position in the hierarchy.
    #[must_use]
    pub fn rank(self) -> usize {
        // HIERARCHY is exhaustive, so the position always exists.
        Self::HIERARCHY.iter().position(|r| *r == self).unwrap_or(0)
    }

    /// Stable string form, as stored in the role table.
    #[must_use]
    pub const fn as_slug(self) -> &'static str {
        match self {
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Parse a stored role string. Unknown values return `None` and are
    /// treated as below every real role.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "moderator" => Some(Self::Moderator),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }
}

/// Does `actor` authorize an action requiring `required`?
#[must_use]
pub fn role_satisfies(actor: Role, required: Role) -> bool {
    actor.rank() >= required.rank()
}

/// Does this role grant authorize an action requiring `required`?
///
/// Inactive grants and unrecognized role strings always deny.
#[must_use]
pub fn grant_satisfies(grant: &moderator_role::Model, required: Role) -> bool {
    if !grant.is_active {
        return false;
    }
    Role::from_slug(&grant.role).is_some_and(|actor| role_satisfies(actor, required))
}

/// Permission service answering authorization questions from role records.
#[derive(Clone)]
pub struct PermissionService {
    role_repo: ModeratorRoleRepository,
}

impl PermissionService {
    /// Create a new permission service.
    #[must_use]
    pub const fn new(role_repo: ModeratorRoleRepository) -> Self {
        Self { role_repo }
    }

    /// Is this user authorized for an action requiring `required`?
    ///
    /// A user with no role record is denied.
    pub async fn is_authorized(&self, user_id: &str, required: Role) -> AppResult<bool> {
        let grant = self.role_repo.find_by_user(user_id).await?;
        Ok(grant.is_some_and(|g| grant_satisfies(&g, required)))
    }

    /// Fail with `NotAuthorized` unless the user holds an active grant at
    /// or above `required`. No state is touched on denial.
    pub async fn require(&self, user_id: &str, required: Role) -> AppResult<()> {
        if self.is_authorized(user_id, required).await? {
            Ok(())
        } else {
            Err(AppError::NotAuthorized(format!(
                "action requires {} role",
                required.as_slug()
            )))
        }
    }
}
