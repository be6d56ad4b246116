//! Issue entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A reported civic problem.
///
/// Invariants maintained by the core services:
/// - `is_resolved` is true iff the current status row has
///   `marks_resolved = true`; `resolved_at` is set exactly while resolved.
/// - `flag_count` equals the number of `issue_flag` rows for this issue.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(indexed)]
    pub category_id: String,

    /// The citizen who reported the issue.
    #[sea_orm(indexed)]
    pub reporter_id: String,

    /// Latitude in [-90, 90].
    #[sea_orm(column_type = "Double")]
    pub latitude: f64,

    /// Longitude in [-180, 180].
    #[sea_orm(column_type = "Double")]
    pub longitude: f64,

    /// Current workflow status; mutated only through status transitions.
    #[sea_orm(indexed)]
    pub status_id: String,

    /// Flag count (denormalized; kept in step with `issue_flag` rows).
    #[sea_orm(default_value = 0)]
    pub flag_count: i32,

    /// Hidden from public listings; mutated only through moderation.
    #[sea_orm(default_value = false)]
    pub is_hidden: bool,

    #[sea_orm(default_value = false)]
    pub is_resolved: bool,

    #[sea_orm(nullable)]
    pub resolved_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReporterId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Reporter,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::issue_status::Entity",
        from = "Column::StatusId",
        to = "super::issue_status::Column::Id",
        on_delete = "Restrict"
    )]
    Status,

    #[sea_orm(has_many = "super::issue_flag::Entity")]
    Flag,

    #[sea_orm(has_many = "super::issue_status_log::Entity")]
    StatusLog,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reporter.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::issue_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
