//! Issue status entity.
//!
//! Statuses form a flat workflow vocabulary ("reported", "in progress",
//! "resolved", ...). The graph is unconstrained: any status may follow any
//! other. Rows with `marks_resolved = true` drive the issue's
//! `is_resolved`/`resolved_at` pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Human-readable status name, used in reporter notifications.
    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Does entering this status resolve the issue?
    #[sea_orm(default_value = false)]
    pub marks_resolved: bool,

    /// Display ordering for status pickers.
    #[sea_orm(default_value = 0)]
    pub sort_order: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::issue::Entity")]
    Issue,
}

impl ActiveModelBehavior for ActiveModel {}
