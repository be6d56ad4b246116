//! Issue flag entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reason a flag was filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum FlagReason {
    #[sea_orm(string_value = "spam")]
    Spam,
    #[sea_orm(string_value = "inappropriate")]
    Inappropriate,
    #[sea_orm(string_value = "duplicate")]
    Duplicate,
    #[sea_orm(string_value = "false_report")]
    FalseReport,
    #[sea_orm(string_value = "other")]
    Other,
}

/// A moderation complaint against an issue.
///
/// A uniqueness constraint on (`issue_id`, `flagger_id`) guarantees a user
/// can flag a given issue at most once, even under concurrent attempts.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "issue_flag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub issue_id: String,

    pub flagger_id: String,

    pub reason: FlagReason,

    /// Optional free-text elaboration.
    #[sea_orm(column_type = "Text", nullable)]
    pub detail: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::issue::Entity",
        from = "Column::IssueId",
        to = "super::issue::Column::Id",
        on_delete = "Cascade"
    )]
    Issue,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FlaggerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Flagger,
}

impl Related<super::issue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
