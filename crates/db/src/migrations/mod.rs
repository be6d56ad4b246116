//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_user_table;
mod m20250301_000002_create_category_table;
mod m20250301_000003_create_issue_status_table;
mod m20250301_000004_create_issue_table;
mod m20250301_000005_create_issue_status_log_table;
mod m20250301_000006_create_issue_flag_table;
mod m20250301_000007_create_notification_table;
mod m20250301_000008_create_moderator_role_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_user_table::Migration),
            Box::new(m20250301_000002_create_category_table::Migration),
            Box::new(m20250301_000003_create_issue_status_table::Migration),
            Box::new(m20250301_000004_create_issue_table::Migration),
            Box::new(m20250301_000005_create_issue_status_log_table::Migration),
            Box::new(m20250301_000006_create_issue_flag_table::Migration),
            Box::new(m20250301_000007_create_notification_table::Migration),
            Box::new(m20250301_000008_create_moderator_role_table::Migration),
        ]
    }
}
