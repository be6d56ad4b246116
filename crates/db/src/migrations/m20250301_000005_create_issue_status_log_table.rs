//! Create issue status log table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IssueStatusLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IssueStatusLog::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IssueStatusLog::IssueId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(IssueStatusLog::OldStatusId).string_len(32))
                    .col(
                        ColumnDef::new(IssueStatusLog::NewStatusId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(IssueStatusLog::ActorId).string_len(32))
                    .col(ColumnDef::new(IssueStatusLog::Reason).text())
                    .col(
                        ColumnDef::new(IssueStatusLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_status_log_issue")
                            .from(IssueStatusLog::Table, IssueStatusLog::IssueId)
                            .to(Issue::Table, Issue::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: issue_id (for reading an issue's audit trail)
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_status_log_issue_id")
                    .table(IssueStatusLog::Table)
                    .col(IssueStatusLog::IssueId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IssueStatusLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IssueStatusLog {
    Table,
    Id,
    IssueId,
    OldStatusId,
    NewStatusId,
    ActorId,
    Reason,
    CreatedAt,
}

#[derive(Iden)]
enum Issue {
    Table,
    Id,
}
