//! Create issue flag table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IssueFlag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IssueFlag::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IssueFlag::IssueId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(IssueFlag::FlaggerId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(IssueFlag::Reason).string_len(32).not_null())
                    .col(ColumnDef::new(IssueFlag::Detail).text())
                    .col(
                        ColumnDef::new(IssueFlag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_flag_issue")
                            .from(IssueFlag::Table, IssueFlag::IssueId)
                            .to(Issue::Table, Issue::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_flag_flagger")
                            .from(IssueFlag::Table, IssueFlag::FlaggerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (issue_id, flagger_id) - one flag per user per issue.
        // This constraint, not the application-level check, is what makes
        // concurrent duplicate attempts safe.
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_flag_issue_flagger")
                    .table(IssueFlag::Table)
                    .col(IssueFlag::IssueId)
                    .col(IssueFlag::FlaggerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IssueFlag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IssueFlag {
    Table,
    Id,
    IssueId,
    FlaggerId,
    Reason,
    Detail,
    CreatedAt,
}

#[derive(Iden)]
enum Issue {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
