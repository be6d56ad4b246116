//! Create issue table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issue::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Issue::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Issue::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Issue::Description).text().not_null())
                    .col(ColumnDef::new(Issue::CategoryId).string_len(32).not_null())
                    .col(ColumnDef::new(Issue::ReporterId).string_len(32).not_null())
                    .col(ColumnDef::new(Issue::Latitude).double().not_null())
                    .col(ColumnDef::new(Issue::Longitude).double().not_null())
                    .col(ColumnDef::new(Issue::StatusId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Issue::FlagCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Issue::IsHidden)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Issue::IsResolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Issue::ResolvedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Issue::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_reporter")
                            .from(Issue::Table, Issue::ReporterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_category")
                            .from(Issue::Table, Issue::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_status")
                            .from(Issue::Table, Issue::StatusId)
                            .to(IssueStatus::Table, IssueStatus::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: category_id (for filtered map queries)
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_category_id")
                    .table(Issue::Table)
                    .col(Issue::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Index: status_id (for filtered map queries)
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_status_id")
                    .table(Issue::Table)
                    .col(Issue::StatusId)
                    .to_owned(),
            )
            .await?;

        // Index: reporter_id (for listing a reporter's issues)
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_reporter_id")
                    .table(Issue::Table)
                    .col(Issue::ReporterId)
                    .to_owned(),
            )
            .await?;

        // Index: (is_hidden, flag_count) (for the flagged worklist)
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_hidden_flag_count")
                    .table(Issue::Table)
                    .col(Issue::IsHidden)
                    .col(Issue::FlagCount)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Issue::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Issue {
    Table,
    Id,
    Title,
    Description,
    CategoryId,
    ReporterId,
    Latitude,
    Longitude,
    StatusId,
    FlagCount,
    IsHidden,
    IsResolved,
    ResolvedAt,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
}

#[derive(Iden)]
enum IssueStatus {
    Table,
    Id,
}
