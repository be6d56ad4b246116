//! Create moderator role table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModeratorRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModeratorRole::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModeratorRole::UserId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ModeratorRole::Role)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModeratorRole::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ModeratorRole::GrantedBy).string_len(32))
                    .col(
                        ColumnDef::new(ModeratorRole::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moderator_role_user")
                            .from(ModeratorRole::Table, ModeratorRole::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModeratorRole::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ModeratorRole {
    Table,
    Id,
    UserId,
    Role,
    IsActive,
    GrantedBy,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
