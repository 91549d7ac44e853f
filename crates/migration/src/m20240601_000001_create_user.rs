//! Create `users` table.
//!
//! Accounts are never deleted by the API; `is_active` disables login instead.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len(User::Username, 150).unique_key().not_null())
                    .col(string_len(User::Email, 254).unique_key().not_null())
                    .col(string_len(User::FirstName, 150).not_null().default(""))
                    .col(string_len(User::LastName, 150).not_null().default(""))
                    .col(boolean(User::IsStaff).not_null().default(false))
                    .col(boolean(User::IsSuperuser).not_null().default(false))
                    .col(boolean(User::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(User::DateJoined).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    IsStaff,
    IsSuperuser,
    IsActive,
    DateJoined,
}
