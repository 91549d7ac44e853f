//! Create `auth_tokens` table: at most one opaque API token per user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthToken::Table)
                    .if_not_exists()
                    .col(string_len(AuthToken::Key, 40).primary_key())
                    .col(integer(AuthToken::UserId).unique_key().not_null())
                    .col(timestamp_with_time_zone(AuthToken::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_token_user")
                            .from(AuthToken::Table, AuthToken::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AuthToken::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AuthToken {
    #[sea_orm(iden = "auth_tokens")]
    Table,
    Key,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}
