use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(pk_auto(Order::Id))
                    .col(integer(Order::UserId).not_null())
                    .col(text(Order::Address).not_null())
                    .col(integer(Order::TotalCost).not_null())
                    .col(timestamp_with_time_zone(Order::CreatedAt).not_null())
                    .col(string_len(Order::Status, 20).not_null().default("pending"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_user")
                            .from(Order::Table, Order::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    Id,
    UserId,
    Address,
    TotalCost,
    CreatedAt,
    Status,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}
