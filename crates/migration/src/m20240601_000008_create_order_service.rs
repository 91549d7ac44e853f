//! Create `order_services` join table for the order/service many-to-many link.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderService::Table)
                    .if_not_exists()
                    .col(integer(OrderService::OrderId).not_null())
                    .col(integer(OrderService::ServiceId).not_null())
                    .primary_key(
                        Index::create()
                            .col(OrderService::OrderId)
                            .col(OrderService::ServiceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_service_order")
                            .from(OrderService::Table, OrderService::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_service_service")
                            .from(OrderService::Table, OrderService::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OrderService::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OrderService {
    #[sea_orm(iden = "order_services")]
    Table,
    OrderId,
    ServiceId,
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Service {
    #[sea_orm(iden = "services")]
    Table,
    Id,
}
