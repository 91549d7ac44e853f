use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reviews: listed newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_review_date")
                    .table(Review::Table)
                    .col(Review::Date)
                    .to_owned(),
            )
            .await?;

        // Orders: per-user listing and newest-first ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_order_user")
                    .table(Order::Table)
                    .col(Order::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_order_created_at")
                    .table(Order::Table)
                    .col(Order::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_order_status")
                    .table(Order::Table)
                    .col(Order::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_review_date").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_user").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_created_at").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_status").table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    Date,
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    UserId,
    CreatedAt,
    Status,
}
