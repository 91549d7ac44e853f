use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(pk_auto(Service::Id))
                    .col(string_len(Service::Name, 200).not_null())
                    .col(string_len_null(Service::Picture, 255))
                    .col(integer(Service::Price).not_null())
                    .col(text(Service::Description).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    #[sea_orm(iden = "services")]
    Table,
    Id,
    Name,
    Picture,
    Price,
    Description,
}
