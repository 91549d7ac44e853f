//! Create `reviews` table. Reviews go away with their user, service or rating.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(pk_auto(Review::Id))
                    .col(integer(Review::UserId).not_null())
                    .col(integer(Review::ServiceId).not_null())
                    .col(integer(Review::RatingId).not_null())
                    .col(date(Review::Date).not_null())
                    .col(text_null(Review::Description))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_service")
                            .from(Review::Table, Review::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_rating")
                            .from(Review::Table, Review::RatingId)
                            .to(Rating::Table, Rating::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    Id,
    UserId,
    ServiceId,
    RatingId,
    Date,
    Description,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Service {
    #[sea_orm(iden = "services")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Rating {
    #[sea_orm(iden = "ratings")]
    Table,
    Id,
}
