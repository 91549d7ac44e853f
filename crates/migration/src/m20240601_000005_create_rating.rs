//! Create `ratings` table and seed the fixed scale (1.0 to 5.0 in 0.5 steps).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEED: [(&str, f64); 9] = [
    ("Terrible", 1.0),
    ("Very poor", 1.5),
    ("Poor", 2.0),
    ("Below average", 2.5),
    ("Average", 3.0),
    ("Above average", 3.5),
    ("Good", 4.0),
    ("Very good", 4.5),
    ("Excellent", 5.0),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(pk_auto(Rating::Id))
                    .col(string_len(Rating::Name, 100).not_null())
                    .col(double(Rating::Value).not_null())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Rating::Table).columns([Rating::Name, Rating::Value]);
        for (name, value) in SEED {
            insert.values_panic([name.into(), value.into()]);
        }
        manager.exec_stmt(insert.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Rating::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Rating {
    #[sea_orm(iden = "ratings")]
    Table,
    Id,
    Name,
    Value,
}
