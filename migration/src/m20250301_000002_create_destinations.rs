use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Destination::Table)
                    .if_not_exists()
                    .col(uuid(Destination::Id).primary_key())
                    .col(string_len(Destination::Name, 100).not_null())
                    .col(text(Destination::Description).not_null())
                    .col(string_len(Destination::City, 100).not_null())
                    .col(string_len(Destination::Country, 100).not_null())
                    .col(string_len(Destination::Category, 50).not_null())
                    .col(string_len(Destination::Budget, 16).not_null())
                    .col(big_integer(Destination::BasePrice).not_null())
                    .col(string_len_null(Destination::Image, 255))
                    .col(
                        timestamp_with_time_zone(Destination::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_destination_name")
                    .table(Destination::Table)
                    .col(Destination::Name)
                    .to_owned(),
            )
            .await?;

        // Seed destinations, base price in US cents
        let insert = Query::insert()
            .into_table(Destination::Table)
            .columns([
                Destination::Id,
                Destination::Name,
                Destination::Description,
                Destination::City,
                Destination::Country,
                Destination::Category,
                Destination::Budget,
                Destination::BasePrice,
                Destination::CreatedAt,
            ])
            .values_panic([
                uuid::Uuid::new_v4().into(),
                "Paris".into(),
                "City of Lights".into(),
                "Paris".into(),
                "France".into(),
                "city".into(),
                "high".into(),
                100_000i64.into(),
                seeded_at(),
            ])
            .values_panic([
                uuid::Uuid::new_v4().into(),
                "Goa".into(),
                "Beaches and old Portuguese quarters".into(),
                "Panaji".into(),
                "India".into(),
                "beach".into(),
                "low".into(),
                30_000i64.into(),
                seeded_at(),
            ])
            .values_panic([
                uuid::Uuid::new_v4().into(),
                "Kyoto".into(),
                "Temples, gardens and tea houses".into(),
                "Kyoto".into(),
                "Japan".into(),
                "culture".into(),
                "medium".into(),
                80_000i64.into(),
                seeded_at(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Destination::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Destination {
    Table,
    Id,
    Name,
    Description,
    City,
    Country,
    Category,
    Budget,
    BasePrice,
    Image,
    CreatedAt,
}

/// Fixed creation time for the catalog seed, written as an RFC 3339 literal
/// every backend parses the same way.
fn seeded_at() -> SimpleExpr {
    Expr::cust("'2025-03-01T00:00:00+00:00'")
}
