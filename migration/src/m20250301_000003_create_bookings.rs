use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000002_create_destinations::Destination;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Bookings reference their owner by username only
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(string_len(Booking::Username, 50).not_null())
                    .col(uuid(Booking::DestinationId).not_null())
                    .col(date(Booking::VisitDate).not_null())
                    .col(big_integer(Booking::AmountPaid).not_null())
                    .col(big_integer(Booking::HotelPrice).not_null())
                    .col(big_integer(Booking::FlightPrice).not_null())
                    .col(string_len(Booking::PaymentStatus, 16).not_null())
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_destination")
                            .from(Booking::Table, Booking::DestinationId)
                            .to(Destination::Table, Destination::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_username")
                    .table(Booking::Table)
                    .col(Booking::Username)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    Username,
    DestinationId,
    VisitDate,
    AmountPaid,
    HotelPrice,
    FlightPrice,
    PaymentStatus,
    CreatedAt,
}
