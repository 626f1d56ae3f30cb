use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000002_create_destinations::Destination;
use super::m20250301_000003_create_bookings::Booking;
use super::m20250301_000004_create_payments::Payment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(uuid(Reservation::Id).primary_key())
                    .col(string_len(Reservation::Username, 50).not_null())
                    .col(uuid(Reservation::DestinationId).not_null())
                    .col(uuid(Reservation::BookingId).not_null())
                    .col(uuid(Reservation::PaymentId).not_null())
                    .col(date(Reservation::VisitDate).not_null())
                    .col(string_len(Reservation::Status, 16).not_null())
                    .col(
                        timestamp_with_time_zone(Reservation::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_destination")
                            .from(Reservation::Table, Reservation::DestinationId)
                            .to(Destination::Table, Destination::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_booking")
                            .from(Reservation::Table, Reservation::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_payment")
                            .from(Reservation::Table, Reservation::PaymentId)
                            .to(Payment::Table, Payment::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_username")
                    .table(Reservation::Table)
                    .col(Reservation::Username)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reservation {
    Table,
    Id,
    Username,
    DestinationId,
    BookingId,
    PaymentId,
    VisitDate,
    Status,
    CreatedAt,
}
