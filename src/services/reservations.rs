use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::booking::{self, PaymentStatus};
use crate::entities::destination;
use crate::entities::reservation::{self, ReservationStatus};
use crate::error::{AppError, AppResult};
use crate::utils::money::Money;

#[derive(Debug, Clone, Serialize)]
pub struct BookingSnapshot {
    pub booking_id: Uuid,
    pub amount_paid: Money,
    pub hotel_price: Money,
    pub flight_price: Money,
    pub payment_status: PaymentStatus,
}

impl From<&booking::Model> for BookingSnapshot {
    fn from(b: &booking::Model) -> Self {
        Self {
            booking_id: b.id,
            amount_paid: Money::from_minor(b.amount_paid),
            hotel_price: Money::from_minor(b.hotel_price),
            flight_price: Money::from_minor(b.flight_price),
            payment_status: b.payment_status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservationView {
    pub id: Uuid,
    pub destination_id: Uuid,
    pub destination_name: Option<String>,
    pub booking_id: Uuid,
    pub booking: Option<BookingSnapshot>,
    pub payment_id: Uuid,
    pub visit_date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// The caller's reservations, newest first, joined with destination name and
/// the originating booking.
pub async fn list_reservations(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Vec<ReservationView>> {
    let reservations = reservation::Entity::find()
        .filter(reservation::Column::Username.eq(username))
        .order_by_desc(reservation::Column::CreatedAt)
        .order_by_desc(reservation::Column::Id)
        .all(db)
        .await?;

    if reservations.is_empty() {
        return Ok(Vec::new());
    }

    let destination_ids: Vec<Uuid> = reservations.iter().map(|r| r.destination_id).collect();
    let booking_ids: Vec<Uuid> = reservations.iter().map(|r| r.booking_id).collect();

    let destinations: HashMap<Uuid, String> = destination::Entity::find()
        .filter(destination::Column::Id.is_in(destination_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();

    let bookings: HashMap<Uuid, booking::Model> = booking::Entity::find()
        .filter(booking::Column::Id.is_in(booking_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    Ok(reservations
        .into_iter()
        .map(|r| ReservationView {
            id: r.id,
            destination_id: r.destination_id,
            destination_name: destinations.get(&r.destination_id).cloned(),
            booking_id: r.booking_id,
            booking: bookings.get(&r.booking_id).map(BookingSnapshot::from),
            payment_id: r.payment_id,
            visit_date: r.visit_date,
            status: r.status,
            created_at: r.created_at.with_timezone(&Utc),
        })
        .collect())
}

/// Reschedule a reservation. Ownership is part of the update predicate, so a
/// reservation belonging to someone else looks exactly like a missing one.
pub async fn update_visit_date(
    db: &DatabaseConnection,
    username: &str,
    reservation_id: Uuid,
    new_date: NaiveDate,
) -> AppResult<reservation::Model> {
    let result = reservation::Entity::update_many()
        .set(reservation::ActiveModel {
            visit_date: Set(new_date),
            ..Default::default()
        })
        .filter(reservation::Column::Id.eq(reservation_id))
        .filter(reservation::Column::Username.eq(username))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Reservation not found".to_string()));
    }

    let reservation = reservation::Entity::find_by_id(reservation_id)
        .filter(reservation::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;

    tracing::info!(%reservation_id, username, visit_date = %new_date, "Reservation rescheduled");
    Ok(reservation)
}

/// Hard-delete one of the caller's reservations and return what was removed.
/// The booking and payment behind it are left untouched.
pub async fn cancel_reservation(
    db: &DatabaseConnection,
    username: &str,
    reservation_id: Uuid,
) -> AppResult<reservation::Model> {
    let not_found = || AppError::NotFound("Reservation not found".to_string());

    let reservation = reservation::Entity::find_by_id(reservation_id)
        .filter(reservation::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(not_found)?;

    let result = reservation::Entity::delete_many()
        .filter(reservation::Column::Id.eq(reservation_id))
        .filter(reservation::Column::Username.eq(username))
        .exec(db)
        .await?;

    // A concurrent cancel got there first
    if result.rows_affected == 0 {
        return Err(not_found());
    }

    tracing::info!(%reservation_id, booking_id = %reservation.booking_id, username, "Reservation cancelled");

    Ok(reservation::Model {
        status: ReservationStatus::Cancelled,
        ..reservation
    })
}
