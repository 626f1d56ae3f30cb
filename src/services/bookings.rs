use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::entities::booking::{self, PaymentStatus};
use crate::entities::destination;
use crate::error::{AppError, AppResult};
use crate::services::{destinations, parse_visit_date, pricing, required};
use crate::utils::money::Money;

/// Booking form as submitted. Prices may be numbers or numeric strings.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookingRequest {
    pub destination_name: Option<String>,
    pub visit_date: Option<String>,
    pub amount_paid: Option<Value>,
    pub hotel_price: Option<Value>,
    pub flight_price: Option<Value>,
}

/// A validated booking submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub destination_name: String,
    pub visit_date: NaiveDate,
    pub amount_paid: Money,
    pub hotel_price: Money,
    pub flight_price: Money,
}

impl TryFrom<CreateBookingRequest> for NewBooking {
    type Error = AppError;

    fn try_from(req: CreateBookingRequest) -> AppResult<Self> {
        let destination_name = required(&req.destination_name, "destination_name")?.to_string();
        let visit_date = parse_visit_date(required(&req.visit_date, "visit_date")?)?;
        let amount_paid = pricing::required_amount(req.amount_paid.as_ref(), "amount_paid")?;
        let hotel_price = pricing::lenient_component(req.hotel_price.as_ref(), "hotel_price")?;
        let flight_price = pricing::lenient_component(req.flight_price.as_ref(), "flight_price")?;

        Ok(Self {
            destination_name,
            visit_date,
            amount_paid,
            hotel_price,
            flight_price,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreatedBooking {
    pub booking: booking::Model,
    pub destination: destination::Model,
    pub reference_price: Money,
}

/// Validate the price of a submission and persist it as a Pending booking.
pub async fn create_booking(
    db: &DatabaseConnection,
    fx_rate: Decimal,
    username: &str,
    input: NewBooking,
) -> AppResult<CreatedBooking> {
    let destination = destinations::find_by_name(db, &input.destination_name).await?;

    let reference_price =
        pricing::reference_price(Money::from_minor(destination.base_price), fx_rate)?;
    let expected = pricing::expected_total(input.hotel_price, input.flight_price)?;
    pricing::reconcile(input.amount_paid, expected)?;

    let new_booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        destination_id: Set(destination.id),
        visit_date: Set(input.visit_date),
        amount_paid: Set(expected.minor()),
        hotel_price: Set(input.hotel_price.minor()),
        flight_price: Set(input.flight_price.minor()),
        payment_status: Set(PaymentStatus::Pending),
        created_at: Set(Utc::now().into()),
    };

    let booking = new_booking.insert(db).await?;

    tracing::info!(
        booking_id = %booking.id,
        username,
        destination = %destination.name,
        amount = %expected,
        "Booking created"
    );

    Ok(CreatedBooking {
        booking,
        destination,
        reference_price,
    })
}

/// Fetch one of the caller's bookings. Another user's booking is reported as
/// missing.
pub async fn get_booking(
    db: &DatabaseConnection,
    username: &str,
    booking_id: Uuid,
) -> AppResult<booking::Model> {
    booking::Entity::find_by_id(booking_id)
        .filter(booking::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
}

pub async fn list_bookings(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Vec<booking::Model>> {
    Ok(booking::Entity::find()
        .filter(booking::Column::Username.eq(username))
        .order_by_desc(booking::Column::CreatedAt)
        .order_by_desc(booking::Column::Id)
        .all(db)
        .await?)
}

pub async fn list_all_bookings(db: &DatabaseConnection) -> AppResult<Vec<booking::Model>> {
    Ok(booking::Entity::find()
        .order_by_desc(booking::Column::CreatedAt)
        .order_by_desc(booking::Column::Id)
        .all(db)
        .await?)
}
