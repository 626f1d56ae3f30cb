use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::booking::{self, PaymentStatus};
use crate::entities::payment::{self, PaymentRecordStatus};
use crate::error::AppResult;
use crate::services::bookings::{self, CreateBookingRequest, NewBooking};
use crate::services::payments::{self, CompletePaymentRequest, PaymentInput};
use crate::utils::jwt::Claims;
use crate::utils::money::Money;
use crate::AppState;

// ============ Booking Management ============

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub destination_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    pub username: String,
    pub visit_date: NaiveDate,
    pub amount_paid: Money,
    pub hotel_price: Money,
    pub flight_price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_price: Option<Money>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<booking::Model> for BookingResponse {
    fn from(b: booking::Model) -> Self {
        Self {
            booking_id: b.id,
            destination_id: b.destination_id,
            destination_name: None,
            username: b.username,
            visit_date: b.visit_date,
            amount_paid: Money::from_minor(b.amount_paid),
            hotel_price: Money::from_minor(b.hotel_price),
            flight_price: Money::from_minor(b.flight_price),
            reference_price: None,
            status: b.payment_status,
            created_at: b.created_at.with_timezone(&Utc),
        }
    }
}

/// Submit a booking; the total must equal hotel plus flight
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let input = NewBooking::try_from(payload)?;

    let created =
        bookings::create_booking(&state.db, state.config.fx_rate, &claims.username, input).await?;

    let mut response = BookingResponse::from(created.booking);
    response.destination_name = Some(created.destination.name);
    response.reference_price = Some(created.reference_price);

    Ok((StatusCode::CREATED, Json(response)))
}

/// List user's bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = bookings::list_bookings(&state.db, &claims.username).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// Get one of the user's bookings (payment page)
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<BookingResponse>> {
    let booking = bookings::get_booking(&state.db, &claims.username, booking_id).await?;
    Ok(Json(booking.into()))
}

// ============ Payments ============

#[derive(Debug, Serialize)]
pub struct PaymentCompletedResponse {
    pub payment_id: Uuid,
    pub reservation_id: Uuid,
    pub transaction_id: String,
    pub booking_id: Uuid,
    pub amount: Money,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub payment_id: Uuid,
    pub booking_id: Uuid,
    pub transaction_id: String,
    pub payment_method: String,
    pub status: PaymentRecordStatus,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl From<payment::Model> for PaymentResponse {
    fn from(p: payment::Model) -> Self {
        Self {
            payment_id: p.id,
            booking_id: p.booking_id,
            transaction_id: p.transaction_id,
            payment_method: p.payment_method,
            status: p.status,
            amount: Money::from_minor(p.amount),
            created_at: p.created_at.with_timezone(&Utc),
        }
    }
}

/// Pay for a pending booking, creating its reservation
pub async fn complete_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CompletePaymentRequest>,
) -> AppResult<Json<PaymentCompletedResponse>> {
    let input = PaymentInput::try_from(payload)?;
    let completed = payments::complete_payment(&state.db, &claims.username, input).await?;

    Ok(Json(PaymentCompletedResponse {
        payment_id: completed.payment.id,
        reservation_id: completed.reservation.id,
        transaction_id: completed.payment.transaction_id,
        booking_id: completed.payment.booking_id,
        amount: Money::from_minor(completed.payment.amount),
    }))
}

/// List user's payments
pub async fn payment_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<PaymentResponse>>> {
    let payments = payments::payment_history(&state.db, &claims.username).await?;
    Ok(Json(payments.into_iter().map(PaymentResponse::from).collect()))
}

/// Get a payment by transaction id (payment success page)
pub async fn get_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(transaction_id): Path<String>,
) -> AppResult<Json<PaymentResponse>> {
    let payment = payments::find_payment(&state.db, &claims.username, &transaction_id).await?;
    Ok(Json(payment.into()))
}
