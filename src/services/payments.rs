use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::entities::booking::{self, PaymentStatus};
use crate::entities::payment::{self, PaymentRecordStatus};
use crate::entities::reservation::{self, ReservationStatus};
use crate::error::{AppError, AppResult};
use crate::services::{pricing, required};
use crate::utils::money::Money;

#[derive(Debug, Default, Deserialize)]
pub struct CompletePaymentRequest {
    pub booking_id: Option<String>,
    pub amount: Option<Value>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInput {
    pub booking_id: Uuid,
    pub amount: Money,
    pub payment_method: String,
}

impl TryFrom<CompletePaymentRequest> for PaymentInput {
    type Error = AppError;

    fn try_from(req: CompletePaymentRequest) -> AppResult<Self> {
        let raw_id = required(&req.booking_id, "booking_id")?;
        let booking_id = Uuid::parse_str(raw_id)
            .map_err(|_| AppError::Validation(format!("Invalid booking_id: {}", raw_id)))?;
        let amount = pricing::required_amount(req.amount.as_ref(), "amount")?;
        let payment_method = required(&req.payment_method, "payment_method")?.to_string();

        Ok(Self {
            booking_id,
            amount,
            payment_method,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompletedPayment {
    pub payment: payment::Model,
    pub reservation: reservation::Model,
}

fn new_transaction_id() -> String {
    format!("TXN-{}", Uuid::new_v4().simple().to_string().to_uppercase())
}

/// Settle a Pending booking.
///
/// The status flip, the payment and the reservation are written in one
/// transaction. The flip is a conditional update on `payment_status =
/// Pending` and is the first statement of the transaction, so concurrent
/// callers queue on the write lock instead of upgrading a read. Whichever
/// caller affects the row first wins; every other caller for the same
/// booking gets [`AppError::AlreadyPaid`].
pub async fn complete_payment(
    db: &DatabaseConnection,
    username: &str,
    input: PaymentInput,
) -> AppResult<CompletedPayment> {
    let txn = db.begin().await?;

    let claimed = booking::Entity::update_many()
        .set(booking::ActiveModel {
            payment_status: Set(PaymentStatus::Paid),
            ..Default::default()
        })
        .filter(booking::Column::Id.eq(input.booking_id))
        .filter(booking::Column::Username.eq(username))
        .filter(booking::Column::PaymentStatus.eq(PaymentStatus::Pending))
        .filter(booking::Column::AmountPaid.eq(input.amount.minor()))
        .exec(&txn)
        .await?;

    let booking = booking::Entity::find_by_id(input.booking_id)
        .one(&txn)
        .await?;

    if claimed.rows_affected == 0 {
        return Err(rejection(booking, username, input.amount));
    }

    let booking = booking.ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    let now = Utc::now();

    let payment = payment::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking.id),
        username: Set(username.to_string()),
        payment_method: Set(input.payment_method),
        transaction_id: Set(new_transaction_id()),
        status: Set(PaymentRecordStatus::Completed),
        amount: Set(booking.amount_paid),
        created_at: Set(now.into()),
    }
    .insert(&txn)
    .await
    .map_err(|e| duplicate_payment(e, booking.id))?;

    let reservation = reservation::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        destination_id: Set(booking.destination_id),
        booking_id: Set(booking.id),
        payment_id: Set(payment.id),
        visit_date: Set(booking.visit_date),
        status: Set(ReservationStatus::Confirmed),
        created_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        booking_id = %booking.id,
        payment_id = %payment.id,
        reservation_id = %reservation.id,
        transaction_id = %payment.transaction_id,
        username,
        "Payment completed"
    );

    Ok(CompletedPayment {
        payment,
        reservation,
    })
}

/// Explain why the conditional update matched nothing. Checks run in the
/// order existence, ownership, status, amount.
fn rejection(booking: Option<booking::Model>, username: &str, amount: Money) -> AppError {
    let Some(booking) = booking else {
        return AppError::NotFound("Booking not found".to_string());
    };

    if booking.username != username {
        return AppError::Forbidden("You can only pay for your own bookings".to_string());
    }

    match booking.payment_status {
        PaymentStatus::Paid => {
            tracing::info!(booking_id = %booking.id, username, "Booking already paid");
            AppError::AlreadyPaid(booking.id)
        }
        PaymentStatus::Cancelled => AppError::Conflict("Booking has been cancelled".to_string()),
        PaymentStatus::Pending => {
            match pricing::reconcile(amount, Money::from_minor(booking.amount_paid)) {
                Err(e) => e,
                // Pending and matching on re-read means another payment is in flight
                Ok(()) => AppError::AlreadyPaid(booking.id),
            }
        }
    }
}

/// The unique index on `payment.booking_id` is the last line against a
/// second payment for the same booking.
fn duplicate_payment(err: DbErr, booking_id: Uuid) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyPaid(booking_id),
        _ => AppError::Database(err),
    }
}

pub async fn payment_history(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Vec<payment::Model>> {
    Ok(payment::Entity::find()
        .filter(payment::Column::Username.eq(username))
        .order_by_desc(payment::Column::CreatedAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await?)
}

/// Look up a payment by transaction id, scoped to its owner.
pub async fn find_payment(
    db: &DatabaseConnection,
    username: &str,
    transaction_id: &str,
) -> AppResult<payment::Model> {
    payment::Entity::find()
        .filter(payment::Column::TransactionId.eq(transaction_id))
        .filter(payment::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_input_validation() {
        let id = Uuid::new_v4();
        let input = PaymentInput::try_from(CompletePaymentRequest {
            booking_id: Some(id.to_string()),
            amount: Some(json!(1500)),
            payment_method: Some("Credit Card".to_string()),
        })
        .unwrap();
        assert_eq!(input.booking_id, id);
        assert_eq!(input.amount, Money::from_minor(150_000));

        assert!(matches!(
            PaymentInput::try_from(CompletePaymentRequest {
                booking_id: Some("not-a-uuid".to_string()),
                amount: Some(json!(1500)),
                payment_method: Some("Credit Card".to_string()),
            }),
            Err(AppError::Validation(_))
        ));

        assert!(matches!(
            PaymentInput::try_from(CompletePaymentRequest {
                booking_id: Some(id.to_string()),
                amount: Some(json!(1500)),
                payment_method: None,
            }),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_transaction_ids_are_unique() {
        let a = new_transaction_id();
        let b = new_transaction_id();
        assert!(a.starts_with("TXN-"));
        assert_ne!(a, b);
    }
}
