#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

use wanderlust_backend::entities::user::{self, UserRole};
use wanderlust_backend::entities::destination;
use wanderlust_backend::services::bookings::{self, CreatedBooking, NewBooking};
use wanderlust_backend::services::destinations::{self, CreateDestinationRequest};
use wanderlust_backend::services::payments::{self, CompletedPayment, PaymentInput};
use wanderlust_backend::utils::money::Money;

pub const FX_RATE: i64 = 83;

/// Fresh in-memory database with the real migrations applied. A single
/// connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open sqlite database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// File-backed database served by a pool of several connections, so
/// concurrent transactions really contend for the store. The directory must
/// outlive the connection.
pub async fn setup_pooled_db() -> (TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("wanderlust.db").display());

    let mut options = ConnectOptions::new(url);
    options.max_connections(4).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open sqlite database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    (dir, db)
}

pub fn fx_rate() -> Decimal {
    Decimal::from(FX_RATE)
}

pub fn rupees(major: i64) -> Money {
    Money::from_major(major).expect("amount in range")
}

pub fn visit_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub async fn create_user(db: &DatabaseConnection, username: &str) -> user::Model {
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{}@example.com", username)),
        password_hash: Set("hashedpassword".to_string()),
        role: Set(UserRole::Traveller),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to create user")
}

pub async fn create_destination(
    db: &DatabaseConnection,
    name: &str,
    base_price_usd: i64,
) -> destination::Model {
    destinations::create_destination(
        db,
        CreateDestinationRequest {
            name: Some(name.to_string()),
            description: Some(format!("A trip to {}", name)),
            city: Some(name.to_string()),
            country: Some("Testland".to_string()),
            category: Some("city".to_string()),
            budget: Some("medium".to_string()),
            amount: Some(json!(base_price_usd)),
            image: None,
        },
    )
    .await
    .expect("Failed to create destination")
}

pub async fn seeded_paris(db: &DatabaseConnection) -> destination::Model {
    destination::Entity::find()
        .filter(destination::Column::Name.eq("Paris"))
        .one(db)
        .await
        .expect("query failed")
        .expect("Paris is seeded by the migrations")
}

pub fn new_booking(destination_name: &str, hotel: i64, flight: i64, paid: i64) -> NewBooking {
    NewBooking {
        destination_name: destination_name.to_string(),
        visit_date: visit_date(),
        amount_paid: rupees(paid),
        hotel_price: rupees(hotel),
        flight_price: rupees(flight),
    }
}

/// A Pending booking of 500 + 1000 for `username`.
pub async fn pending_booking(
    db: &DatabaseConnection,
    username: &str,
    destination_name: &str,
) -> CreatedBooking {
    bookings::create_booking(
        db,
        fx_rate(),
        username,
        new_booking(destination_name, 500, 1000, 1500),
    )
    .await
    .expect("Failed to create booking")
}

pub fn payment_for(booking_id: Uuid, amount: i64) -> PaymentInput {
    PaymentInput {
        booking_id,
        amount: rupees(amount),
        payment_method: "Credit Card".to_string(),
    }
}

/// Book and pay in one go.
pub async fn paid_booking(
    db: &DatabaseConnection,
    username: &str,
    destination_name: &str,
) -> CompletedPayment {
    let created = pending_booking(db, username, destination_name).await;
    payments::complete_payment(db, username, payment_for(created.booking.id, 1500))
        .await
        .expect("Failed to complete payment")
}
