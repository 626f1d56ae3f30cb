mod common;

use std::time::Duration;

use chrono::NaiveDate;
use sea_orm::EntityTrait;

use common::*;
use wanderlust_backend::entities::booking::{self, PaymentStatus};
use wanderlust_backend::entities::payment;
use wanderlust_backend::entities::reservation::ReservationStatus;
use wanderlust_backend::services::reservations;
use wanderlust_backend::AppError;

#[tokio::test]
async fn test_reservation_round_trip() {
    let db = setup_db().await;
    let paris = seeded_paris(&db).await;
    let completed = paid_booking(&db, "testuser", "Paris").await;

    let listed = reservations::list_reservations(&db, "testuser").await.unwrap();
    assert_eq!(listed.len(), 1);

    let view = &listed[0];
    assert_eq!(view.id, completed.reservation.id);
    assert_eq!(view.booking_id, completed.payment.booking_id);
    assert_eq!(view.destination_id, paris.id);
    assert_eq!(view.destination_name.as_deref(), Some("Paris"));
    assert_eq!(view.visit_date, visit_date());
    assert_eq!(view.payment_id, completed.payment.id);
    assert_eq!(view.status, ReservationStatus::Confirmed);

    let snapshot = view.booking.as_ref().expect("booking joined");
    assert_eq!(snapshot.booking_id, completed.payment.booking_id);
    assert_eq!(snapshot.amount_paid, rupees(1500));
    assert_eq!(snapshot.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_reservations_newest_first_and_scoped() {
    let db = setup_db().await;
    create_destination(&db, "Lisbon", 400).await;

    let older = paid_booking(&db, "testuser", "Paris").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newer = paid_booking(&db, "testuser", "Lisbon").await;
    paid_booking(&db, "someoneelse", "Paris").await;

    let listed = reservations::list_reservations(&db, "testuser").await.unwrap();
    let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newer.reservation.id, older.reservation.id]);

    assert!(reservations::list_reservations(&db, "nobody")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_update_visit_date_by_owner() {
    let db = setup_db().await;
    let completed = paid_booking(&db, "testuser", "Paris").await;
    let new_date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();

    let updated = reservations::update_visit_date(&db, "testuser", completed.reservation.id, new_date)
        .await
        .unwrap();
    assert_eq!(updated.visit_date, new_date);

    let listed = reservations::list_reservations(&db, "testuser").await.unwrap();
    assert_eq!(listed[0].visit_date, new_date);

    // The booking keeps its original date
    let booking = booking::Entity::find_by_id(completed.payment.booking_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.visit_date, visit_date());
}

#[tokio::test]
async fn test_update_visit_date_by_other_user_is_not_found() {
    let db = setup_db().await;
    let completed = paid_booking(&db, "alice", "Paris").await;
    let new_date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();

    let err = reservations::update_visit_date(&db, "bob", completed.reservation.id, new_date)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let listed = reservations::list_reservations(&db, "alice").await.unwrap();
    assert_eq!(listed[0].visit_date, visit_date());

    let err = reservations::update_visit_date(&db, "alice", uuid::Uuid::new_v4(), new_date)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_cancel_keeps_audit_trail() {
    let db = setup_db().await;
    let completed = paid_booking(&db, "testuser", "Paris").await;

    let cancelled = reservations::cancel_reservation(&db, "testuser", completed.reservation.id)
        .await
        .unwrap();
    assert_eq!(cancelled.id, completed.reservation.id);
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    assert!(reservations::list_reservations(&db, "testuser")
        .await
        .unwrap()
        .is_empty());

    let booking = booking::Entity::find_by_id(completed.payment.booking_id)
        .one(&db)
        .await
        .unwrap()
        .expect("booking kept");
    assert_eq!(booking.payment_status, PaymentStatus::Paid);

    assert!(payment::Entity::find_by_id(completed.payment.id)
        .one(&db)
        .await
        .unwrap()
        .is_some());

    let err = reservations::cancel_reservation(&db, "testuser", completed.reservation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_cancel_by_other_user_is_not_found() {
    let db = setup_db().await;
    let completed = paid_booking(&db, "alice", "Paris").await;

    let err = reservations::cancel_reservation(&db, "bob", completed.reservation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(
        reservations::list_reservations(&db, "alice").await.unwrap().len(),
        1
    );
}
