mod common;

use sea_orm::{EntityTrait, PaginatorTrait};

use common::*;
use wanderlust_backend::entities::booking::{self, PaymentStatus};
use wanderlust_backend::services::{bookings, destinations};
use wanderlust_backend::AppError;

#[tokio::test]
async fn test_paris_booking_with_matching_total() {
    let db = setup_db().await;
    let paris = seeded_paris(&db).await;

    let created = bookings::create_booking(
        &db,
        fx_rate(),
        "testuser",
        new_booking("Paris", 1000, 1000, 2000),
    )
    .await
    .unwrap();

    assert_eq!(created.booking.amount_paid, rupees(2000).minor());
    assert_eq!(created.booking.hotel_price, rupees(1000).minor());
    assert_eq!(created.booking.flight_price, rupees(1000).minor());
    assert_eq!(created.booking.payment_status, PaymentStatus::Pending);
    assert_eq!(created.booking.username, "testuser");
    assert_eq!(created.booking.destination_id, paris.id);
    // Base price 1000 USD at 83 is shown but not charged
    assert_eq!(created.reference_price, rupees(83_000));
}

#[tokio::test]
async fn test_paris_booking_with_wrong_total_is_rejected() {
    let db = setup_db().await;

    let err = bookings::create_booking(
        &db,
        fx_rate(),
        "testuser",
        new_booking("Paris", 1000, 1000, 1500),
    )
    .await
    .unwrap_err();

    match err {
        AppError::AmountMismatch { expected, received } => {
            assert_eq!(expected, rupees(2000));
            assert_eq!(received, rupees(1500));
        }
        other => panic!("expected AmountMismatch, got {:?}", other),
    }

    assert_eq!(booking::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_booking_succeeds_only_on_exact_total() {
    let db = setup_db().await;
    create_destination(&db, "Lisbon", 400).await;

    let cases = [
        (500, 1000, 1500, true),
        (500, 1000, 1501, false),
        (500, 1000, 1499, false),
        (0, 0, 0, true),
        (1200, 0, 1200, true),
        // The base price never counts towards the total
        (500, 1000, 1500 + 400 * FX_RATE, false),
    ];

    for (hotel, flight, paid, ok) in cases {
        let result = bookings::create_booking(
            &db,
            fx_rate(),
            "testuser",
            new_booking("Lisbon", hotel, flight, paid),
        )
        .await;

        assert_eq!(
            result.is_ok(),
            ok,
            "hotel={} flight={} paid={}",
            hotel,
            flight,
            paid
        );
        if !ok {
            assert!(matches!(result, Err(AppError::AmountMismatch { .. })));
        }
    }
}

#[tokio::test]
async fn test_unknown_destination_is_not_found() {
    let db = setup_db().await;

    let err = bookings::create_booking(
        &db,
        fx_rate(),
        "testuser",
        new_booking("Atlantis", 500, 1000, 1500),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_destination_lookup_is_case_sensitive() {
    let db = setup_db().await;

    let err = bookings::create_booking(
        &db,
        fx_rate(),
        "testuser",
        new_booking("paris", 1000, 1000, 2000),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_duplicate_names_resolve_to_earliest_destination() {
    let db = setup_db().await;
    let paris = seeded_paris(&db).await;
    let later = create_destination(&db, "Paris", 50).await;
    let latest = create_destination(&db, "Paris", 60).await;

    for _ in 0..3 {
        let found = destinations::find_by_name(&db, "Paris").await.unwrap();
        assert_eq!(found.id, paris.id);
    }

    let created = bookings::create_booking(
        &db,
        fx_rate(),
        "testuser",
        new_booking("Paris", 1000, 1000, 2000),
    )
    .await
    .unwrap();
    assert_eq!(created.booking.destination_id, paris.id);
    assert_ne!(created.booking.destination_id, later.id);
    assert_ne!(created.booking.destination_id, latest.id);
}

#[tokio::test]
async fn test_bookings_are_scoped_to_owner() {
    let db = setup_db().await;

    let mine = pending_booking(&db, "alice", "Paris").await;
    pending_booking(&db, "bob", "Paris").await;

    let listed = bookings::list_bookings(&db, "alice").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, mine.booking.id);

    let fetched = bookings::get_booking(&db, "alice", mine.booking.id).await.unwrap();
    assert_eq!(fetched.id, mine.booking.id);

    let err = bookings::get_booking(&db, "bob", mine.booking.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(bookings::list_all_bookings(&db).await.unwrap().len(), 2);
}
