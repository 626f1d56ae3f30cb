use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, destinations, favorites, reservations, traveller};
use crate::middleware::auth::{auth_middleware, require_admin, require_traveller};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::user_rate_limit::create_user_governor;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let public_governor = create_public_governor();
    let traveller_governor = create_user_governor();

    // Public routes (IP rate limited)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor.clone());

    let public_routes = Router::new()
        .route("/destinations", get(destinations::list_destinations))
        .route("/destinations/{id}", get(destinations::get_destination))
        .route(
            "/destinations/by-name/{name}",
            get(destinations::get_destination_by_name),
        )
        .layer(public_governor);

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        .route("/destinations", post(admin::create_destination))
        .route("/bookings", get(admin::list_all_bookings))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Traveller routes (requires auth + traveller role, rate limited per user)
    let traveller_routes = Router::new()
        // Bookings
        .route("/bookings", post(traveller::create_booking))
        .route("/bookings", get(traveller::my_bookings))
        .route("/bookings/{id}", get(traveller::get_booking))
        // Payments
        .route("/payments/complete", post(traveller::complete_payment))
        .route("/payments/history", get(traveller::payment_history))
        .route("/payments/{transaction_id}", get(traveller::get_payment))
        // Reservations
        .route("/reservations", get(reservations::my_reservations))
        .route(
            "/reservations/{id}/visit-date",
            put(reservations::update_visit_date),
        )
        .route("/reservations/{id}", delete(reservations::cancel_reservation))
        // Favorites
        .route("/favorites", get(favorites::my_favorites))
        .route("/favorites/toggle", post(favorites::toggle_favorite))
        .route("/favorites/add", get(favorites::add_favorite))
        .route("/favorites/{destination_id}", delete(favorites::remove_favorite))
        .layer(traveller_governor)
        .layer(middleware::from_fn(require_traveller))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api", public_routes.merge(traveller_routes))
        .with_state(state)
}
