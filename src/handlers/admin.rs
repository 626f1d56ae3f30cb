use axum::{extract::State, http::StatusCode, Json};

use crate::entities::destination;
use crate::error::AppResult;
use crate::handlers::traveller::BookingResponse;
use crate::services::bookings;
use crate::services::destinations::{self, CreateDestinationRequest};
use crate::AppState;

/// Create a destination (admin)
pub async fn create_destination(
    State(state): State<AppState>,
    Json(payload): Json<CreateDestinationRequest>,
) -> AppResult<(StatusCode, Json<destination::Model>)> {
    let destination = destinations::create_destination(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(destination)))
}

/// List all bookings (admin)
pub async fn list_all_bookings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = bookings::list_all_bookings(&state.db).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}
