use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::reservation;
use crate::error::AppResult;
use crate::services::reservations::{self, ReservationView};
use crate::services::{parse_visit_date, required};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateVisitDateRequest {
    pub visit_date: Option<String>,
}

/// List user's reservations
pub async fn my_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let reservations = reservations::list_reservations(&state.db, &claims.username).await?;
    Ok(Json(reservations))
}

/// Change the visit date of a reservation
pub async fn update_visit_date(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(reservation_id): Path<Uuid>,
    Json(payload): Json<UpdateVisitDateRequest>,
) -> AppResult<Json<reservation::Model>> {
    let new_date = parse_visit_date(required(&payload.visit_date, "visit_date")?)?;

    let reservation =
        reservations::update_visit_date(&state.db, &claims.username, reservation_id, new_date)
            .await?;

    Ok(Json(reservation))
}

/// Cancel a reservation
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(reservation_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let cancelled =
        reservations::cancel_reservation(&state.db, &claims.username, reservation_id).await?;

    Ok(Json(serde_json::json!({
        "message": "Reservation cancelled successfully",
        "reservation": cancelled,
    })))
}
