use axum::{
    extract::{Path, State},
    Json,
};

use crate::entities::destination;
use crate::error::AppResult;
use crate::services::destinations;
use crate::AppState;

/// List all destinations
pub async fn list_destinations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<destination::Model>>> {
    Ok(Json(destinations::list_destinations(&state.db).await?))
}

/// Get destination details
pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<destination::Model>> {
    let id = destinations::parse_destination_id(&id)?;
    Ok(Json(destinations::get_destination(&state.db, id).await?))
}

/// Look a destination up by exact name (booking page)
pub async fn get_destination_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<destination::Model>> {
    Ok(Json(destinations::find_by_name(&state.db, &name).await?))
}
