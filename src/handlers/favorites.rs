use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::entities::destination;
use crate::error::AppResult;
use crate::services::destinations::parse_destination_id;
use crate::services::{favorites, required};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    #[serde(alias = "place")]
    pub destination_id: Option<String>,
    #[serde(alias = "want_favorited")]
    pub favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub is_favorited: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddFavoriteQuery {
    pub dest_id: Option<String>,
}

/// List user's favorite destinations
pub async fn my_favorites(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<destination::Model>>> {
    let favorites = favorites::list_favorites(&state.db, &claims.username).await?;
    Ok(Json(favorites))
}

/// Set or clear a destination as favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ToggleFavoriteRequest>,
) -> AppResult<Json<ToggleFavoriteResponse>> {
    let destination_id =
        parse_destination_id(required(&payload.destination_id, "destination_id")?)?;

    let is_favorited =
        favorites::toggle_favorite(&state.db, &claims.username, destination_id, payload.favorite)
            .await?;

    Ok(Json(ToggleFavoriteResponse { is_favorited }))
}

/// Add a destination to favorites from a link
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<AddFavoriteQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let destination_id = parse_destination_id(required(&query.dest_id, "dest_id")?)?;

    let destination = favorites::add_favorite(&state.db, &claims.username, destination_id).await?;

    Ok(Json(serde_json::json!({
        "message": format!("{} added to favorites", destination.name),
        "is_favorited": true,
    })))
}

/// Remove a destination from favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(destination_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let destination_id = parse_destination_id(&destination_id)?;

    favorites::remove_favorite(&state.db, &claims.username, destination_id).await?;

    Ok(Json(serde_json::json!({
        "message": "Destination removed from favorites",
    })))
}
