use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::entities::destination;
use crate::error::{AppError, AppResult};
use crate::services::{pricing, required};

#[derive(Debug, Default, Deserialize)]
pub struct CreateDestinationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub budget: Option<String>,
    /// Base price in USD
    pub amount: Option<Value>,
    pub image: Option<String>,
}

/// Destination ids arrive as strings; a malformed id cannot name an existing
/// destination, so it is reported the same way as an unknown one.
pub fn parse_destination_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound("Destination not found".to_string()))
}

pub async fn list_destinations(db: &DatabaseConnection) -> AppResult<Vec<destination::Model>> {
    Ok(destination::Entity::find()
        .order_by_asc(destination::Column::Name)
        .all(db)
        .await?)
}

pub async fn get_destination(db: &DatabaseConnection, id: Uuid) -> AppResult<destination::Model> {
    destination::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Destination not found".to_string()))
}

/// Exact, case-sensitive name lookup. Names are not unique; the earliest
/// created destination wins.
pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> AppResult<destination::Model> {
    destination::Entity::find()
        .filter(destination::Column::Name.eq(name))
        .order_by_asc(destination::Column::CreatedAt)
        .order_by_asc(destination::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Destination not found".to_string()))
}

pub async fn create_destination(
    db: &DatabaseConnection,
    payload: CreateDestinationRequest,
) -> AppResult<destination::Model> {
    let name = required(&payload.name, "name")?.to_string();
    let base_price = pricing::required_amount(payload.amount.as_ref(), "amount")?;

    let destination = destination::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(payload.description.unwrap_or_default()),
        city: Set(payload.city.unwrap_or_default()),
        country: Set(payload.country.unwrap_or_default()),
        category: Set(payload.category.unwrap_or_default()),
        budget: Set(payload.budget.unwrap_or_default()),
        base_price: Set(base_price.minor()),
        image: Set(payload.image),
        created_at: Set(Utc::now().into()),
    };

    let destination = destination.insert(db).await?;
    tracing::info!(destination_id = %destination.id, name = %destination.name, "Destination created");
    Ok(destination)
}
