use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{destination, user, user_favorite};
use crate::error::{AppError, AppResult};

async fn find_user(db: &DatabaseConnection, username: &str) -> AppResult<user::Model> {
    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

async fn find_destination(
    db: &DatabaseConnection,
    destination_id: Uuid,
) -> AppResult<destination::Model> {
    destination::Entity::find_by_id(destination_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Destination not found".to_string()))
}

/// Insert-if-absent. Returns whether a row was actually added.
async fn insert_favorite(db: &DatabaseConnection, user_id: Uuid, destination_id: Uuid) -> AppResult<bool> {
    let favorite = user_favorite::ActiveModel {
        user_id: Set(user_id),
        destination_id: Set(destination_id),
        created_at: Set(Utc::now().into()),
    };

    let inserted = user_favorite::Entity::insert(favorite)
        .on_conflict(
            OnConflict::columns([
                user_favorite::Column::UserId,
                user_favorite::Column::DestinationId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(inserted > 0)
}

/// Returns whether a row was actually removed.
async fn delete_favorite(db: &DatabaseConnection, user_id: Uuid, destination_id: Uuid) -> AppResult<bool> {
    let result = user_favorite::Entity::delete_many()
        .filter(user_favorite::Column::UserId.eq(user_id))
        .filter(user_favorite::Column::DestinationId.eq(destination_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Set membership of `destination_id` in the caller's favorites to
/// `want_favorited` and return the resulting membership.
pub async fn toggle_favorite(
    db: &DatabaseConnection,
    username: &str,
    destination_id: Uuid,
    want_favorited: bool,
) -> AppResult<bool> {
    let user = find_user(db, username).await?;
    let destination = find_destination(db, destination_id).await?;

    if want_favorited {
        let added = insert_favorite(db, user.id, destination.id).await?;
        tracing::debug!(username, destination_id = %destination.id, added, "Favorite set");
    } else {
        let removed = delete_favorite(db, user.id, destination.id).await?;
        tracing::debug!(username, destination_id = %destination.id, removed, "Favorite cleared");
    }

    Ok(want_favorited)
}

/// Idempotent add used by the link-style endpoint.
pub async fn add_favorite(
    db: &DatabaseConnection,
    username: &str,
    destination_id: Uuid,
) -> AppResult<destination::Model> {
    let destination = find_destination(db, destination_id).await?;
    let user = find_user(db, username).await?;

    insert_favorite(db, user.id, destination.id).await?;
    Ok(destination)
}

/// Strict removal: fails when the destination is not currently a favorite.
pub async fn remove_favorite(
    db: &DatabaseConnection,
    username: &str,
    destination_id: Uuid,
) -> AppResult<()> {
    let destination = find_destination(db, destination_id).await?;
    let user = find_user(db, username).await?;

    if !delete_favorite(db, user.id, destination.id).await? {
        return Err(AppError::Validation("Destination not in favorites".to_string()));
    }
    Ok(())
}

pub async fn list_favorites(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Vec<destination::Model>> {
    let user = find_user(db, username).await?;

    Ok(user
        .find_related(destination::Entity)
        .order_by_asc(user_favorite::Column::CreatedAt)
        .order_by_asc(destination::Column::Name)
        .all(db)
        .await?)
}
