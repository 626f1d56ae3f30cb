use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_users::User;
use super::m20250301_000002_create_destinations::Destination;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The composite key makes a duplicate favorite unrepresentable
        manager
            .create_table(
                Table::create()
                    .table(UserFavorite::Table)
                    .if_not_exists()
                    .col(uuid(UserFavorite::UserId).not_null())
                    .col(uuid(UserFavorite::DestinationId).not_null())
                    .col(
                        timestamp_with_time_zone(UserFavorite::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserFavorite::UserId)
                            .col(UserFavorite::DestinationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favorite_user")
                            .from(UserFavorite::Table, UserFavorite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favorite_destination")
                            .from(UserFavorite::Table, UserFavorite::DestinationId)
                            .to(Destination::Table, Destination::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFavorite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserFavorite {
    Table,
    UserId,
    DestinationId,
    CreatedAt,
}
