use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_users::User;
use super::m20250301_000002_create_menu_items::MenuItem;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(uuid(Review::Id).primary_key())
                    .col(uuid(Review::MenuItemId).not_null())
                    .col(uuid(Review::UserId).not_null())
                    .col(integer(Review::Rating).not_null())
                    .col(string_len(Review::Comment, 500).not_null())
                    .col(string_len_null(Review::AdminReply, 500))
                    .col(uuid_null(Review::RepliedBy))
                    .col(timestamp_with_time_zone_null(Review::RepliedAt))
                    .col(
                        timestamp_with_time_zone(Review::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Review::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_menu_item")
                            .from(Review::Table, Review::MenuItemId)
                            .to(MenuItem::Table, MenuItem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_replied_by")
                            .from(Review::Table, Review::RepliedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One review per user per menu item
        manager
            .create_index(
                Index::create()
                    .name("idx_review_menu_item_user")
                    .table(Review::Table)
                    .col(Review::MenuItemId)
                    .col(Review::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Review {
    Table,
    Id,
    MenuItemId,
    UserId,
    Rating,
    Comment,
    AdminReply,
    RepliedBy,
    RepliedAt,
    CreatedAt,
    UpdatedAt,
}
