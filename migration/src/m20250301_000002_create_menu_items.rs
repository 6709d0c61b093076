use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250301_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(MenuCategory::Enum)
                    .values([
                        MenuCategory::Breakfast,
                        MenuCategory::Lunch,
                        MenuCategory::Dinner,
                        MenuCategory::Drinks,
                        MenuCategory::Desserts,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(SpiceLevel::Enum)
                    .values([SpiceLevel::Mild, SpiceLevel::Medium, SpiceLevel::Hot])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MenuItem::Table)
                    .if_not_exists()
                    .col(uuid(MenuItem::Id).primary_key())
                    .col(string_len(MenuItem::Name, 100).not_null())
                    .col(text(MenuItem::Description).not_null())
                    .col(double(MenuItem::Price).not_null())
                    .col(
                        ColumnDef::new(MenuItem::Category)
                            .custom(MenuCategory::Enum)
                            .not_null(),
                    )
                    .col(string_len(MenuItem::Image, 500).not_null())
                    .col(boolean(MenuItem::IsAvailable).not_null().default(true))
                    .col(boolean(MenuItem::IsVeg).not_null().default(false))
                    .col(json_binary(MenuItem::Ingredients).not_null())
                    .col(
                        ColumnDef::new(MenuItem::SpiceLevel)
                            .custom(SpiceLevel::Enum)
                            .not_null(),
                    )
                    .col(double(MenuItem::AverageRating).not_null().default(0.0))
                    .col(integer(MenuItem::ReviewCount).not_null().default(0))
                    .col(integer(MenuItem::OrderCount).not_null().default(0))
                    .col(uuid(MenuItem::OwnerId).not_null())
                    .col(
                        timestamp_with_time_zone(MenuItem::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MenuItem::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_item_owner")
                            .from(MenuItem::Table, MenuItem::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuItem::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(SpiceLevel::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(MenuCategory::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MenuItem {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    Image,
    IsAvailable,
    IsVeg,
    Ingredients,
    SpiceLevel,
    AverageRating,
    ReviewCount,
    OrderCount,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum MenuCategory {
    #[sea_orm(iden = "menu_category")]
    Enum,
    #[sea_orm(iden = "Breakfast")]
    Breakfast,
    #[sea_orm(iden = "Lunch")]
    Lunch,
    #[sea_orm(iden = "Dinner")]
    Dinner,
    #[sea_orm(iden = "Drinks")]
    Drinks,
    #[sea_orm(iden = "Desserts")]
    Desserts,
}

#[derive(DeriveIden)]
pub enum SpiceLevel {
    #[sea_orm(iden = "spice_level")]
    Enum,
    #[sea_orm(iden = "Mild")]
    Mild,
    #[sea_orm(iden = "Medium")]
    Medium,
    #[sea_orm(iden = "Hot")]
    Hot,
}
