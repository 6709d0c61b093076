use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Testimonial::Table)
                    .if_not_exists()
                    .col(uuid(Testimonial::Id).primary_key())
                    .col(string_len(Testimonial::Name, 100).not_null())
                    .col(string_len(Testimonial::Email, 255).not_null())
                    .col(integer(Testimonial::Rating).not_null())
                    .col(text(Testimonial::Message).not_null())
                    .col(string_len_null(Testimonial::Avatar, 500))
                    .col(boolean(Testimonial::IsApproved).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Testimonial::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Testimonial::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Testimonial::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Testimonial {
    Table,
    Id,
    Name,
    Email,
    Rating,
    Message,
    Avatar,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}
