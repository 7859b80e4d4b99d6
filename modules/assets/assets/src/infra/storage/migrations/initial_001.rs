use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Assets::HouseholdId).string().not_null())
                    .col(ColumnDef::new(Assets::Make).string().not_null())
                    .col(ColumnDef::new(Assets::Model).string().not_null())
                    .col(ColumnDef::new(Assets::SerialNumber).string())
                    .col(ColumnDef::new(Assets::Description).text())
                    .col(ColumnDef::new(Assets::Category).string())
                    .col(ColumnDef::new(Assets::Value).double().not_null())
                    .col(ColumnDef::new(Assets::PurchaseDate).date())
                    .col(ColumnDef::new(Assets::ImageUrl).text())
                    .col(
                        ColumnDef::new(Assets::ImageUrlsJson)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Assets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assets_household_created")
                    .table(Assets::Table)
                    .col(Assets::HouseholdId)
                    .col(Assets::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    HouseholdId,
    Make,
    Model,
    SerialNumber,
    Description,
    Category,
    Value,
    PurchaseDate,
    ImageUrl,
    ImageUrlsJson,
    CreatedAt,
    UpdatedAt,
}
