use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coupons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Coupons::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Coupons::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Coupons::DiscountType).string().not_null())
                    .col(ColumnDef::new(Coupons::DiscountAmount).double().not_null())
                    .col(ColumnDef::new(Coupons::MinimumPurchaseAmount).double())
                    .col(
                        ColumnDef::new(Coupons::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Coupons::Status).string().not_null())
                    .col(ColumnDef::new(Coupons::ApplicableCategoryId).uuid())
                    .col(ColumnDef::new(Coupons::ApplicableSubCategoryId).uuid())
                    .col(ColumnDef::new(Coupons::ApplicableProductId).uuid())
                    .col(ColumnDef::new(Coupons::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Coupons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Coupons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Coupons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Coupons {
    Table,
    Id,
    Code,
    DiscountType,
    DiscountAmount,
    MinimumPurchaseAmount,
    EndDate,
    Status,
    ApplicableCategoryId,
    ApplicableSubCategoryId,
    ApplicableProductId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
