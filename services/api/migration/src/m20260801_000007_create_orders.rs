use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Orders::OrderStatus).string().not_null())
                    .col(ColumnDef::new(Orders::TotalPrice).double().not_null())
                    .col(ColumnDef::new(Orders::ShipPhone).string())
                    .col(ColumnDef::new(Orders::ShipStreet).string())
                    .col(ColumnDef::new(Orders::ShipCity).string())
                    .col(ColumnDef::new(Orders::ShipState).string())
                    .col(ColumnDef::new(Orders::ShipPostalCode).string())
                    .col(ColumnDef::new(Orders::ShipCountry).string())
                    .col(ColumnDef::new(Orders::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Orders::PaymentStatus).string().not_null())
                    .col(ColumnDef::new(Orders::ProofImageUrl).string())
                    .col(ColumnDef::new(Orders::ProofUploadedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Orders::ProofVerified).boolean())
                    .col(ColumnDef::new(Orders::ProofVerifiedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Orders::CouponId).uuid())
                    .col(ColumnDef::new(Orders::Subtotal).double().not_null())
                    .col(ColumnDef::new(Orders::Discount).double().not_null())
                    .col(ColumnDef::new(Orders::Total).double().not_null())
                    .col(ColumnDef::new(Orders::TrackingUrl).string())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderItems::ProductId).uuid().not_null())
                    .col(ColumnDef::new(OrderItems::ProductName).string().not_null())
                    .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                    .col(ColumnDef::new(OrderItems::Price).double().not_null())
                    .col(ColumnDef::new(OrderItems::Variant).string())
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .name("idx_orders_customer_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::PaymentStatus)
                    .name("idx_orders_payment_status")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(OrderItems::Table)
                    .col(OrderItems::OrderId)
                    .name("idx_order_items_order_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    CustomerId,
    OrderStatus,
    TotalPrice,
    ShipPhone,
    ShipStreet,
    ShipCity,
    ShipState,
    ShipPostalCode,
    ShipCountry,
    PaymentMethod,
    PaymentStatus,
    ProofImageUrl,
    ProofUploadedAt,
    ProofVerified,
    ProofVerifiedAt,
    CouponId,
    Subtotal,
    Discount,
    Total,
    TrackingUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    ProductId,
    ProductName,
    Quantity,
    Price,
    Variant,
}
