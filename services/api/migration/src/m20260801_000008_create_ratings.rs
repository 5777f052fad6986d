use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ratings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ratings::ProductId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Ratings::Rating).small_integer().not_null())
                    .col(
                        ColumnDef::new(Ratings::Review)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Ratings::VerifiedPurchase)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Ratings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Ratings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One rating per (product, customer). The upsert relies on this to
        // turn a concurrent double-insert into a unique violation.
        manager
            .create_index(
                Index::create()
                    .table(Ratings::Table)
                    .col(Ratings::ProductId)
                    .col(Ratings::CustomerId)
                    .name("idx_ratings_product_customer")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Ratings {
    Table,
    Id,
    ProductId,
    CustomerId,
    CustomerName,
    Rating,
    Review,
    VerifiedPurchase,
    CreatedAt,
    UpdatedAt,
}
