use sea_orm_migration::prelude::*;

// Catalog tables: categories, sub_categories, brands, variant_types,
// variants. Parent and creator references are plain uuid columns; the
// pre-delete dependency scan in the application enforces integrity, so a
// cascade delete of one admin's rows cannot trip a store-level constraint
// on rows owned by another admin.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Categories::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
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
                    .table(SubCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubCategories::Name).string().not_null())
                    .col(ColumnDef::new(SubCategories::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(SubCategories::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(SubCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SubCategories::UpdatedAt)
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
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Brands::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Brands::Name).string().not_null())
                    .col(ColumnDef::new(Brands::SubCategoryId).uuid().not_null())
                    .col(ColumnDef::new(Brands::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Brands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Brands::UpdatedAt)
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
                    .table(VariantTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VariantTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VariantTypes::Name).string().not_null())
                    .col(ColumnDef::new(VariantTypes::Kind).string().not_null())
                    .col(ColumnDef::new(VariantTypes::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(VariantTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VariantTypes::UpdatedAt)
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
                    .table(Variants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Variants::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Variants::Name).string().not_null())
                    .col(ColumnDef::new(Variants::VariantTypeId).uuid().not_null())
                    .col(ColumnDef::new(Variants::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Variants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Variants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(SubCategories::Table)
                    .col(SubCategories::CategoryId)
                    .name("idx_sub_categories_category_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Brands::Table)
                    .col(Brands::SubCategoryId)
                    .name("idx_brands_sub_category_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Variants::Table)
                    .col(Variants::VariantTypeId)
                    .name("idx_variants_variant_type_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Variants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VariantTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    ImageUrl,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SubCategories {
    Table,
    Id,
    Name,
    CategoryId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Brands {
    Table,
    Id,
    Name,
    SubCategoryId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum VariantTypes {
    Table,
    Id,
    Name,
    Kind,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Variants {
    Table,
    Id,
    Name,
    VariantTypeId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
