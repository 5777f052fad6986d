use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posters::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posters::Name).string().not_null())
                    .col(ColumnDef::new(Posters::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Posters::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Posters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posters::UpdatedAt)
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
            .drop_table(Table::drop().table(Posters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Posters {
    Table,
    Id,
    Name,
    ImageUrl,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
