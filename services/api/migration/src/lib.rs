use sea_orm_migration::prelude::*;

mod m20260801_000001_create_admin_users;
mod m20260801_000002_create_customers;
mod m20260801_000003_create_catalog;
mod m20260801_000004_create_products;
mod m20260801_000005_create_coupons;
mod m20260801_000006_create_posters;
mod m20260801_000007_create_orders;
mod m20260801_000008_create_ratings;
mod m20260801_000009_create_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_admin_users::Migration),
            Box::new(m20260801_000002_create_customers::Migration),
            Box::new(m20260801_000003_create_catalog::Migration),
            Box::new(m20260801_000004_create_products::Migration),
            Box::new(m20260801_000005_create_coupons::Migration),
            Box::new(m20260801_000006_create_posters::Migration),
            Box::new(m20260801_000007_create_orders::Migration),
            Box::new(m20260801_000008_create_ratings::Migration),
            Box::new(m20260801_000009_create_notifications::Migration),
        ]
    }
}
