pub mod admin_users;
pub mod catalog;
pub mod coupons;
pub mod customers;
pub mod notifications;
pub mod orders;
pub mod posters;
pub mod products;
pub mod ratings;

pub use admin_users::DbAdminUserRepository;
pub use catalog::{
    DbBrandRepository, DbCategoryRepository, DbSubCategoryRepository, DbVariantRepository,
    DbVariantTypeRepository,
};
pub use coupons::DbCouponRepository;
pub use customers::DbCustomerRepository;
pub use notifications::DbNotificationRepository;
pub use orders::DbOrderRepository;
pub use posters::DbPosterRepository;
pub use products::DbProductRepository;
pub use ratings::DbRatingRepository;

use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use market_api_schema::admin_users as admin_users_schema;

use crate::domain::types::AdminSummary;
use crate::error::ApiError;

/// Batch-resolve creator uuids to `{id, username, name}` summaries for
/// populated list responses. Unknown ids are simply absent from the map.
pub(crate) async fn admin_summaries(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, AdminSummary>, ApiError> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = admin_users_schema::Entity::find()
        .filter(admin_users_schema::Column::Id.is_in(ids))
        .all(db)
        .await
        .context("resolve admin summaries")?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.id,
                AdminSummary {
                    id: row.id,
                    username: row.username,
                    name: row.name,
                },
            )
        })
        .collect())
}
