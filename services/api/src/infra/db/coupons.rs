use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use market_api_schema::coupons;

use crate::domain::repository::{CatalogRepository, CouponLookup, NewCoupon};
use crate::domain::types::{Coupon, CouponStatus, DiscountType};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbCouponRepository {
    pub db: DatabaseConnection,
}

fn coupon_from_model(model: coupons::Model) -> Result<Coupon, ApiError> {
    let discount_type = DiscountType::parse(&model.discount_type)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("bad discount_type in row")))?;
    let status = CouponStatus::parse(&model.status)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("bad coupon status in row")))?;
    Ok(Coupon {
        id: model.id,
        code: model.code,
        discount_type,
        discount_amount: model.discount_amount,
        minimum_purchase_amount: model.minimum_purchase_amount,
        end_date: model.end_date,
        status,
        applicable_category_id: model.applicable_category_id,
        applicable_sub_category_id: model.applicable_sub_category_id,
        applicable_product_id: model.applicable_product_id,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl DbCouponRepository {
    /// Case-insensitive lookup for the public coupon check.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, ApiError> {
        let model = coupons::Entity::find()
            .filter(coupons::Column::Code.eq(code.trim().to_uppercase()))
            .one(&self.db)
            .await
            .context("find coupon by code")?;
        model.map(coupon_from_model).transpose()
    }
}

impl CouponLookup for DbCouponRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, ApiError> {
        DbCouponRepository::find_by_code(self, code).await
    }
}

impl CatalogRepository for DbCouponRepository {
    type Entity = Coupon;
    type NewEntity = NewCoupon;
    type Patch = NewCoupon;

    const KIND: &'static str = "coupon";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Coupon>, ApiError> {
        let mut query = coupons::Entity::find().order_by_desc(coupons::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(coupons::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list coupons")?;
        models.into_iter().map(coupon_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Coupon>, ApiError> {
        let model = coupons::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find coupon")?;
        model.map(coupon_from_model).transpose()
    }

    async fn insert(&self, new: NewCoupon, created_by: Uuid) -> Result<Coupon, ApiError> {
        let now = Utc::now();
        let model = coupons::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(new.code.trim().to_uppercase()),
            discount_type: Set(new.discount_type.as_str().to_owned()),
            discount_amount: Set(new.discount_amount),
            minimum_purchase_amount: Set(new.minimum_purchase_amount),
            end_date: Set(new.end_date),
            status: Set(new.status.as_str().to_owned()),
            applicable_category_id: Set(new.applicable_category_id),
            applicable_sub_category_id: Set(new.applicable_sub_category_id),
            applicable_product_id: Set(new.applicable_product_id),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::Conflict("coupon code already exists".into())
            }
            _ => ApiError::Internal(anyhow::Error::new(e).context("insert coupon")),
        })?;
        coupon_from_model(model)
    }

    async fn apply_patch(&self, id: Uuid, patch: NewCoupon) -> Result<Option<Coupon>, ApiError> {
        let Some(existing) = coupons::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find coupon for update")?
        else {
            return Ok(None);
        };

        let mut active: coupons::ActiveModel = existing.into();
        active.code = Set(patch.code.trim().to_uppercase());
        active.discount_type = Set(patch.discount_type.as_str().to_owned());
        active.discount_amount = Set(patch.discount_amount);
        active.minimum_purchase_amount = Set(patch.minimum_purchase_amount);
        active.end_date = Set(patch.end_date);
        active.status = Set(patch.status.as_str().to_owned());
        active.applicable_category_id = Set(patch.applicable_category_id);
        active.applicable_sub_category_id = Set(patch.applicable_sub_category_id);
        active.applicable_product_id = Set(patch.applicable_product_id);
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update coupon")?;
        Ok(Some(coupon_from_model(model)?))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        coupons::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete coupon")?;
        Ok(())
    }

    async fn dependent_count(&self, _id: Uuid) -> Result<u64, ApiError> {
        Ok(0)
    }
}
