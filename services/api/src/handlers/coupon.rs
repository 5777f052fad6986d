use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::NewCoupon;
use crate::domain::types::{Coupon, CouponStatus, DiscountType};
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};
use crate::usecase::coupon::{CheckCouponInput, CheckCouponUseCase, CouponCheck};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponBody {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    pub minimum_purchase_amount: Option<f64>,
    pub end_date: DateTime<Utc>,
    pub status: CouponStatus,
    pub applicable_category: Option<Uuid>,
    pub applicable_sub_category: Option<Uuid>,
    pub applicable_product: Option<Uuid>,
}

impl CouponBody {
    fn validate(&self) -> Result<(), ApiError> {
        if self.code.trim().is_empty() {
            return Err(ApiError::Validation("code is required"));
        }
        if self.discount_amount <= 0.0 {
            return Err(ApiError::Validation("discount amount must be positive"));
        }
        Ok(())
    }

    fn into_new(self) -> NewCoupon {
        NewCoupon {
            code: self.code,
            discount_type: self.discount_type,
            discount_amount: self.discount_amount,
            minimum_purchase_amount: self.minimum_purchase_amount,
            end_date: self.end_date,
            status: self.status,
            applicable_category_id: self.applicable_category,
            applicable_sub_category_id: self.applicable_sub_category,
            applicable_product_id: self.applicable_product,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCouponBody {
    pub coupon_code: String,
    #[serde(default)]
    pub purchase_amount: f64,
    #[serde(default)]
    pub product_ids: Vec<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<Coupon>>>, ApiError> {
    let coupons = ListEntitiesUseCase {
        repo: state.coupon_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok("Coupons retrieved successfully.", coupons))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Coupon>>, ApiError> {
    let coupon = GetEntityUseCase {
        repo: state.coupon_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("Coupon retrieved successfully.", coupon))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<CouponBody>,
) -> Result<Json<Envelope<Coupon>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let coupon = CreateEntityUseCase {
        repo: state.coupon_repo(),
    }
    .execute(admin, body.into_new())
    .await?;
    Ok(Envelope::ok("Coupon created successfully.", coupon))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<CouponBody>,
) -> Result<Json<Envelope<Coupon>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let coupon = UpdateEntityUseCase {
        repo: state.coupon_repo(),
    }
    .execute(admin, id, body.into_new())
    .await?;
    Ok(Envelope::ok("Coupon updated successfully.", coupon))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.coupon_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Coupon deleted successfully."))
}

/// Public storefront check. Business rejections ride back as a
/// `success: false` body with HTTP 200.
pub async fn check(
    State(state): State<AppState>,
    Json(body): Json<CheckCouponBody>,
) -> Result<Json<Envelope<Coupon>>, ApiError> {
    let check = CheckCouponUseCase {
        coupons: state.coupon_repo(),
        products: state.product_repo(),
    }
    .execute(CheckCouponInput {
        code: body.coupon_code,
        purchase_amount: body.purchase_amount,
        product_ids: body.product_ids,
    })
    .await?;

    Ok(match check {
        CouponCheck::Valid(coupon) => Envelope::ok("Coupon is applicable.", coupon),
        CouponCheck::Rejected(message) => Envelope::rejected(message),
    })
}
