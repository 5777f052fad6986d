use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::{NewProduct, ProductPatch};
use crate::domain::types::Product;
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

/// Up to five image slots per product.
const MAX_IMAGES: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub offer_price: Option<f64>,
    pub proposed_category_id: Uuid,
    pub proposed_sub_category_id: Uuid,
    pub brand_id: Option<Uuid>,
    pub variant_type_id: Option<Uuid>,
    #[serde(default)]
    pub variant_ids: Vec<Uuid>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSlot {
    pub position: i16,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub offer_price: Option<f64>,
    pub proposed_category_id: Option<Uuid>,
    pub proposed_sub_category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub variant_type_id: Option<Uuid>,
    pub variant_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub images: Vec<ImageSlot>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let products = ListEntitiesUseCase {
        repo: state.product_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok("Products retrieved successfully.", products))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let product = GetEntityUseCase {
        repo: state.product_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("Product retrieved successfully.", product))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<CreateProductBody>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required"));
    }
    if body.quantity < 0 {
        return Err(ApiError::Validation("quantity cannot be negative"));
    }
    if body.price <= 0.0 {
        return Err(ApiError::Validation("price must be positive"));
    }
    if body.image_urls.len() > MAX_IMAGES {
        return Err(ApiError::Validation("a product takes at most 5 images"));
    }

    let product = CreateEntityUseCase {
        repo: state.product_repo(),
    }
    .execute(
        admin,
        NewProduct {
            name: body.name,
            description: body.description,
            quantity: body.quantity,
            price: body.price,
            offer_price: body.offer_price,
            category_id: body.proposed_category_id,
            sub_category_id: body.proposed_sub_category_id,
            brand_id: body.brand_id,
            variant_type_id: body.variant_type_id,
            variant_ids: body.variant_ids,
            image_urls: body.image_urls,
        },
    )
    .await?;
    Ok(Envelope::ok("Product created successfully.", product))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductBody>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    if body
        .images
        .iter()
        .any(|slot| !(1..=MAX_IMAGES as i16).contains(&slot.position))
    {
        return Err(ApiError::Validation("image position must be between 1 and 5"));
    }

    let product = UpdateEntityUseCase {
        repo: state.product_repo(),
    }
    .execute(
        admin,
        id,
        ProductPatch {
            name: body.name,
            description: body.description,
            quantity: body.quantity,
            price: body.price,
            offer_price: body.offer_price,
            category_id: body.proposed_category_id,
            sub_category_id: body.proposed_sub_category_id,
            brand_id: body.brand_id,
            variant_type_id: body.variant_type_id,
            variant_ids: body.variant_ids,
            images: body
                .images
                .into_iter()
                .map(|slot| (slot.position, slot.url))
                .collect(),
        },
    )
    .await?;
    Ok(Envelope::ok("Product updated successfully.", product))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.product_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Product deleted successfully."))
}
