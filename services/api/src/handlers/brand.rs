use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::NewBrand;
use crate::domain::types::Brand;
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandBody {
    pub name: String,
    pub sub_category_id: Uuid,
}

impl BrandBody {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required"));
        }
        Ok(())
    }

    fn into_new(self) -> NewBrand {
        NewBrand {
            name: self.name,
            sub_category_id: self.sub_category_id,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<Brand>>>, ApiError> {
    let brands = ListEntitiesUseCase {
        repo: state.brand_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok("Brands retrieved successfully.", brands))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Brand>>, ApiError> {
    let brand = GetEntityUseCase {
        repo: state.brand_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("Brand retrieved successfully.", brand))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<BrandBody>,
) -> Result<Json<Envelope<Brand>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let brand = CreateEntityUseCase {
        repo: state.brand_repo(),
    }
    .execute(admin, body.into_new())
    .await?;
    Ok(Envelope::ok("Brand created successfully.", brand))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<BrandBody>,
) -> Result<Json<Envelope<Brand>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let brand = UpdateEntityUseCase {
        repo: state.brand_repo(),
    }
    .execute(admin, id, body.into_new())
    .await?;
    Ok(Envelope::ok("Brand updated successfully.", brand))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.brand_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Brand deleted successfully."))
}
