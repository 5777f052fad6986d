use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::{CategoryPatch, NewCategory};
use crate::domain::types::Category;
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    pub name: String,
    pub image_url: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<Category>>>, ApiError> {
    let categories = ListEntitiesUseCase {
        repo: state.category_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok("Categories retrieved successfully.", categories))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Category>>, ApiError> {
    let category = GetEntityUseCase {
        repo: state.category_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("Category retrieved successfully.", category))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<CategoryBody>,
) -> Result<Json<Envelope<Category>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required"));
    }
    let image_url = body
        .image_url
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::Validation("image is required"))?;

    let category = CreateEntityUseCase {
        repo: state.category_repo(),
    }
    .execute(
        admin,
        NewCategory {
            name: body.name,
            image_url,
        },
    )
    .await?;
    Ok(Envelope::ok("Category created successfully.", category))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<Envelope<Category>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required"));
    }

    let category = UpdateEntityUseCase {
        repo: state.category_repo(),
    }
    .execute(
        admin,
        id,
        CategoryPatch {
            name: body.name,
            image_url: body.image_url.filter(|url| !url.is_empty()),
        },
    )
    .await?;
    Ok(Envelope::ok("Category updated successfully.", category))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.category_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Category deleted successfully."))
}
