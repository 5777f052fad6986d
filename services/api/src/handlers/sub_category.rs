use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::NewSubCategory;
use crate::domain::types::SubCategory;
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryBody {
    pub name: String,
    pub category_id: Uuid,
}

impl SubCategoryBody {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required"));
        }
        Ok(())
    }

    fn into_new(self) -> NewSubCategory {
        NewSubCategory {
            name: self.name,
            category_id: self.category_id,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<SubCategory>>>, ApiError> {
    let sub_categories = ListEntitiesUseCase {
        repo: state.sub_category_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok(
        "Sub-categories retrieved successfully.",
        sub_categories,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<SubCategory>>, ApiError> {
    let sub_category = GetEntityUseCase {
        repo: state.sub_category_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok(
        "Sub-category retrieved successfully.",
        sub_category,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<SubCategoryBody>,
) -> Result<Json<Envelope<SubCategory>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let sub_category = CreateEntityUseCase {
        repo: state.sub_category_repo(),
    }
    .execute(admin, body.into_new())
    .await?;
    Ok(Envelope::ok(
        "Sub-category created successfully.",
        sub_category,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<SubCategoryBody>,
) -> Result<Json<Envelope<SubCategory>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let sub_category = UpdateEntityUseCase {
        repo: state.sub_category_repo(),
    }
    .execute(admin, id, body.into_new())
    .await?;
    Ok(Envelope::ok(
        "Sub-category updated successfully.",
        sub_category,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.sub_category_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Sub-category deleted successfully."))
}
